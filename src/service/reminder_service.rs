// service/reminder_service.rs
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::time::{sleep, Duration};
use uuid::Uuid;

use crate::{
    db::{
        db::DBClient, notificationdb::NotificationExt, settingsdb::SettingsExt,
        subscriptiondb::SubscriptionExt,
    },
    messaging::{templates, whatsapp::WhatsAppClient},
    models::{
        notificationmodels::{NewReminder, ReminderType},
        settingsmodel::UserSettings,
        subscriptionmodels::Subscription,
    },
    service::error::ServiceError,
};

const SEND_DELAY_MS: u64 = 500;
const FORCE_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReminderScan {
    pub user_id: Option<Uuid>,
    pub subscription_id: Option<Uuid>,
    pub force: bool,
}

#[derive(Debug, Default)]
pub struct ReminderScanOutcome {
    pub reminders_sent: u32,
    pub notifications_created: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ReminderToggles {
    pub days_7: bool,
    pub days_3: bool,
    pub urgent: bool,
}

impl From<&UserSettings> for ReminderToggles {
    fn from(settings: &UserSettings) -> Self {
        ReminderToggles {
            days_7: settings.reminder_days_7,
            days_3: settings.reminder_days_3,
            urgent: settings.reminder_urgent,
        }
    }
}

/// Decision table for which reminder (if any) a subscription gets today.
/// A forced scan covers the whole 0..=7 day window and wins over the
/// per-day toggles.
pub fn select_reminder_type(
    days_until: i64,
    toggles: &ReminderToggles,
    force: bool,
) -> Option<ReminderType> {
    if force {
        return (0..=FORCE_WINDOW_DAYS)
            .contains(&days_until)
            .then_some(ReminderType::Manual);
    }

    match days_until {
        7 if toggles.days_7 => Some(ReminderType::SevenDays),
        3 if toggles.days_3 => Some(ReminderType::ThreeDays),
        0 if toggles.urgent => Some(ReminderType::Urgent),
        _ => None,
    }
}

pub fn days_until_billing(next_billing: NaiveDate, today: NaiveDate) -> i64 {
    next_billing.signed_duration_since(today).num_days()
}

#[derive(Debug, Clone)]
pub struct ReminderService {
    db_client: Arc<DBClient>,
    whatsapp: Arc<WhatsAppClient>,
}

impl ReminderService {
    pub fn new(db_client: Arc<DBClient>, whatsapp: Arc<WhatsAppClient>) -> Self {
        Self { db_client, whatsapp }
    }

    /// One full pass over eligible users and their active subscriptions.
    /// Per-user and per-send failures are logged and recorded, never fatal
    /// to the scan.
    pub async fn run_scan(&self, scan: ReminderScan) -> Result<ReminderScanOutcome, ServiceError> {
        let recipients = self.db_client.get_reminder_recipients(scan.user_id).await?;
        let today = Utc::now().date_naive();
        let mut outcome = ReminderScanOutcome::default();

        tracing::info!("Reminder scan started: {} eligible users", recipients.len());

        for settings in &recipients {
            let Some(whatsapp_number) = settings.whatsapp_number.as_deref() else {
                continue;
            };

            let subscriptions = match self
                .db_client
                .get_active_subscriptions(settings.user_id, scan.subscription_id)
                .await
            {
                Ok(subscriptions) => subscriptions,
                Err(e) => {
                    tracing::warn!(
                        "Skipping user {}: failed to load subscriptions: {}",
                        settings.user_id,
                        e
                    );
                    continue;
                }
            };

            let toggles = ReminderToggles::from(settings);

            for subscription in &subscriptions {
                let days_until = days_until_billing(subscription.next_billing, today);
                let Some(reminder_type) = select_reminder_type(days_until, &toggles, scan.force)
                else {
                    continue;
                };

                let dispatched = self
                    .dispatch_reminder(
                        whatsapp_number,
                        subscription,
                        reminder_type,
                        days_until,
                        scan.force,
                        today,
                    )
                    .await?;

                if let Some(sent) = dispatched {
                    outcome.notifications_created += 1;
                    if sent {
                        outcome.reminders_sent += 1;
                    }
                    sleep(Duration::from_millis(SEND_DELAY_MS)).await;
                }
            }
        }

        tracing::info!(
            "Reminder scan finished: {} sent, {} notifications recorded",
            outcome.reminders_sent,
            outcome.notifications_created
        );
        Ok(outcome)
    }

    /// Claims the day slot, sends the message and records the outcome.
    /// Returns None when the slot was already taken today, otherwise
    /// Some(whether the send succeeded).
    async fn dispatch_reminder(
        &self,
        whatsapp_number: &str,
        subscription: &Subscription,
        reminder_type: ReminderType,
        days_until: i64,
        forced: bool,
        today: NaiveDate,
    ) -> Result<Option<bool>, ServiceError> {
        let message = templates::reminder_message(subscription, days_until);

        let reminder = NewReminder {
            user_id: subscription.user_id,
            subscription_id: subscription.id,
            title: templates::reminder_title(subscription),
            message: message.clone(),
            reminder_type,
            days_until,
            amount: subscription.amount,
            currency: subscription.currency.clone(),
            forced,
            sent_on: today,
        };

        let Some(notification) = self.db_client.create_reminder(&reminder).await? else {
            tracing::debug!(
                "Reminder for subscription {} already sent today",
                subscription.id
            );
            return Ok(None);
        };

        match self.whatsapp.send_text(whatsapp_number, &message).await {
            Ok(message_id) => {
                if let Err(e) = self
                    .db_client
                    .mark_notification_sent(notification.id, &message_id)
                    .await
                {
                    tracing::error!("Failed to record sent notification {}: {}", notification.id, e);
                }
                Ok(Some(true))
            }
            Err(e) => {
                tracing::warn!(
                    "Reminder send failed for subscription {}: {}",
                    subscription.id,
                    e
                );
                if let Err(db_err) = self
                    .db_client
                    .mark_notification_failed(notification.id, &e.to_string())
                    .await
                {
                    tracing::error!(
                        "Failed to record failed notification {}: {}",
                        notification.id,
                        db_err
                    );
                }
                Ok(Some(false))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggles(days_7: bool, days_3: bool, urgent: bool) -> ReminderToggles {
        ReminderToggles {
            days_7,
            days_3,
            urgent,
        }
    }

    #[test]
    fn enabled_toggles_match_their_day() {
        assert_eq!(
            select_reminder_type(7, &toggles(true, false, false), false),
            Some(ReminderType::SevenDays)
        );
        assert_eq!(
            select_reminder_type(3, &toggles(false, true, false), false),
            Some(ReminderType::ThreeDays)
        );
        assert_eq!(
            select_reminder_type(0, &toggles(false, false, true), false),
            Some(ReminderType::Urgent)
        );
    }

    #[test]
    fn disabled_toggles_select_nothing() {
        assert_eq!(select_reminder_type(7, &toggles(false, true, true), false), None);
        assert_eq!(select_reminder_type(3, &toggles(true, false, true), false), None);
        assert_eq!(select_reminder_type(0, &toggles(true, true, false), false), None);
    }

    #[test]
    fn off_schedule_days_select_nothing() {
        for days in [-3, -1, 1, 2, 4, 5, 6, 8, 14, 30] {
            assert_eq!(
                select_reminder_type(days, &toggles(true, true, true), false),
                None
            );
        }
    }

    #[test]
    fn force_overrides_toggles_inside_the_window() {
        assert_eq!(
            select_reminder_type(5, &toggles(false, false, false), true),
            Some(ReminderType::Manual)
        );
        assert_eq!(
            select_reminder_type(0, &toggles(false, false, false), true),
            Some(ReminderType::Manual)
        );
        // Even on a toggle day, a forced scan sends a manual reminder.
        assert_eq!(
            select_reminder_type(7, &toggles(true, true, true), true),
            Some(ReminderType::Manual)
        );
    }

    #[test]
    fn force_outside_the_window_selects_nothing() {
        assert_eq!(select_reminder_type(10, &toggles(true, true, true), true), None);
        assert_eq!(select_reminder_type(8, &toggles(true, true, true), true), None);
        assert_eq!(select_reminder_type(-1, &toggles(true, true, true), true), None);
    }

    #[test]
    fn days_until_is_a_calendar_day_difference() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 12).unwrap();

        assert_eq!(
            days_until_billing(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(), today),
            3
        );
        assert_eq!(days_until_billing(today, today), 0);
        assert_eq!(
            days_until_billing(NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(), today),
            30
        );
        assert_eq!(
            days_until_billing(NaiveDate::from_ymd_opt(2025, 6, 11).unwrap(), today),
            -1
        );
    }
}
