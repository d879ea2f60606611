// models/notificationmodels.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "notification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

/// Which reminder a subscription gets; stored in the notification metadata
/// for dedup and audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderType {
    #[serde(rename = "7_days")]
    SevenDays,
    #[serde(rename = "3_days")]
    ThreeDays,
    #[serde(rename = "urgent")]
    Urgent,
    #[serde(rename = "manual")]
    Manual,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::SevenDays => "7_days",
            ReminderType::ThreeDays => "3_days",
            ReminderType::Urgent => "urgent",
            ReminderType::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NotificationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subscription_id: Uuid,
    #[sqlx(rename = "type")]
    pub r#type: String,
    pub title: String,
    pub message: String,
    pub status: NotificationStatus,
    pub whatsapp_message_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub forced: bool,
    pub sent_on: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
}

/// Everything needed to record one reminder before it goes out the door.
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub user_id: Uuid,
    pub subscription_id: Uuid,
    pub title: String,
    pub message: String,
    pub reminder_type: ReminderType,
    pub days_until: i64,
    pub amount: f64,
    pub currency: String,
    pub forced: bool,
    pub sent_on: NaiveDate,
}

impl NewReminder {
    pub fn metadata(&self) -> serde_json::Value {
        serde_json::json!({
            "reminder_type": self.reminder_type.as_str(),
            "days_until": self.days_until,
            "amount": self.amount,
            "currency": self.currency,
        })
    }
}
