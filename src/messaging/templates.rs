// messaging/templates.rs
use crate::models::subscriptionmodels::Subscription;
use crate::utils::currency::format_amount;

/// Text sent along with a fresh verification code.
pub fn verification_code_message(code: &str) -> String {
    format!(
        "Your SubTrack verification code is *{}*.\n\nIt expires in 10 minutes. If you didn't request this code, you can ignore this message.",
        code
    )
}

pub fn reminder_title(subscription: &Subscription) -> String {
    format!("Subscription reminder: {}", subscription.name)
}

/// Reminder body for a subscription due in `days_until` days. The wording is
/// fixed per day bucket; everything else is substituted from the
/// subscription.
pub fn reminder_message(subscription: &Subscription, days_until: i64) -> String {
    let amount = format_amount(subscription.amount, &subscription.currency);
    let billing_date = subscription.next_billing.format("%B %-d, %Y").to_string();
    let payment_method = subscription.payment_method.as_deref().unwrap_or("Not set");
    let category = subscription.category.as_deref().unwrap_or("Uncategorized");

    let headline = match days_until {
        0 => format!("🚨 *{}* is due *today*!", subscription.name),
        3 => format!("⏰ *{}* renews in *3 days*.", subscription.name),
        7 => format!("📅 Heads up! *{}* renews in *7 days*.", subscription.name),
        n => format!("🔔 *{}* renews in {} days.", subscription.name, n),
    };

    format!(
        "{}\n\n💰 Amount: {}\n💳 Payment method: {}\n📂 Category: {}\n🗓 Billing date: {}",
        headline, amount, payment_method, category, billing_date
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subscriptionmodels::{BillingCycle, SubscriptionStatus};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn subscription(name: &str, amount: f64, currency: &str) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            amount,
            currency: currency.to_string(),
            billing_cycle: BillingCycle::Monthly,
            next_billing: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            category: Some("Entertainment".to_string()),
            payment_method: Some("Visa 4242".to_string()),
            status: SubscriptionStatus::Active,
            created_at: None,
        }
    }

    #[test]
    fn substitutes_subscription_fields() {
        let message = reminder_message(&subscription("Netflix", 15.99, "USD"), 3);

        assert!(message.contains("Netflix"));
        assert!(message.contains("$15.99"));
        assert!(message.contains("Visa 4242"));
        assert!(message.contains("Entertainment"));
        assert!(message.contains("June 15, 2025"));
    }

    #[test]
    fn wording_differs_per_day_bucket() {
        let sub = subscription("Spotify", 9.99, "USD");

        assert!(reminder_message(&sub, 0).contains("due *today*"));
        assert!(reminder_message(&sub, 3).contains("in *3 days*"));
        assert!(reminder_message(&sub, 7).contains("in *7 days*"));
        assert!(reminder_message(&sub, 5).contains("in 5 days"));
    }

    #[test]
    fn unknown_currency_code_passes_through() {
        let message = reminder_message(&subscription("Hosting", 120.0, "XYZ"), 7);
        assert!(message.contains("XYZ120.00"));
    }

    #[test]
    fn missing_optional_fields_get_placeholders() {
        let mut sub = subscription("Gym", 30.0, "USD");
        sub.category = None;
        sub.payment_method = None;

        let message = reminder_message(&sub, 0);
        assert!(message.contains("Not set"));
        assert!(message.contains("Uncategorized"));
    }

    #[test]
    fn verification_message_carries_the_code() {
        let message = verification_code_message("123456");
        assert!(message.contains("*123456*"));
        assert!(message.contains("10 minutes"));
    }
}
