// models/settingsmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct UserSettings {
    pub user_id: Uuid,
    pub whatsapp_number: Option<String>,
    pub whatsapp_verified: bool,
    pub whatsapp_notifications: bool,
    pub reminder_days_7: bool,
    pub reminder_days_3: bool,
    pub reminder_urgent: bool,
    pub timezone: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
