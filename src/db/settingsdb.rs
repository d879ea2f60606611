// db/settingsdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::settingsmodel::UserSettings;

#[async_trait]
pub trait SettingsExt {
    /// Users eligible for WhatsApp reminders: notifications on, number
    /// verified and present. Optionally narrowed to a single user.
    async fn get_reminder_recipients(
        &self,
        user_id: Option<Uuid>,
    ) -> Result<Vec<UserSettings>, sqlx::Error>;

    async fn mark_whatsapp_verified(
        &self,
        user_id: Uuid,
        phone_number: &str,
    ) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl SettingsExt for DBClient {
    async fn get_reminder_recipients(
        &self,
        user_id: Option<Uuid>,
    ) -> Result<Vec<UserSettings>, sqlx::Error> {
        sqlx::query_as::<_, UserSettings>(
            r#"
            SELECT * FROM user_settings
            WHERE whatsapp_notifications = true
              AND whatsapp_verified = true
              AND whatsapp_number IS NOT NULL
              AND ($1::uuid IS NULL OR user_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_whatsapp_verified(
        &self,
        user_id: Uuid,
        phone_number: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE user_settings
            SET whatsapp_number = $2, whatsapp_verified = true, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(phone_number)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
