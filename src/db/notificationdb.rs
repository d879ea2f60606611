// db/notificationdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::notificationmodels::{NewReminder, NotificationRecord};

#[async_trait]
pub trait NotificationExt {
    /// Claims today's reminder slot for a subscription and records the
    /// pending notification in one statement. Returns None when a reminder
    /// row already exists for the day and the claim is not forced; the
    /// partial unique index keeps overlapping invocations from
    /// double-claiming.
    async fn create_reminder(
        &self,
        reminder: &NewReminder,
    ) -> Result<Option<NotificationRecord>, sqlx::Error>;

    async fn mark_notification_sent(
        &self,
        notification_id: Uuid,
        whatsapp_message_id: &str,
    ) -> Result<(), sqlx::Error>;

    async fn mark_notification_failed(
        &self,
        notification_id: Uuid,
        error: &str,
    ) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn create_reminder(
        &self,
        reminder: &NewReminder,
    ) -> Result<Option<NotificationRecord>, sqlx::Error> {
        if reminder.forced {
            let record = sqlx::query_as::<_, NotificationRecord>(
                r#"
                INSERT INTO notifications
                    (user_id, subscription_id, type, title, message, status, metadata, forced, sent_on)
                VALUES ($1, $2, 'reminder', $3, $4, 'pending', $5, true, $6)
                RETURNING *
                "#,
            )
            .bind(reminder.user_id)
            .bind(reminder.subscription_id)
            .bind(&reminder.title)
            .bind(&reminder.message)
            .bind(reminder.metadata())
            .bind(reminder.sent_on)
            .fetch_one(&self.pool)
            .await?;

            return Ok(Some(record));
        }

        sqlx::query_as::<_, NotificationRecord>(
            r#"
            INSERT INTO notifications
                (user_id, subscription_id, type, title, message, status, metadata, forced, sent_on)
            SELECT $1, $2, 'reminder', $3, $4, 'pending', $5, false, $6
            WHERE NOT EXISTS (
                SELECT 1 FROM notifications
                WHERE user_id = $1
                  AND subscription_id = $2
                  AND type = 'reminder'
                  AND sent_on = $6
            )
            ON CONFLICT (user_id, subscription_id, sent_on)
                WHERE type = 'reminder' AND NOT forced
                DO NOTHING
            RETURNING *
            "#,
        )
        .bind(reminder.user_id)
        .bind(reminder.subscription_id)
        .bind(&reminder.title)
        .bind(&reminder.message)
        .bind(reminder.metadata())
        .bind(reminder.sent_on)
        .fetch_optional(&self.pool)
        .await
    }

    async fn mark_notification_sent(
        &self,
        notification_id: Uuid,
        whatsapp_message_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET status = 'sent', whatsapp_message_id = $2
            WHERE id = $1
            "#,
        )
        .bind(notification_id)
        .bind(whatsapp_message_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_notification_failed(
        &self,
        notification_id: Uuid,
        error: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET status = 'failed',
                metadata = COALESCE(metadata, '{}'::jsonb) || jsonb_build_object('error', $2::text)
            WHERE id = $1
            "#,
        )
        .bind(notification_id)
        .bind(error)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
