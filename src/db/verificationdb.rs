// db/verificationdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::verificationmodels::VerificationRecord;

#[async_trait]
pub trait VerificationExt {
    /// Creates or replaces the code for a (user, phone) pair. Replacing
    /// resets the attempt counter and the verified flag.
    async fn upsert_verification(
        &self,
        user_id: Uuid,
        phone_number: &str,
        verification_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationRecord, sqlx::Error>;

    async fn get_verification(
        &self,
        user_id: Uuid,
        phone_number: &str,
    ) -> Result<Option<VerificationRecord>, sqlx::Error>;

    /// Bumps the failure counter and returns the new count.
    async fn increment_failed_attempts(&self, verification_id: Uuid) -> Result<i32, sqlx::Error>;

    async fn mark_verified(
        &self,
        verification_id: Uuid,
        verified_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error>;

    async fn cleanup_expired_verifications(&self) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl VerificationExt for DBClient {
    async fn upsert_verification(
        &self,
        user_id: Uuid,
        phone_number: &str,
        verification_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationRecord, sqlx::Error> {
        sqlx::query_as::<_, VerificationRecord>(
            r#"
            INSERT INTO whatsapp_verifications (user_id, phone_number, verification_code, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, phone_number)
            DO UPDATE SET
                verification_code = EXCLUDED.verification_code,
                expires_at = EXCLUDED.expires_at,
                failed_attempts = 0,
                verified = false,
                verified_at = NULL
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(phone_number)
        .bind(verification_code)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_verification(
        &self,
        user_id: Uuid,
        phone_number: &str,
    ) -> Result<Option<VerificationRecord>, sqlx::Error> {
        sqlx::query_as::<_, VerificationRecord>(
            r#"
            SELECT * FROM whatsapp_verifications
            WHERE user_id = $1 AND phone_number = $2
            "#,
        )
        .bind(user_id)
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
    }

    async fn increment_failed_attempts(&self, verification_id: Uuid) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as(
            r#"
            UPDATE whatsapp_verifications
            SET failed_attempts = failed_attempts + 1
            WHERE id = $1
            RETURNING failed_attempts
            "#,
        )
        .bind(verification_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn mark_verified(
        &self,
        verification_id: Uuid,
        verified_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE whatsapp_verifications
            SET verified = true, verified_at = $2
            WHERE id = $1
            "#,
        )
        .bind(verification_id)
        .bind(verified_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn cleanup_expired_verifications(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM whatsapp_verifications
            WHERE verified = false AND expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
