// service/verification_service.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::time::interval;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, settingsdb::SettingsExt, verificationdb::VerificationExt},
    messaging::{templates, whatsapp::WhatsAppClient},
    models::verificationmodels::VerificationRecord,
    service::error::ServiceError,
    utils::{code_generator::generate_verification_code, phone::is_valid_phone},
};

pub const MAX_FAILED_ATTEMPTS: i32 = 5;
const CODE_TTL_MINUTES: i64 = 10;

/// What a submitted code means for a stored record.
#[derive(Debug, PartialEq, Eq)]
enum SubmissionCheck {
    AlreadyVerified,
    Expired,
    Mismatch,
    Match,
}

fn evaluate_submission(
    record: &VerificationRecord,
    submitted_code: &str,
    now: DateTime<Utc>,
) -> SubmissionCheck {
    if record.verified {
        return SubmissionCheck::AlreadyVerified;
    }

    // A code checked at exactly expires_at still counts.
    if now > record.expires_at {
        return SubmissionCheck::Expired;
    }

    if submitted_code != record.verification_code {
        return SubmissionCheck::Mismatch;
    }

    SubmissionCheck::Match
}

fn mismatch_outcome(failed_attempts: i32) -> ServiceError {
    if failed_attempts >= MAX_FAILED_ATTEMPTS {
        ServiceError::TooManyAttempts
    } else {
        ServiceError::InvalidCode {
            attempts_remaining: MAX_FAILED_ATTEMPTS - failed_attempts,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerificationService {
    db_client: Arc<DBClient>,
    whatsapp: Arc<WhatsAppClient>,
}

impl VerificationService {
    pub fn new(db_client: Arc<DBClient>, whatsapp: Arc<WhatsAppClient>) -> Self {
        Self { db_client, whatsapp }
    }

    /// Issues a fresh code for the (user, phone) pair and delivers it over
    /// WhatsApp. Re-requesting replaces the previous code and resets the
    /// attempt counter.
    pub async fn send_code(
        &self,
        user_id: Uuid,
        phone_number: &str,
    ) -> Result<DateTime<Utc>, ServiceError> {
        if !is_valid_phone(phone_number) {
            return Err(ServiceError::Validation(format!(
                "Invalid phone number: {}",
                phone_number
            )));
        }

        let code = generate_verification_code();
        let expires_at = Utc::now() + Duration::minutes(CODE_TTL_MINUTES);

        self.db_client
            .upsert_verification(user_id, phone_number, &code, expires_at)
            .await?;

        self.whatsapp
            .send_text(phone_number, &templates::verification_code_message(&code))
            .await?;

        tracing::info!("Verification code issued for user {}", user_id);
        Ok(expires_at)
    }

    /// Validates a submitted code. On success the record is marked verified
    /// and the user's settings are updated best-effort.
    pub async fn check_code(
        &self,
        user_id: Uuid,
        phone_number: &str,
        submitted_code: &str,
    ) -> Result<(), ServiceError> {
        let record = self
            .db_client
            .get_verification(user_id, phone_number)
            .await?
            .ok_or(ServiceError::VerificationNotFound)?;

        match evaluate_submission(&record, submitted_code, Utc::now()) {
            SubmissionCheck::AlreadyVerified => Err(ServiceError::AlreadyVerified),
            SubmissionCheck::Expired => Err(ServiceError::CodeExpired),
            SubmissionCheck::Mismatch => {
                let failed_attempts = self
                    .db_client
                    .increment_failed_attempts(record.id)
                    .await?;
                Err(mismatch_outcome(failed_attempts))
            }
            SubmissionCheck::Match => {
                self.db_client.mark_verified(record.id, Utc::now()).await?;

                // Verification stands even if the settings write fails.
                if let Err(e) = self
                    .db_client
                    .mark_whatsapp_verified(user_id, phone_number)
                    .await
                {
                    tracing::error!(
                        "Failed to update settings after verification for user {}: {}",
                        user_id,
                        e
                    );
                }

                tracing::info!("WhatsApp number verified for user {}", user_id);
                Ok(())
            }
        }
    }

    pub async fn start_cleanup_task(&self) {
        let db_client = self.db_client.clone();

        tokio::spawn(async move {
            let mut interval = interval(std::time::Duration::from_secs(3600)); // Run every hour

            loop {
                interval.tick().await;

                match db_client.cleanup_expired_verifications().await {
                    Ok(count) => {
                        if count > 0 {
                            tracing::info!("Cleaned up {} expired verification codes", count);
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to clean up expired verification codes: {}", e);
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(
        code: &str,
        expires_at: DateTime<Utc>,
        verified: bool,
        failed_attempts: i32,
    ) -> VerificationRecord {
        VerificationRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            phone_number: "+1 234-567-8900".to_string(),
            verification_code: code.to_string(),
            expires_at,
            failed_attempts,
            verified,
            verified_at: None,
            created_at: None,
        }
    }

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn matching_code_within_expiry_verifies() {
        let now = expiry() - Duration::minutes(5);
        assert_eq!(
            evaluate_submission(&record("123456", expiry(), false, 0), "123456", now),
            SubmissionCheck::Match
        );
    }

    #[test]
    fn code_at_exact_expiry_is_not_expired() {
        assert_eq!(
            evaluate_submission(&record("123456", expiry(), false, 0), "123456", expiry()),
            SubmissionCheck::Match
        );
    }

    #[test]
    fn code_one_second_past_expiry_is_expired() {
        let now = expiry() + Duration::seconds(1);
        assert_eq!(
            evaluate_submission(&record("123456", expiry(), false, 0), "123456", now),
            SubmissionCheck::Expired
        );
    }

    #[test]
    fn already_verified_wins_over_expiry() {
        let now = expiry() + Duration::hours(1);
        assert_eq!(
            evaluate_submission(&record("123456", expiry(), true, 0), "123456", now),
            SubmissionCheck::AlreadyVerified
        );
    }

    #[test]
    fn wrong_code_is_a_mismatch() {
        let now = expiry() - Duration::minutes(1);
        assert_eq!(
            evaluate_submission(&record("123456", expiry(), false, 0), "654321", now),
            SubmissionCheck::Mismatch
        );
    }

    #[test]
    fn fifth_failure_locks_the_record() {
        assert!(matches!(mismatch_outcome(5), ServiceError::TooManyAttempts));
        assert!(matches!(mismatch_outcome(8), ServiceError::TooManyAttempts));
    }

    #[test]
    fn fourth_failure_leaves_one_attempt() {
        assert!(matches!(
            mismatch_outcome(4),
            ServiceError::InvalidCode {
                attempts_remaining: 1
            }
        ));
        assert!(matches!(
            mismatch_outcome(1),
            ServiceError::InvalidCode {
                attempts_remaining: 4
            }
        ));
    }
}
