// models/verificationmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-held state for an in-progress phone-number ownership proof.
/// One live record per (user, phone); re-requesting a code replaces it.
#[derive(Debug, Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone_number: String,
    pub verification_code: String,
    pub expires_at: DateTime<Utc>,
    pub failed_attempts: i32,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}
