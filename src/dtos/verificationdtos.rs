// dtos/verificationdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeDto {
    pub phone_number: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeDto {
    pub phone_number: Option<String>,

    #[validate(length(min = 6, max = 6, message = "Verification code must be 6 digits"))]
    pub verification_code: Option<String>,

    pub user_id: Option<Uuid>,
}
