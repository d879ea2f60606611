// handler/verification.rs
use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::verificationdtos::{SendCodeDto, VerifyCodeDto},
    error::HttpError,
    service::error::ServiceError,
    AppState,
};

pub fn verification_handler() -> Router {
    Router::new()
        .route("/send-code", post(send_code))
        .route("/verify-code", post(verify_code))
}

pub async fn send_code(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SendCodeDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (Some(phone_number), Some(user_id)) = (body.phone_number, body.user_id) else {
        return Err(HttpError::bad_request(
            "Missing required fields: phoneNumber, userId",
        ));
    };

    let expires_at = app_state
        .verification_service
        .send_code(user_id, &phone_number)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Verification code sent via WhatsApp",
        "expiresAt": expires_at
    })))
}

pub async fn verify_code(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<VerifyCodeDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (Some(phone_number), Some(verification_code), Some(user_id)) =
        (body.phone_number, body.verification_code, body.user_id)
    else {
        return Err(HttpError::bad_request(
            "Missing required fields: phoneNumber, verificationCode, userId",
        ));
    };

    match app_state
        .verification_service
        .check_code(user_id, &phone_number, &verification_code)
        .await
    {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "message": "WhatsApp number verified successfully",
            "phoneNumber": phone_number
        }))
        .into_response()),
        Err(error) => {
            // Invalid-code responses also report the attempts left.
            if let ServiceError::InvalidCode { attempts_remaining } = &error {
                return Ok((
                    error.status_code(),
                    Json(json!({
                        "error": error.to_string(),
                        "attemptsRemaining": attempts_remaining
                    })),
                )
                    .into_response());
            }

            Err(error.into())
        }
    }
}
