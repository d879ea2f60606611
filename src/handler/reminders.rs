// handler/reminders.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use chrono::Utc;
use serde_json::json;

use crate::{
    dtos::reminderdtos::SendRemindersDto,
    error::HttpError,
    service::reminder_service::ReminderScan,
    AppState,
};

pub fn reminder_handler() -> Router {
    Router::new().route("/send", post(send_reminders))
}

/// Runs one reminder pass. Meant to be hit by an external cron; an absent
/// body scans every eligible user. Individual send failures end up as
/// failed notification rows, not as a request-level error.
pub async fn send_reminders(
    Extension(app_state): Extension<Arc<AppState>>,
    body: Option<Json<SendRemindersDto>>,
) -> Result<impl IntoResponse, HttpError> {
    let options = body.map(|Json(body)| body).unwrap_or_default();

    let outcome = app_state
        .reminder_service
        .run_scan(ReminderScan {
            user_id: options.user_id,
            subscription_id: options.subscription_id,
            force: options.force,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Sent {} reminder(s)", outcome.reminders_sent),
        "remindersSent": outcome.reminders_sent,
        "notificationsCreated": outcome.notifications_created,
        "timestamp": Utc::now()
    })))
}
