// dtos/reminderdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An empty or absent body means "scan everyone, no force".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendRemindersDto {
    pub user_id: Option<Uuid>,
    pub subscription_id: Option<Uuid>,
    pub force: bool,
}
