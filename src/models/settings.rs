use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::game_setting_entity as settings_entity;

/// Emergency-mode switch state.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmergencyModeResponse {
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<settings_entity::Model> for EmergencyModeResponse {
    fn from(m: settings_entity::Model) -> Self {
        EmergencyModeResponse {
            enabled: m.emergency_mode,
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateEmergencyModeRequest {
    pub enabled: bool,
}
