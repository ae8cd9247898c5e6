use crate::entities::game_setting_entity as settings;
use crate::entities::game_settings::SETTINGS_ROW_ID;
use crate::error::{AppError, AppResult};
use crate::models::EmergencyModeResponse;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set,
};

/// Operator switches, stored in the single game_settings row.
#[derive(Clone)]
pub struct SettingsService {
    pool: DatabaseConnection,
}

impl SettingsService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Emergency flag for one decision. Fails safe to off: a store outage
    /// must never force wins.
    pub async fn emergency_mode<C: ConnectionTrait>(&self, conn: &C) -> bool {
        match settings::Entity::find_by_id(SETTINGS_ROW_ID).one(conn).await {
            Ok(Some(row)) => row.emergency_mode,
            Ok(None) => false,
            Err(e) => {
                log::warn!("Failed to read emergency mode, treating as off: {e}");
                false
            }
        }
    }

    pub async fn get(&self) -> AppResult<EmergencyModeResponse> {
        let row = settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Settings row missing".to_string()))?;
        Ok(row.into())
    }

    pub async fn set_emergency_mode(&self, enabled: bool) -> AppResult<EmergencyModeResponse> {
        let existing = settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(&self.pool)
            .await?;

        let updated = match existing {
            Some(row) => {
                let mut am = row.into_active_model();
                am.emergency_mode = Set(enabled);
                am.updated_at = Set(Some(Utc::now()));
                am.update(&self.pool).await?
            }
            // The migration seeds the row; recreate it if an operator wiped
            // the table by hand.
            None => {
                settings::ActiveModel {
                    id: Set(SETTINGS_ROW_ID),
                    emergency_mode: Set(enabled),
                    updated_at: Set(Some(Utc::now())),
                }
                .insert(&self.pool)
                .await?
            }
        };

        log::info!("Emergency mode set to {}", updated.emergency_mode);
        Ok(updated.into())
    }
}
