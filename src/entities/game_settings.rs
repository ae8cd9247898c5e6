use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Operator-controlled switches. Exactly one row (id = SETTINGS_ROW_ID),
/// seeded by the initial migration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "game_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// When set, every eligible play is forced to win (inventory permitting).
    pub emergency_mode: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

pub const SETTINGS_ROW_ID: i64 = 1;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
