use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One completed play, appended once and never mutated afterwards.
/// - prize stores the prize name snapshot (set iff won) so history survives
///   catalog changes between events
/// - tenure_days is the participant's seniority captured at play time,
///   NULL when the directory export carried no hire date
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "play_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub participant_id: String,
    pub participant_name: String,
    pub tenure_days: Option<i64>,
    pub won: bool,
    pub prize: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
