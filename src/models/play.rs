use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::play_record_entity as record_entity;

use super::PaginatedResponse;

/// Participant role from the employee directory export. Directors take part
/// in the animation but can never win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The directory export spells this `empleado`; both forms are accepted.
    #[serde(alias = "empleado")]
    Employee,
    Director,
}

/// Play request body: the participant as resolved by the kiosk frontend
/// against the directory export.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PlayRequest {
    /// Directory identifier, also the one-play-per-person key.
    pub id: String,
    /// Display name, stored on the record for the admin panel.
    pub name: String,
    pub role: Role,
    /// Hire date (`YYYY-MM-DD`) when the export has one.
    pub hire_date: Option<NaiveDate>,
}

/// Outcome of one play.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayOutcomeResponse {
    pub win: bool,
    /// Prize name, present iff `win` is true.
    pub prize: Option<String>,
    /// Tenure in days captured at play time, when a hire date was given.
    pub tenure_days: Option<i64>,
}

/// History listing query parameters.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HistoryQuery {
    /// Page number (default 1)
    pub page: Option<u32>,
    /// Page size (default 20)
    pub per_page: Option<u32>,
}

/// One play record row for the admin panel.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayRecordResponse {
    pub id: i64,
    pub participant_id: String,
    pub participant_name: String,
    pub tenure_days: Option<i64>,
    pub won: bool,
    pub prize: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<record_entity::Model> for PlayRecordResponse {
    fn from(m: record_entity::Model) -> Self {
        PlayRecordResponse {
            id: m.id,
            participant_id: m.participant_id,
            participant_name: m.participant_name,
            tenure_days: m.tenure_days,
            won: m.won,
            prize: m.prize,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Aggregate counters for the admin panel header.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryStatsResponse {
    pub total_plays: i64,
    pub total_winners: i64,
    pub prizes_awarded: i64,
}

/// Per-prize stock view: event allotment vs. what the history store shows
/// as already handed out.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeInventoryResponse {
    pub name: String,
    pub total: i64,
    pub distributed: i64,
    pub remaining: i64,
}

/// Result of an administrative history reset.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResetResponse {
    pub deleted_records: u64,
}

/// Play history page response.
pub type PlayRecordPageResponse = PaginatedResponse<PlayRecordResponse>;
