use crate::entities::play_record_entity as records;
use crate::error::AppResult;
use crate::models::{
    HistoryQuery, HistoryStatsResponse, PaginatedResponse, PaginationParams,
    PlayRecordPageResponse, PlayRecordResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Append-only ledger of completed plays. The connection-generic methods run
/// inside the play transaction; the rest serve the admin panel off the pool.
#[derive(Clone)]
pub struct HistoryService {
    pool: DatabaseConnection,
}

impl HistoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Whether this participant already has a record.
    pub async fn has_played<C: ConnectionTrait>(
        &self,
        conn: &C,
        participant_id: &str,
    ) -> AppResult<bool> {
        let count = records::Entity::find()
            .filter(records::Column::ParticipantId.eq(participant_id))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    /// Prize names of every winning record, one entry per win.
    pub async fn winning_prize_names<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> AppResult<Vec<String>> {
        let rows = records::Entity::find()
            .filter(records::Column::Won.eq(true))
            .all(conn)
            .await?;
        Ok(rows.into_iter().filter_map(|r| r.prize).collect())
    }

    /// Appends one play record. The caller commits.
    pub async fn append<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: records::ActiveModel,
    ) -> AppResult<records::Model> {
        Ok(record.insert(conn).await?)
    }

    /// Win flags of all records in creation order, for pacing reconstruction
    /// at startup.
    pub async fn won_flags_in_order(&self) -> AppResult<Vec<bool>> {
        let rows = records::Entity::find()
            .order_by_asc(records::Column::CreatedAt)
            .order_by_asc(records::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.won).collect())
    }

    /// Paginated history, newest first.
    pub async fn list_records(&self, query: &HistoryQuery) -> AppResult<PlayRecordPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);

        let base_query = records::Entity::find();
        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(records::Column::CreatedAt, Order::Desc)
            .order_by(records::Column::Id, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<PlayRecordResponse> = items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// Header counters for the admin panel.
    pub async fn stats(&self) -> AppResult<HistoryStatsResponse> {
        let total_plays = records::Entity::find().count(&self.pool).await? as i64;
        let total_winners = records::Entity::find()
            .filter(records::Column::Won.eq(true))
            .count(&self.pool)
            .await? as i64;
        let prizes_awarded = records::Entity::find()
            .filter(records::Column::Prize.is_not_null())
            .count(&self.pool)
            .await? as i64;

        Ok(HistoryStatsResponse {
            total_plays,
            total_winners,
            prizes_awarded,
        })
    }

    /// Deletes every record. Administrative reset only.
    pub async fn clear_all<C: ConnectionTrait>(&self, conn: &C) -> AppResult<u64> {
        let result = records::Entity::delete_many().exec(conn).await?;
        Ok(result.rows_affected)
    }
}
