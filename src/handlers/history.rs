use crate::models::*;
use crate::services::{HistoryService, PlayService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/history/records",
    tag = "history",
    params(
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("per_page" = Option<u32>, Query, description = "Page size (default 20)")
    ),
    responses(
        (status = 200, description = "Paginated play history, newest first"),
        (status = 503, description = "History store unavailable")
    )
)]
/// Play history for the admin panel, newest first.
pub async fn get_records(
    service: web::Data<HistoryService>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    match service.list_records(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/history/stats",
    tag = "history",
    responses(
        (status = 200, description = "Aggregate play counters", body = HistoryStatsResponse),
        (status = 503, description = "History store unavailable")
    )
)]
/// Total plays, winners and prizes handed out so far.
pub async fn get_stats(service: web::Data<HistoryService>) -> Result<HttpResponse> {
    match service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": stats }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/history",
    tag = "history",
    responses(
        (status = 200, description = "History cleared and pacing counters zeroed", body = ResetResponse),
        (status = 503, description = "History store unavailable")
    )
)]
/// Administrative reset. Deletes every play record and restarts pacing; the
/// next play sees a fresh event.
pub async fn reset_history(service: web::Data<PlayService>) -> Result<HttpResponse> {
    match service.reset().await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": result,
            "message": "History cleared"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route registration
pub fn history_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/history")
            .route("/records", web::get().to(get_records))
            .route("/stats", web::get().to(get_stats))
            .route("", web::delete().to(reset_history)),
    );
}
