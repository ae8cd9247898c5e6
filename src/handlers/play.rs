use crate::models::*;
use crate::services::PlayService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/play",
    tag = "play",
    request_body = PlayRequest,
    responses(
        (status = 200, description = "Play resolved to a terminal outcome", body = PlayOutcomeResponse),
        (status = 400, description = "Invalid participant payload"),
        (status = 409, description = "Participant has already played"),
        (status = 503, description = "History store unavailable, play not recorded")
    )
)]
/// Runs a single play:
/// 1. Rejects repeat plays (test identifiers excepted)
/// 2. Applies the elimination rules against pacing, stock and overrides
/// 3. Commits the record before the outcome is revealed
pub async fn play(
    service: web::Data<PlayService>,
    body: web::Json<PlayRequest>,
) -> Result<HttpResponse> {
    match service.play(body.into_inner()).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": outcome }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route registration
pub fn play_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/play").route("", web::post().to(play)));
}
