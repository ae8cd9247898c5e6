use crate::models::PrizeInventoryResponse;
use crate::services::InventoryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prizes",
    responses(
        (status = 200, description = "Catalog with distributed and remaining counts", body = [PrizeInventoryResponse]),
        (status = 503, description = "History store unavailable")
    )
)]
/// Stock overview: the event catalog against what the ledger shows as
/// already handed out.
pub async fn get_prizes(service: web::Data<InventoryService>) -> Result<HttpResponse> {
    match service.overview().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route registration
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/prizes").route("", web::get().to(get_prizes)));
}
