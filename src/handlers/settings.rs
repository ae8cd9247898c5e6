use crate::models::*;
use crate::services::SettingsService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/settings/emergency-mode",
    tag = "settings",
    responses(
        (status = 200, description = "Current emergency-mode state", body = EmergencyModeResponse),
        (status = 503, description = "Settings store unavailable")
    )
)]
/// Current state of the operator override.
pub async fn get_emergency_mode(service: web::Data<SettingsService>) -> Result<HttpResponse> {
    match service.get().await {
        Ok(state) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": state }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/settings/emergency-mode",
    tag = "settings",
    request_body = UpdateEmergencyModeRequest,
    responses(
        (status = 200, description = "Emergency mode updated", body = EmergencyModeResponse),
        (status = 503, description = "Settings store unavailable")
    )
)]
/// Flips the operator override. While on, every eligible play wins as long
/// as stock remains.
pub async fn update_emergency_mode(
    service: web::Data<SettingsService>,
    body: web::Json<UpdateEmergencyModeRequest>,
) -> Result<HttpResponse> {
    match service.set_emergency_mode(body.enabled).await {
        Ok(state) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": state }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route registration
pub fn settings_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("/emergency-mode", web::get().to(get_emergency_mode))
            .route("/emergency-mode", web::put().to(update_emergency_mode)),
    );
}
