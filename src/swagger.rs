use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::PrizeDefinition;
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::play::play,
        handlers::history::get_records,
        handlers::history::get_stats,
        handlers::history::reset_history,
        handlers::prizes::get_prizes,
        handlers::settings::get_emergency_mode,
        handlers::settings::update_emergency_mode,
    ),
    components(
        schemas(
            Role,
            PlayRequest,
            PlayOutcomeResponse,
            HistoryQuery,
            PlayRecordResponse,
            HistoryStatsResponse,
            PrizeDefinition,
            PrizeInventoryResponse,
            ResetResponse,
            EmergencyModeResponse,
            UpdateEmergencyModeRequest,
            ApiError,
        )
    ),
    tags(
        (name = "play", description = "Play execution API"),
        (name = "history", description = "Play history and administrative reset API"),
        (name = "prizes", description = "Prize stock API"),
        (name = "settings", description = "Operator settings API"),
    ),
    info(
        title = "Fortuna Totem Backend API",
        version = "1.0.0",
        description = "Win determination and prize inventory backend for the Fortuna promotional totem",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
