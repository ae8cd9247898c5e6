use actix_cors::Cors;

/// The kiosk frontend and the admin panel are served from a separate origin
/// on the event floor network, so CORS stays open.
pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
