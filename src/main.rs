use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use fortuna_backend::{
    catalog::PrizeCatalog,
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // The catalog is frozen for the event: loaded once, never re-read.
    let catalog = Arc::new(
        PrizeCatalog::load(&config.game.catalog_path, &config.game.grand_total_label)
            .expect("Failed to load prize catalog"),
    );
    log::info!("Prize catalog loaded: {} prize types", catalog.list().len());

    let history_service = HistoryService::new(pool.clone());
    let settings_service = SettingsService::new(pool.clone());
    let inventory_service =
        InventoryService::new(pool.clone(), catalog.clone(), history_service.clone());
    let play_service = PlayService::load(
        pool.clone(),
        history_service.clone(),
        inventory_service.clone(),
        settings_service.clone(),
        config.game.clone(),
    )
    .await
    .expect("Failed to rebuild pacing state from history");

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(history_service.clone()))
            .app_data(web::Data::new(settings_service.clone()))
            .app_data(web::Data::new(inventory_service.clone()))
            .app_data(web::Data::new(play_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::play_config)
                    .configure(handlers::history_config)
                    .configure(handlers::prize_config)
                    .configure(handlers::settings_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
