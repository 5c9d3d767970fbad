use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use score_calc::config::{LogFormat, LoggingSettings, Settings};
use score_calc::error::{handle_json_payload_error, handle_query_payload_error};
use score_calc::{default_registry, routes, AppState};

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Full => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    init_tracing(&settings.logging);
    info!("Starting score calculator service...");

    let registry = default_registry().map_err(|e| {
        error!("Failed to register calculators: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;
    let registry = Arc::new(registry);

    info!(
        "Loaded {} scores across {} categories",
        registry.len(),
        registry.categories().len()
    );

    let app_state = AppState::new(Arc::clone(&registry));
    let json_limit = settings.api.json_limit_bytes;
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.workers();

    info!("Starting HTTP server on {}:{} ({} workers)", host, port, workers);

    HttpServer::new(move || {
        let registry = Arc::clone(&registry);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(
                web::JsonConfig::default()
                    .limit(json_limit)
                    .error_handler(handle_json_payload_error),
            )
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(move |cfg| routes::configure_routes(cfg, &registry))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
