use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use flight_lookup::config::{LoggingSettings, Settings};
use flight_lookup::routes::{self, flights::AppState, handle_query_payload_error};
use flight_lookup::services::{AeroDataBoxClient, FlightLookup};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let loaded = match std::env::var("FLIGHTS_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting flight lookup service...");

    let upstream = AeroDataBoxClient::new(&settings.upstream).map_err(|e| {
        error!("Failed to build AeroDataBox client: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    if !upstream.has_credential() {
        warn!("AERODATABOX_API_KEY not configured; lookups will fail with configuration_error");
    }

    let app_state = AppState::new(FlightLookup::new(upstream));

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
