// Route exports
pub mod flights;

use actix_web::{error, web, HttpRequest};

use crate::error::FlightError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(flights::health_check))
        .route("/api/map/initial", web::get().to(flights::initial_map_view))
        .service(web::scope("/api/flights").configure(flights::configure));
}

/// Handle query payload errors with the same body as lookup failures
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    FlightError::InvalidInput(format!("Invalid query: {}", err)).into()
}
