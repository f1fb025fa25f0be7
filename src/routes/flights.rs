use actix_web::{web, HttpRequest, HttpResponse};
use std::future::Future;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::core::geometry::{initial_view, line_feature, route_view};
use crate::core::normalize::route_from_status;
use crate::error::FlightError;
use crate::models::{
    DetailsQuery, DetailsResponse, HealthResponse, SearchQuery, SearchResponse, StatusQuery,
    StatusResponse,
};
use crate::services::{FlightLookup, LookupSessions};

/// Header identifying a client session for lookup cancellation
pub const SESSION_HEADER: &str = "x-session-id";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<FlightLookup>,
    pub sessions: Arc<LookupSessions>,
}

impl AppState {
    pub fn new(lookup: FlightLookup) -> Self {
        Self {
            lookup: Arc::new(lookup),
            sessions: Arc::new(LookupSessions::new()),
        }
    }
}

/// Configure all flight routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/search", web::get().to(search_flights))
        .route("/status", web::get().to(flight_status))
        .route("/details/{flight}", web::get().to(flight_details));
}

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search flight numbers by term
///
/// GET /api/flights/search?flightNumber=AA21
async fn search_flights(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, FlightError> {
    let query = query.into_inner();
    query.validate().map_err(invalid_input)?;

    let term = query.flight_number;
    let results = dispatch(&state, &req, move |lookup| async move {
        lookup.search_by_term(&term).await
    })
    .await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        success: true,
        results,
    }))
}

/// Flight status for an exact flight number and local date
///
/// GET /api/flights/status?flightNo=AA123&dateLocal=2025-02-10
async fn flight_status(
    state: web::Data<AppState>,
    query: web::Query<StatusQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, FlightError> {
    let query = query.into_inner();
    query.validate().map_err(invalid_input)?;

    let StatusQuery { flight_no, date_local } = query;
    let number = flight_no.clone();
    let data = dispatch(&state, &req, move |lookup| async move {
        lookup.status_by_flight_and_date(&number, &date_local).await
    })
    .await?;

    let route = match route_from_status(&flight_no, &data) {
        Ok(route) => Some(route),
        Err(e) => {
            tracing::debug!("No plottable route in status for {}: {}", flight_no, e);
            None
        }
    };
    let view = route.as_ref().map(route_view);

    Ok(HttpResponse::Ok().json(StatusResponse {
        success: true,
        data,
        route,
        view,
    }))
}

/// Departure and arrival coordinates for a flight on a date
///
/// GET /api/flights/details/AA21?date=2024-06-01
async fn flight_details(
    state: web::Data<AppState>,
    flight: web::Path<String>,
    query: web::Query<DetailsQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, FlightError> {
    let query = query.into_inner();
    query.validate().map_err(invalid_input)?;

    let flight = flight.into_inner();
    let date = query.date;
    let route = dispatch(&state, &req, move |lookup| async move {
        lookup.details_by_flight_and_date(&flight, &date).await
    })
    .await?;

    let view = route_view(&route);
    let line = line_feature(&route);
    Ok(HttpResponse::Ok().json(DetailsResponse {
        success: true,
        flight_data: route,
        view,
        line,
    }))
}

/// Camera position before any route is shown
///
/// GET /api/map/initial
pub async fn initial_map_view() -> HttpResponse {
    HttpResponse::Ok().json(initial_view())
}

/// Run a lookup, registered under the caller's session when one is given
async fn dispatch<F, Fut, T>(state: &AppState, req: &HttpRequest, op: F) -> Result<T, FlightError>
where
    F: FnOnce(Arc<FlightLookup>) -> Fut,
    Fut: Future<Output = Result<T, FlightError>> + Send + 'static,
    T: Send + 'static,
{
    let lookup = state.lookup.clone();
    let session = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match session {
        Some(session) => state.sessions.run(session, op(lookup)).await,
        None => op(lookup).await,
    }
}

fn invalid_input(errors: ValidationErrors) -> FlightError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string());

    tracing::info!("Rejected request: {}", message);
    FlightError::InvalidInput(message)
}
