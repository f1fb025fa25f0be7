use serde::Serialize;
use crate::models::domain::{FlightRoute, RouteView, SearchCandidate, StatusRecord};
use serde_json::Value;

/// Response for the term search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchCandidate>,
}

/// Response for the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub data: Vec<StatusRecord>,
    /// Route of the first record, when its coordinates resolve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<FlightRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<RouteView>,
}

/// Response for the details endpoint
#[derive(Debug, Clone, Serialize)]
pub struct DetailsResponse {
    pub success: bool,
    #[serde(rename = "flightData")]
    pub flight_data: FlightRoute,
    pub view: RouteView,
    /// GeoJSON Feature of the route line
    pub line: Value,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
