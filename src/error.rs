use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Machine-distinguishable failure kind surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ConfigurationError,
    UpstreamUnavailable,
    CoverageError,
    MalformedResponse,
    NoRoute,
    IncompleteRoute,
    Superseded,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::ConfigurationError => "configuration_error",
            ErrorKind::UpstreamUnavailable => "upstream_unavailable",
            ErrorKind::CoverageError => "coverage_error",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::NoRoute => "no_route",
            ErrorKind::IncompleteRoute => "incomplete_route",
            ErrorKind::Superseded => "superseded",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by flight lookups
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("AERODATABOX_API_KEY not configured")]
    Configuration,

    #[error("AeroDataBox error: {status}")]
    UpstreamUnavailable { status: u16, detail: Option<String> },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Aggregator error: {status}, possibly out of coverage or invalid flight")]
    Coverage { status: u16, detail: Option<String> },

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("No route: {0}")]
    NoRoute(String),

    #[error("Incomplete route, missing {}", .missing.join(", "))]
    IncompleteRoute { missing: Vec<&'static str> },

    #[error("Lookup superseded by a newer request")]
    Superseded,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlightError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlightError::InvalidInput(_) => ErrorKind::InvalidInput,
            FlightError::Configuration => ErrorKind::ConfigurationError,
            FlightError::UpstreamUnavailable { .. } | FlightError::Transport(_) => {
                ErrorKind::UpstreamUnavailable
            }
            FlightError::Coverage { .. } => ErrorKind::CoverageError,
            FlightError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            FlightError::NoRoute(_) => ErrorKind::NoRoute,
            FlightError::IncompleteRoute { .. } => ErrorKind::IncompleteRoute,
            FlightError::Superseded => ErrorKind::Superseded,
            FlightError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Upstream HTTP status, when the failure came from a non-2xx response
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            FlightError::UpstreamUnavailable { status, .. }
            | FlightError::Coverage { status, .. } => Some(*status),
            FlightError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message shown to end users; one per kind
    pub fn user_message(&self) -> String {
        match self {
            FlightError::InvalidInput(msg) => msg.clone(),
            FlightError::Configuration => "Flight data service is not configured.".to_string(),
            FlightError::UpstreamUnavailable { status, .. } => {
                format!("Flight data service unavailable (status {}).", status)
            }
            FlightError::Transport(_) => "Could not reach the flight data service.".to_string(),
            FlightError::Coverage { .. } => {
                "Flight not found or aggregator coverage missing.".to_string()
            }
            FlightError::MalformedResponse(_) => {
                "Malformed response from the flight data service.".to_string()
            }
            FlightError::NoRoute(_) => {
                "No flights returned. Possibly out of coverage or invalid date.".to_string()
            }
            FlightError::IncompleteRoute { .. } => {
                "Could not parse lat/lon from aggregator response.".to_string()
            }
            FlightError::Superseded => "Lookup replaced by a newer search.".to_string(),
            FlightError::Internal(_) => "Unexpected internal error.".to_string(),
        }
    }
}

impl ResponseError for FlightError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidInput | ErrorKind::CoverageError => StatusCode::BAD_REQUEST,
            ErrorKind::NoRoute => StatusCode::NOT_FOUND,
            ErrorKind::IncompleteRoute => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Superseded => StatusCode::CONFLICT,
            ErrorKind::UpstreamUnavailable | ErrorKind::MalformedResponse => {
                StatusCode::BAD_GATEWAY
            }
            ErrorKind::ConfigurationError | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            error: self.kind().as_str().to_string(),
            message: self.user_message(),
            status_code: status.as_u16(),
        })
    }
}
