//! Flight Lookup - flight search and route normalization over AeroDataBox
//!
//! Resolves partial flight numbers to candidates, fetches status and details
//! for an exact flight and date, and normalizes the upstream's varying
//! response shapes into a single plottable route.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::geometry::{midpoint, display_zoom, line_geometry, route_view};
pub use crate::core::normalize::DetailPayload;
pub use error::{ErrorKind, FlightError};
pub use models::{Coordinate, FlightRoute, SearchCandidate, StatusRecord, RouteView};
pub use services::{AeroDataBoxClient, FlightLookup, LookupSessions};
