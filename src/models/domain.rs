use serde::{Deserialize, Serialize};

/// A resolved geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite components
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite() && lon.is_finite() {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Coordinate as read from an upstream payload, where either half may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawCoordinate {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl RawCoordinate {
    /// Returns the coordinate only when both halves are present and finite
    pub fn resolve(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
            _ => None,
        }
    }
}

/// Departure/arrival pair for a single flight.
///
/// Only constructible from two resolved coordinates, so every `FlightRoute`
/// in the system is fully plottable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightRoute {
    #[serde(rename = "flightNumber")]
    flight_number: String,
    departure: Coordinate,
    arrival: Coordinate,
}

impl FlightRoute {
    pub fn new(
        flight_number: impl Into<String>,
        departure: Coordinate,
        arrival: Coordinate,
    ) -> Option<Self> {
        if !departure.is_resolved() || !arrival.is_resolved() {
            return None;
        }

        Some(Self {
            flight_number: flight_number.into(),
            departure,
            arrival,
        })
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn departure(&self) -> Coordinate {
        self.departure
    }

    pub fn arrival(&self) -> Coordinate {
        self.arrival
    }
}

/// A flight number suggestion returned by the term search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    #[serde(rename = "flightNumber")]
    pub flight_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Upstream per-flight-day record, passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRecord(pub serde_json::Value);

impl StatusRecord {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Everything the map renderer needs to draw a resolved route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteView {
    pub center: Coordinate,
    pub zoom: u8,
    pub line: [Coordinate; 2],
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Camera position for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}
