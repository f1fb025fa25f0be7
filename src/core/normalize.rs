use serde_json::Value;

use crate::error::FlightError;
use crate::models::{FlightRoute, RawCoordinate, SearchCandidate, StatusRecord};

/// Shape of an upstream flight payload, decided once at the parsing boundary.
///
/// AeroDataBox answers the same endpoint with either one flight object or a
/// list of flight-day objects depending on the account tier.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPayload {
    /// A single flight object (always a JSON object)
    Single(Value),
    /// A list of flight-day records, possibly empty
    Many(Vec<Value>),
    /// Null or a scalar
    Unrecognized,
}

impl From<Value> for DetailPayload {
    fn from(body: Value) -> Self {
        match body {
            Value::Array(items) => DetailPayload::Many(items),
            obj @ Value::Object(_) => DetailPayload::Single(obj),
            _ => DetailPayload::Unrecognized,
        }
    }
}

impl DetailPayload {
    /// The authoritative record: the object itself, or the first list element
    pub fn primary(&self) -> Result<&Value, FlightError> {
        match self {
            DetailPayload::Single(record) => Ok(record),
            DetailPayload::Many(items) => match items.first() {
                Some(record) if record.is_object() => Ok(record),
                Some(_) => Err(FlightError::NoRoute(
                    "first flight record is not an object".into(),
                )),
                None => Err(FlightError::NoRoute("upstream returned no flights".into())),
            },
            DetailPayload::Unrecognized => Err(FlightError::NoRoute(
                "unrecognized payload shape".into(),
            )),
        }
    }

    /// All records carried by the payload, in upstream order
    pub fn into_records(self) -> Result<Vec<StatusRecord>, FlightError> {
        match self {
            DetailPayload::Single(record) => Ok(vec![StatusRecord(record)]),
            DetailPayload::Many(items) => Ok(items.into_iter().map(StatusRecord).collect()),
            DetailPayload::Unrecognized => Err(FlightError::MalformedResponse(
                "expected an array of flight records".into(),
            )),
        }
    }
}

/// Which end of the flight a coordinate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Departure,
    Arrival,
}

impl Leg {
    fn key(self) -> &'static str {
        match self {
            Leg::Departure => "departure",
            Leg::Arrival => "arrival",
        }
    }

    fn field_names(self) -> (&'static str, &'static str) {
        match self {
            Leg::Departure => ("departure.latitude", "departure.longitude"),
            Leg::Arrival => ("arrival.latitude", "arrival.longitude"),
        }
    }
}

/// Read one leg's coordinate from a flight record.
///
/// `airport.position.{latitude,longitude}` is the primary path; status records
/// may instead carry `airport.location.{lat,lon}`.
pub fn leg_coordinate(record: &Value, leg: Leg) -> RawCoordinate {
    let airport = record.get(leg.key()).and_then(|l| l.get("airport"));

    let read = |container: &str, lat_key: &str, lon_key: &str| {
        let node = airport.and_then(|a| a.get(container));
        RawCoordinate {
            lat: node.and_then(|n| n.get(lat_key)).and_then(Value::as_f64),
            lon: node.and_then(|n| n.get(lon_key)).and_then(Value::as_f64),
        }
    };

    let position = read("position", "latitude", "longitude");
    if position.resolve().is_some() {
        return position;
    }

    let location = read("location", "lat", "lon");
    if location.resolve().is_some() {
        location
    } else {
        position
    }
}

/// Extract a fully resolved route from a single flight record.
///
/// All four values must be present and finite; anything less is
/// `IncompleteRoute`, never a partial route.
pub fn extract_route(flight_number: &str, record: &Value) -> Result<FlightRoute, FlightError> {
    let departure = leg_coordinate(record, Leg::Departure);
    let arrival = leg_coordinate(record, Leg::Arrival);

    let mut missing = Vec::new();
    for (leg, raw) in [(Leg::Departure, departure), (Leg::Arrival, arrival)] {
        let (lat_name, lon_name) = leg.field_names();
        if !raw.lat.is_some_and(f64::is_finite) {
            missing.push(lat_name);
        }
        if !raw.lon.is_some_and(f64::is_finite) {
            missing.push(lon_name);
        }
    }

    match (departure.resolve(), arrival.resolve()) {
        (Some(dep), Some(arr)) if missing.is_empty() => {
            FlightRoute::new(flight_number, dep, arr)
                .ok_or(FlightError::IncompleteRoute { missing })
        }
        _ => Err(FlightError::IncompleteRoute { missing }),
    }
}

/// Normalize a details payload of either shape into a `FlightRoute`
pub fn normalize_route(
    flight_number: &str,
    payload: &DetailPayload,
) -> Result<FlightRoute, FlightError> {
    let record = payload.primary()?;
    extract_route(flight_number, record)
}

/// Build a route from the first of a list of status records
pub fn route_from_status(
    flight_number: &str,
    records: &[StatusRecord],
) -> Result<FlightRoute, FlightError> {
    let first = records.first().ok_or_else(|| {
        FlightError::NoRoute("no flights returned for this flight and date".into())
    })?;

    if !first.as_value().is_object() {
        return Err(FlightError::NoRoute("first flight record is not an object".into()));
    }

    extract_route(flight_number, first.as_value())
}

/// Pull search candidates out of a term-search body.
///
/// A missing or non-array `matches` field means no matches. Entries without a
/// string `flightNumber` are skipped; upstream order is kept.
pub fn parse_candidates(body: &Value) -> Vec<SearchCandidate> {
    let Some(matches) = body.get("matches").and_then(Value::as_array) else {
        return Vec::new();
    };

    matches
        .iter()
        .filter_map(|entry| {
            let flight_number = entry.get("flightNumber")?.as_str()?;
            Some(SearchCandidate {
                flight_number: flight_number.to_string(),
                description: entry
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect()
}
