use serde_json::{json, Value};

use crate::models::{Coordinate, FlightRoute, MapView, RouteView};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Zoom level used once a route is resolved
pub const ROUTE_ZOOM: u8 = 4;

/// Zoom level before any route is shown
pub const DEFAULT_ZOOM: u8 = 3;

/// Roughly the center of the contiguous United States
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 39.8283,
    lon: -98.5795,
};

/// Camera position before any route has been resolved
pub fn initial_view() -> MapView {
    MapView {
        center: DEFAULT_CENTER,
        zoom: DEFAULT_ZOOM,
    }
}

/// Planar midpoint of the route.
///
/// Latitude and longitude are averaged independently. This is a centering
/// heuristic for the map, not a great-circle midpoint, and it does not handle
/// routes crossing the antimeridian.
pub fn midpoint(route: &FlightRoute) -> Coordinate {
    let dep = route.departure();
    let arr = route.arrival();

    Coordinate {
        lat: (dep.lat + arr.lat) / 2.0,
        lon: (dep.lon + arr.lon) / 2.0,
    }
}

/// Display zoom for a resolved route. Not scaled by distance.
pub fn display_zoom(_route: &FlightRoute) -> u8 {
    ROUTE_ZOOM
}

/// Two-point path, departure first
pub fn line_geometry(route: &FlightRoute) -> [Coordinate; 2] {
    [route.departure(), route.arrival()]
}

/// The route line as a GeoJSON Feature; positions are `[lon, lat]`
pub fn line_feature(route: &FlightRoute) -> Value {
    let [dep, arr] = line_geometry(route);

    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": [[dep.lon, dep.lat], [arr.lon, arr.lat]],
        },
        "properties": {
            "flightNumber": route.flight_number(),
        },
    })
}

/// Calculate the Haversine distance between two points in kilometers
#[inline]
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Everything the renderer needs for a resolved route
pub fn route_view(route: &FlightRoute) -> RouteView {
    RouteView {
        center: midpoint(route),
        zoom: display_zoom(route),
        line: line_geometry(route),
        distance_km: haversine_distance(route.departure(), route.arrival()),
    }
}
