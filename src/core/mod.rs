// Core algorithm exports
pub mod geometry;
pub mod normalize;

pub use geometry::{
    display_zoom, haversine_distance, initial_view, line_feature, line_geometry, midpoint,
    route_view,
};
pub use normalize::{
    extract_route, normalize_route, parse_candidates, route_from_status, DetailPayload, Leg,
};
