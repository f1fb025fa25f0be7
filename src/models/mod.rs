// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinate, FlightRoute, MapView, RawCoordinate, RouteView, SearchCandidate, StatusRecord,
};
pub use requests::{SearchQuery, StatusQuery, DetailsQuery};
pub use responses::{SearchResponse, StatusResponse, DetailsResponse, HealthResponse, ErrorResponse};
