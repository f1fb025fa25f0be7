// Service exports
pub mod aerodatabox;
pub mod lookup;
pub mod sessions;

pub use aerodatabox::AeroDataBoxClient;
pub use lookup::FlightLookup;
pub use sessions::LookupSessions;
