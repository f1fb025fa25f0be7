use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for `GET /api/flights/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, message = "Missing 'flightNumber' query param"))]
    #[serde(default, alias = "flight_number", rename = "flightNumber")]
    pub flight_number: String,
}

/// Query for `GET /api/flights/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StatusQuery {
    #[validate(length(min = 1, message = "Need ?flightNo= and ?dateLocal="))]
    #[serde(default, alias = "flight_no", rename = "flightNo")]
    pub flight_no: String,
    #[validate(length(min = 1, message = "Need ?flightNo= and ?dateLocal="))]
    #[serde(default, alias = "date_local", rename = "dateLocal")]
    pub date_local: String,
}

/// Query for `GET /api/flights/details/{flight}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DetailsQuery {
    #[validate(length(min = 1, message = "Missing ?date=YYYY-MM-DD"))]
    #[serde(default)]
    pub date: String,
}
