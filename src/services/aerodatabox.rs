use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::UpstreamSettings;
use crate::error::FlightError;

/// Endpoint family, which decides the base URL used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    SearchTerm,
    StatusByNumber,
    DetailsByNumber,
}

/// AeroDataBox API client
///
/// Issues authenticated GETs against the three endpoint families and
/// classifies failures:
/// - no credential configured: `Configuration`, nothing is sent
/// - non-2xx: `UpstreamUnavailable` carrying the status code
/// - 2xx with a body that is not JSON: `MalformedResponse`
///
/// Nothing is retried.
pub struct AeroDataBoxClient {
    base_url: String,
    status_base_url: String,
    api_key: Option<String>,
    api_key_header: String,
    client: Client,
}

impl AeroDataBoxClient {
    /// Create a new client from upstream settings
    pub fn new(settings: &UpstreamSettings) -> Result<Self, FlightError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            status_base_url: settings.status_base_url.trim_end_matches('/').to_string(),
            api_key: settings
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
            api_key_header: settings.api_key_header.clone(),
            client,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn base_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::StatusByNumber => &self.status_base_url,
            Endpoint::SearchTerm | Endpoint::DetailsByNumber => &self.base_url,
        }
    }

    /// `GET /flights/search/term?search={term}`
    pub fn search_url(&self, term: &str) -> String {
        format!(
            "{}/flights/search/term?search={}",
            self.base_for(Endpoint::SearchTerm),
            urlencoding::encode(term)
        )
    }

    /// `GET /flights/Number/{flightNo}?dateLocal={date}&dateLocalRole=Both&...`
    pub fn status_url(&self, flight_no: &str, date_local: &str) -> String {
        format!(
            "{}/flights/Number/{}?dateLocal={}&dateLocalRole=Both&withAircraftImage=false&withLocation=false",
            self.base_for(Endpoint::StatusByNumber),
            urlencoding::encode(flight_no),
            urlencoding::encode(date_local)
        )
    }

    /// `GET /flights/flightNumber/{flightNo}/{dateLocal}`
    pub fn details_url(&self, flight_no: &str, date_local: &str) -> String {
        format!(
            "{}/flights/flightNumber/{}/{}",
            self.base_for(Endpoint::DetailsByNumber),
            urlencoding::encode(flight_no),
            urlencoding::encode(date_local)
        )
    }

    /// Issue one GET and parse the body as JSON
    pub async fn get_json(&self, url: &str) -> Result<Value, FlightError> {
        let api_key = self.api_key.as_deref().ok_or(FlightError::Configuration)?;

        tracing::debug!("AeroDataBox GET {}", url);

        let response = self
            .client
            .get(url)
            .header(self.api_key_header.as_str(), api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("AeroDataBox returned {} for {}", status, url);
            return Err(FlightError::UpstreamUnavailable {
                status: status.as_u16(),
                detail: upstream_message(&body),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| FlightError::MalformedResponse(format!("body is not JSON: {}", e)))
    }
}

/// Pull a human-readable message out of an upstream error body, if it has one
fn upstream_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .or_else(|| json.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
