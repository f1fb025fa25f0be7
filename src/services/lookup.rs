use crate::core::normalize::{normalize_route, parse_candidates, DetailPayload};
use crate::error::FlightError;
use crate::models::{FlightRoute, SearchCandidate, StatusRecord};
use crate::services::aerodatabox::AeroDataBoxClient;

/// Status codes from the status endpoint that are not coverage problems
const NON_COVERAGE_STATUSES: [u16; 3] = [401, 403, 429];

/// Flight lookups against AeroDataBox
///
/// Each operation validates its inputs, makes exactly one upstream call and
/// normalizes the result. No state is kept between calls.
pub struct FlightLookup {
    upstream: AeroDataBoxClient,
}

impl FlightLookup {
    pub fn new(upstream: AeroDataBoxClient) -> Self {
        Self { upstream }
    }

    /// Resolve a partial flight number to candidate flights, in upstream order
    pub async fn search_by_term(&self, term: &str) -> Result<Vec<SearchCandidate>, FlightError> {
        let term = required(term, "Missing 'flightNumber' query param")?;

        let body = self.upstream.get_json(&self.upstream.search_url(term)).await?;
        let candidates = parse_candidates(&body);

        tracing::info!("Search '{}' returned {} candidates", term, candidates.len());
        Ok(candidates)
    }

    /// Raw per-day records for an exact flight and local date.
    ///
    /// A non-2xx answer from this endpoint means the flight is out of
    /// coverage or invalid, except for credential and rate-limit statuses.
    pub async fn status_by_flight_and_date(
        &self,
        flight_no: &str,
        date_local: &str,
    ) -> Result<Vec<StatusRecord>, FlightError> {
        let flight_no = required(flight_no, "Need ?flightNo= and ?dateLocal=")?;
        let date_local = required(date_local, "Need ?flightNo= and ?dateLocal=")?;

        let url = self.upstream.status_url(flight_no, date_local);
        let body = self.upstream.get_json(&url).await.map_err(|e| match e {
            FlightError::UpstreamUnavailable { status, detail }
                if !NON_COVERAGE_STATUSES.contains(&status) =>
            {
                tracing::warn!(
                    "Status lookup for {} on {} out of coverage ({})",
                    flight_no,
                    date_local,
                    status
                );
                FlightError::Coverage { status, detail }
            }
            other => other,
        })?;

        let records = DetailPayload::from(body).into_records()?;

        tracing::info!(
            "Status for {} on {} returned {} records",
            flight_no,
            date_local,
            records.len()
        );
        Ok(records)
    }

    /// Departure/arrival coordinates for an exact flight and local date
    pub async fn details_by_flight_and_date(
        &self,
        flight_no: &str,
        date_local: &str,
    ) -> Result<FlightRoute, FlightError> {
        let flight_no = required(flight_no, "Missing flight param")?;
        let date_local = required(date_local, "Missing ?date=YYYY-MM-DD")?;

        let url = self.upstream.details_url(flight_no, date_local);
        let payload = DetailPayload::from(self.upstream.get_json(&url).await?);

        let route = normalize_route(flight_no, &payload).map_err(|e| {
            tracing::warn!("Could not normalize route for {} on {}: {}", flight_no, date_local, e);
            e
        })?;

        tracing::info!("Resolved route for {} on {}", flight_no, date_local);
        Ok(route)
    }
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, FlightError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FlightError::InvalidInput(message.to_string()))
    } else {
        Ok(trimmed)
    }
}
