// Integration tests for Flight Lookup against a mocked AeroDataBox

use flight_lookup::config::UpstreamSettings;
use flight_lookup::core::geometry::midpoint;
use flight_lookup::services::{AeroDataBoxClient, FlightLookup};
use flight_lookup::{ErrorKind, FlightError};
use mockito::{Matcher, Server, ServerGuard};

const API_KEY: &str = "test_key";

fn lookup_for(server: &ServerGuard) -> FlightLookup {
    lookup_with_key(server, Some(API_KEY))
}

fn lookup_with_key(server: &ServerGuard, api_key: Option<&str>) -> FlightLookup {
    let settings = UpstreamSettings::with_base_url(server.url(), api_key.map(str::to_string));
    FlightLookup::new(AeroDataBoxClient::new(&settings).unwrap())
}

fn route_body(dep: (f64, f64), arr: (f64, f64)) -> String {
    format!(
        r#"{{"number":"AA 21","departure":{{"airport":{{"iata":"JFK","position":{{"latitude":{},"longitude":{}}}}}}},"arrival":{{"airport":{{"iata":"SFO","position":{{"latitude":{},"longitude":{}}}}}}}}}"#,
        dep.0, dep.1, arr.0, arr.1
    )
}

#[tokio::test]
async fn test_search_returns_candidates() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/flights/search/term")
        .match_query(Matcher::UrlEncoded("search".into(), "AA21".into()))
        .match_header("x-magicapi-key", API_KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"matches":[{"flightNumber":"AA21","description":"American Airlines flight 21"}]}"#)
        .create_async()
        .await;

    let candidates = lookup_for(&server).search_by_term("AA21").await.unwrap();

    mock.assert_async().await;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].flight_number, "AA21");
    assert_eq!(candidates[0].description.as_deref(), Some("American Airlines flight 21"));
}

#[tokio::test]
async fn test_search_without_matches_field_is_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/search/term")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"searchBy":"ZZ9"}"#)
        .create_async()
        .await;

    let candidates = lookup_for(&server).search_by_term("ZZ9").await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_search_preserves_upstream_order() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/search/term")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"matches":[{"flightNumber":"AA219"},{"flightNumber":"AA21"},{"flightNumber":"AA2100"}]}"#)
        .create_async()
        .await;

    let candidates = lookup_for(&server).search_by_term("AA21").await.unwrap();
    let numbers: Vec<&str> = candidates.iter().map(|c| c.flight_number.as_str()).collect();
    assert_eq!(numbers, vec!["AA219", "AA21", "AA2100"]);
}

#[tokio::test]
async fn test_search_blank_term_makes_no_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = lookup_for(&server).search_by_term("   ").await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_search_upstream_error_is_unavailable() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/search/term")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = lookup_for(&server).search_by_term("AA21").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    assert_eq!(err.upstream_status(), Some(500));
}

#[tokio::test]
async fn test_search_non_json_body_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/search/term")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = lookup_for(&server).search_by_term("AA21").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_missing_api_key_makes_no_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let lookup = lookup_with_key(&server, None);
    let search = lookup.search_by_term("AA21").await.unwrap_err();
    let details = lookup
        .details_by_flight_and_date("AA21", "2024-06-01")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(search.kind(), ErrorKind::ConfigurationError);
    assert_eq!(details.kind(), ErrorKind::ConfigurationError);
}

#[tokio::test]
async fn test_status_returns_records_as_is() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/flights/Number/AA123")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("dateLocal".into(), "2025-02-10".into()),
            Matcher::UrlEncoded("dateLocalRole".into(), "Both".into()),
            Matcher::UrlEncoded("withAircraftImage".into(), "false".into()),
            Matcher::UrlEncoded("withLocation".into(), "false".into()),
        ]))
        .match_header("x-magicapi-key", API_KEY)
        .with_status(200)
        .with_body(r#"[{"number":"AA 123","status":"Arrived"},{"number":"AA 123","status":"Expected"}]"#)
        .create_async()
        .await;

    let records = lookup_for(&server)
        .status_by_flight_and_date("AA123", "2025-02-10")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].as_value()["status"], "Arrived");
    assert_eq!(records[1].as_value()["status"], "Expected");
}

#[tokio::test]
async fn test_status_empty_date_makes_no_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = lookup_for(&server)
        .status_by_flight_and_date("AA123", "")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_status_400_is_coverage_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/Number/AA123")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"message":"Flight is out of coverage"}"#)
        .create_async()
        .await;

    let err = lookup_for(&server)
        .status_by_flight_and_date("AA123", "2025-02-10")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CoverageError);
    match err {
        FlightError::Coverage { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail.as_deref(), Some("Flight is out of coverage"));
        }
        other => panic!("expected Coverage, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_auth_failure_is_not_coverage() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/Number/AA123")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let err = lookup_for(&server)
        .status_by_flight_and_date("AA123", "2025-02-10")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn test_details_array_scenario() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/flights/flightNumber/AA21/2024-06-01")
        .match_header("x-magicapi-key", API_KEY)
        .with_status(200)
        .with_body(format!("[{}]", route_body((40.7128, -74.0060), (37.6213, -122.379))))
        .create_async()
        .await;

    let route = lookup_for(&server)
        .details_by_flight_and_date("AA21", "2024-06-01")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(route.flight_number(), "AA21");
    assert_eq!(route.departure().lat, 40.7128);
    assert_eq!(route.departure().lon, -74.0060);
    assert_eq!(route.arrival().lat, 37.6213);
    assert_eq!(route.arrival().lon, -122.379);

    let center = midpoint(&route);
    assert!((center.lat - 39.16705).abs() < 1e-6);
    assert!((center.lon - -98.1925).abs() < 1e-6);
}

#[tokio::test]
async fn test_details_object_and_array_agree() {
    let body = route_body((51.47, -0.4543), (40.6413, -73.7781));

    let mut server = Server::new_async().await;
    let _array = server
        .mock("GET", "/flights/flightNumber/BA117/2024-06-01")
        .with_status(200)
        .with_body(format!("[{}]", body))
        .create_async()
        .await;
    let _object = server
        .mock("GET", "/flights/flightNumber/BA117/2024-06-02")
        .with_status(200)
        .with_body(body.clone())
        .create_async()
        .await;

    let lookup = lookup_for(&server);
    let from_array = lookup.details_by_flight_and_date("BA117", "2024-06-01").await.unwrap();
    let from_object = lookup.details_by_flight_and_date("BA117", "2024-06-02").await.unwrap();

    assert_eq!(from_array, from_object);
}

#[tokio::test]
async fn test_details_uses_first_element_only() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/flightNumber/AA21/2024-06-01")
        .with_status(200)
        .with_body(format!(
            r#"[{}, {}, {{"broken": true}}]"#,
            route_body((1.0, 2.0), (3.0, 4.0)),
            route_body((50.0, 60.0), (70.0, 80.0))
        ))
        .create_async()
        .await;

    let route = lookup_for(&server)
        .details_by_flight_and_date("AA21", "2024-06-01")
        .await
        .unwrap();

    assert_eq!(route.departure().lat, 1.0);
    assert_eq!(route.arrival().lon, 4.0);
}

#[tokio::test]
async fn test_details_missing_coordinate_is_incomplete() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/flightNumber/AA21/2024-06-01")
        .with_status(200)
        .with_body(
            r#"{"departure":{"airport":{"position":{"latitude":40.7128,"longitude":-74.006}}},"arrival":{"airport":{"iata":"SFO"}}}"#,
        )
        .create_async()
        .await;

    let err = lookup_for(&server)
        .details_by_flight_and_date("AA21", "2024-06-01")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::IncompleteRoute);
}

#[tokio::test]
async fn test_details_unusable_shapes_are_no_route() {
    let mut server = Server::new_async().await;
    let _empty = server
        .mock("GET", "/flights/flightNumber/AA21/2024-06-01")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let _null = server
        .mock("GET", "/flights/flightNumber/AA21/2024-06-02")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let lookup = lookup_for(&server);
    let empty = lookup.details_by_flight_and_date("AA21", "2024-06-01").await.unwrap_err();
    let null = lookup.details_by_flight_and_date("AA21", "2024-06-02").await.unwrap_err();

    assert_eq!(empty.kind(), ErrorKind::NoRoute);
    assert_eq!(null.kind(), ErrorKind::NoRoute);
}

#[tokio::test]
async fn test_details_upstream_error_is_not_coverage() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/flights/flightNumber/AA21/2024-06-01")
        .with_status(400)
        .create_async()
        .await;

    let err = lookup_for(&server)
        .details_by_flight_and_date("AA21", "2024-06-01")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    assert_eq!(err.upstream_status(), Some(400));
}
