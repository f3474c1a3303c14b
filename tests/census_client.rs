// Census client tests against a mock HTTP server

use mockito::{Matcher, Server};
use swipeheist::config::CensusSettings;
use swipeheist::services::{CensusClient, CensusError};
use swipeheist::StateCode;

const ARIZONA_BODY: &str = r#"[
    ["NAME","B01003_001E","B19013_001E","state","place"],
    ["Sedona CDP, Arizona","9684","75520","04","65350"],
    ["Flagstaff city, Arizona","76989","67236","04","23620"],
    ["Ghost CDP, Arizona","0","-666666666","04","99999"],
    ["Page city, Arizona","7440",null,"04","52930"]
]"#;

fn client_for(server: &Server, api_key: Option<&str>) -> CensusClient {
    CensusClient::new(CensusSettings {
        endpoint: server.url(),
        api_key: api_key.map(str::to_string),
        timeout_secs: 5,
        ..CensusSettings::default()
    })
    .unwrap()
}

fn arizona_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("get".into(), "NAME,B01003_001E,B19013_001E".into()),
        Matcher::UrlEncoded("for".into(), "place:*".into()),
        Matcher::UrlEncoded("in".into(), "state:04".into()),
    ])
}

#[test]
fn test_fetch_state_places_normalizes_rows() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/data/2022/acs/acs5")
        .match_query(arizona_query())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ARIZONA_BODY)
        .create();

    let client = client_for(&server, None);
    let places = tokio_test::block_on(client.fetch_state_places(StateCode::AZ)).unwrap();

    mock.assert();
    assert_eq!(places.len(), 3);
    assert_eq!(places[0].display_name, "Sedona");
    assert_eq!(places[0].population, 9684);
    assert_eq!(places[0].median_household_income, Some(75520));
    assert_eq!(places[1].display_name, "Flagstaff");
    assert_eq!(places[2].display_name, "Page");
    assert_eq!(places[2].median_household_income, None);
}

#[test]
fn test_fetch_sends_api_key() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/data/2022/acs/acs5")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("in".into(), "state:04".into()),
            Matcher::UrlEncoded("key".into(), "secret".into()),
        ]))
        .with_status(200)
        .with_body(ARIZONA_BODY)
        .create();

    let client = client_for(&server, Some("secret"));
    let places = tokio_test::block_on(client.fetch_state_places(StateCode::AZ)).unwrap();

    mock.assert();
    assert_eq!(places.len(), 3);
}

#[test]
fn test_non_success_status_is_reported() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/data/2022/acs/acs5")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("Service Unavailable")
        .create();

    let client = client_for(&server, None);
    let err = tokio_test::block_on(client.fetch_state_places(StateCode::AZ)).unwrap_err();

    assert!(matches!(err, CensusError::Status(503)));
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.to_string(), "Census API error: 503");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2022/acs/acs5")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("error: unknown variable 'B19013_001X'")
        .create_async()
        .await;

    let client = client_for(&server, None);
    let err = client.fetch_state_places(StateCode::AZ).await.unwrap_err();

    assert!(matches!(err, CensusError::Parse(_)));
}

#[test]
fn test_empty_body_is_parse_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/data/2022/acs/acs5")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("")
        .create();

    let client = client_for(&server, None);
    let err = tokio_test::block_on(client.fetch_state_places(StateCode::AZ)).unwrap_err();

    assert!(matches!(err, CensusError::Parse(_)));
}
