mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use cityscope::config::Config;
use common::{StubProvider, Stubs};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app(stubs: &Stubs) -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;

    let state = cityscope::api::create_app_state_with_providers(config, stubs.providers(), None)
        .await
        .expect("Failed to create app state");
    cityscope::api::router(state).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_location_endpoint() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/location?data=Seattle%2C%20WA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_query"], "Seattle, WA");
    assert_eq!(body["formatted_query"], "Seattle, WA, USA");
    assert_eq!(body["latitude"], 47.606_209);
    assert!(body["id"].is_number());
    assert!(body.get("success").is_none());

    let (status, again) = get(&app, "/location?data=Seattle%2C%20WA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again, body);
    assert_eq!(stubs.geocode.calls(), 1);
}

#[tokio::test]
async fn test_location_requires_query() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/location").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = get(&app, "/location?data=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(stubs.geocode.calls(), 0);
}

#[tokio::test]
async fn test_location_not_found() {
    let stubs = Stubs {
        geocode: StubProvider::ok(json!({ "status": "ZERO_RESULTS", "results": [] })),
        ..Stubs::default()
    };
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/location?data=Atlantis").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn test_provider_failures_map_to_server_errors() {
    let stubs = Stubs {
        geocode: StubProvider::failing("OVER_QUERY_LIMIT"),
        movies: StubProvider::ok(json!({ "page": 1 })),
        ..Stubs::default()
    };
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/location?data=Seattle").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An internal error occurred");

    let (status, body) = get(&app, "/movies?data=Seattle").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_weather_endpoint_accepts_both_key_styles() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (_, location) = get(&app, "/location?data=Seattle").await;
    let id = location["id"].as_i64().unwrap();

    let (status, body) = get(
        &app,
        &format!("/weather?id={id}&latitude=47.6&longitude=-122.3"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["time"], "Mon Jan 01 2024");
    assert!(days[0].get("location_id").is_none());

    let (status, cached) = get(
        &app,
        &format!("/weather?data%5Bid%5D={id}&data%5Blatitude%5D=47.6&data%5Blongitude%5D=-122.3"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cached, body);
    assert_eq!(stubs.forecast.calls(), 1);
}

#[tokio::test]
async fn test_weather_rejects_bad_parameters() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    for uri in [
        "/weather?latitude=47.6&longitude=-122.3",
        "/weather?id=abc&latitude=47.6&longitude=-122.3",
        "/weather?id=1&latitude=200&longitude=-122.3",
        "/weather?id=1",
    ] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
    assert_eq!(stubs.forecast.calls(), 0);
}

#[tokio::test]
async fn test_weather_for_unknown_location_is_not_found() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/weather?id=42&latitude=47.6&longitude=-122.3").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("42"));
    assert_eq!(stubs.forecast.calls(), 0);
}

#[tokio::test]
async fn test_resource_routes_are_not_under_api_prefix() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (status, _) = get(&app, "/api/location?data=Seattle").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(stubs.geocode.calls(), 0);
}

#[tokio::test]
async fn test_yelp_endpoint() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/yelp?latitude=47.6&longitude=-122.3").await;

    assert_eq!(status, StatusCode::OK);
    let businesses = body.as_array().unwrap();
    assert_eq!(businesses.len(), 2);
    assert_eq!(businesses[0]["name"], "Salumi");
    assert_eq!(businesses[0]["rating"], 4.5);
    assert!(businesses[1]["price"].is_null());
}

#[tokio::test]
async fn test_movies_endpoint() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/movies?data=Seattle").await;

    assert_eq!(status, StatusCode::OK);
    let movies = body.as_array().unwrap();
    assert_eq!(movies[0]["title"], "Sleepless in Seattle");
    assert_eq!(movies[0]["total_votes"], 1800);
    assert_eq!(
        movies[0]["image_url"],
        "https://image.tmdb.org/t/p/w200_and_h300_bestv2/sleepless.jpg"
    );
    assert!(movies[1]["image_url"].is_null());
}

#[tokio::test]
async fn test_health_endpoints() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/api/system/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = get(&app, "/api/system/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["checks"]["database"], true);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let (status, body) = get(&app, "/api/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("/api/does-not-exist"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let stubs = Stubs::default();
    let app = spawn_app(&stubs).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/system/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
