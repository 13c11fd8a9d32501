//! Fetcher against a local stand-in for the station API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use tempest_gateway::upstream::{build_url, ObservationSource, UpstreamClient};

#[derive(Deserialize)]
struct KeyQuery {
    api_key: String,
}

async fn observations(Path(station): Path<String>, Query(q): Query<KeyQuery>) -> impl IntoResponse {
    if q.api_key != "good-key" {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "status": { "status_code": 401 } })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "station_id": station,
            "ob_fields": ["air_temp", "rh"],
            "obs": [[72.5, 40]],
            "units": { "units_temp": "f" }
        })),
    )
}

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/obs/:station", get(observations))
        .route("/garbage/:station", get(|| async { "<html>not json</html>" }))
        .route(
            "/slow/:station",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, path: &str, key: &str, timeout: Duration) -> UpstreamClient {
    let template = format!("http://{addr}/{path}/{{station_id}}?api_key={{api_key}}");
    UpstreamClient::new(&template, key, "4242", timeout).unwrap()
}

#[test]
fn url_template_substitution() {
    let url = build_url(
        "https://api.example/stn/{station_id}?x=1&api_key={api_key}",
        "abc",
        "77",
    );
    assert_eq!(url, "https://api.example/stn/77?x=1&api_key=abc");
}

#[test]
fn logged_url_masks_the_key() {
    let c = UpstreamClient::new("https://h/{station_id}?api_key={api_key}", "s3cret", "9", Duration::from_secs(1)).unwrap();
    assert_eq!(c.log_url(), "https://h/9?api_key=***");
}

#[tokio::test]
async fn fetch_decodes_station_response() {
    let addr = spawn_upstream().await;
    let raw = client(addr, "obs", "good-key", Duration::from_secs(10)).fetch().await.unwrap();

    let names: Vec<_> = raw.field_names().collect();
    assert_eq!(names, vec![Some("air_temp"), Some("rh")]);
    assert_eq!(raw.newest_row().unwrap().len(), 2);
    assert!(raw.units.is_some());
}

#[tokio::test]
async fn non_2xx_is_upstream_status() {
    let addr = spawn_upstream().await;
    let err = client(addr, "obs", "bad-key", Duration::from_secs(10)).fetch().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "UPSTREAM_STATUS");
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let addr = spawn_upstream().await;
    let err = client(addr, "garbage", "good-key", Duration::from_secs(10)).fetch().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "MALFORMED_RESPONSE");
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let addr = spawn_upstream().await;
    let err = client(addr, "slow", "good-key", Duration::from_millis(200)).fetch().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "FETCH_FAILED");
    assert!(!err.to_string().contains("good-key"));
}

#[tokio::test]
async fn unreachable_upstream_is_fetch_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, "obs", "good-key", Duration::from_secs(2)).fetch().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "FETCH_FAILED");
    assert!(!err.to_string().contains("good-key"));
}
