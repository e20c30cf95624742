//! Integration tests for the dashboard API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use pulse_server::router::build_router;
use pulse_server::state::AppState;
use pulse_types::{CacheDocument, CorrelationPoint, MoodPoint, PricePoint, Symbol, VolumePoint};
use serde_json::Value;
use tower::ServiceExt;

fn tracked() -> Vec<Symbol> {
    vec![Symbol::from("SOL"), Symbol::from("DOT")]
}

/// Build a state whose cache holds one refresh worth of data.
async fn make_test_state() -> Arc<AppState> {
    let state = Arc::new(AppState::new(&tracked()));
    let now = Utc::now();

    let mut document = CacheDocument::empty(&tracked());
    document.price_history.insert(
        Symbol::from("SOL"),
        vec![
            PricePoint {
                timestamp: now - Duration::hours(2),
                price: 141.8,
            },
            PricePoint {
                timestamp: now - Duration::hours(1),
                price: 143.2,
            },
        ],
    );
    document.volume_history.insert(
        Symbol::from("SOL"),
        vec![VolumePoint {
            timestamp: now - Duration::hours(1),
            volume: 1.2e9,
        }],
    );
    document.moods.insert(
        Symbol::from("DOT"),
        vec![MoodPoint {
            timestamp: now - Duration::hours(3),
            mood: String::from("neutral"),
        }],
    );
    document.correlations = vec![CorrelationPoint {
        timestamp: now - Duration::hours(1),
        price_correlation: 0.82,
        volume_correlation: 0.44,
        market_cap_ratio: 12.7,
    }];
    document.latest_analysis = String::from("SOL outperforming DOT on volume.");

    state.replace(document).await;
    state
}

async fn body_to_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn index_returns_the_page_shell() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_to_bytes(response.into_body()).await).unwrap();
    assert!(body.contains("Pulse Dashboard"));
    assert!(body.contains("/api/current-data"));
    assert!(body.contains("SOL outperforming DOT on volume."));
}

#[tokio::test]
async fn current_data_returns_the_full_document() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/current-data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    // Every declared key is present.
    for key in [
        "price_history",
        "volume_history",
        "moods",
        "correlations",
        "latest_analysis",
    ] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }

    assert_eq!(json["price_history"]["SOL"].as_array().unwrap().len(), 2);
    // DOT has no prices in the window but its key still exists.
    assert_eq!(json["price_history"]["DOT"].as_array().unwrap().len(), 0);
    assert_eq!(json["moods"]["DOT"][0]["mood"], "neutral");
    assert_eq!(json["correlations"][0]["market_cap_ratio"], 12.7);
    assert_eq!(json["latest_analysis"], "SOL outperforming DOT on volume.");
}

#[tokio::test]
async fn snapshot_reads_are_idempotent_between_ticks() {
    let state = make_test_state().await;
    let router = build_router(state);

    let first = router
        .clone()
        .oneshot(
            Request::get("/api/current-data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let second = router
        .oneshot(
            Request::get("/api/current-data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let first_bytes = body_to_bytes(first.into_body()).await;
    let second_bytes = body_to_bytes(second.into_body()).await;
    assert_eq!(first_bytes, second_bytes);
}

#[tokio::test]
async fn empty_startup_cache_still_serves_every_key() {
    let state = Arc::new(AppState::new(&tracked()));
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/current-data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["latest_analysis"], "");
    assert!(json["price_history"].get("SOL").is_some());
    assert!(json["moods"].get("DOT").is_some());
}

#[tokio::test]
async fn unknown_routes_return_not_found() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
