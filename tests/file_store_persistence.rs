//! File Store Persistence Tests
//!
//! Bookings written through the HTTP API must survive a restart:
//! - Records, ids and timestamps are identical after reopening
//! - Newest-first ordering is preserved
//! - Deletes and partial updates are persisted too

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use synergia_bookings::http_server::build_router;
use synergia_bookings::store::{BookingQuery, BookingStore, FileStore};

// =============================================================================
// Helper Functions
// =============================================================================

fn app_at(tmp: &TempDir) -> Router {
    let store = FileStore::open(tmp.path().join("bookings.json")).unwrap();
    build_router(Arc::new(store), &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_bookings_survive_restart() {
    let tmp = TempDir::new().unwrap();

    let before = {
        let app = app_at(&tmp);
        for (name, email) in [("Ann", "ann@x.com"), ("Bob", "bob@x.com"), ("Cy", "cy@x.com")] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/bookings",
                Some(json!({"name": name, "email": email, "event": "Synergia"})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (_, list) = send(&app, "GET", "/api/bookings", None).await;
        list["data"].clone()
    };

    let app = app_at(&tmp);
    let (status, after) = send(&app, "GET", "/api/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["data"], before);
    assert_eq!(after["data"][0]["name"], "Cy");
}

#[tokio::test]
async fn test_update_and_delete_persist() {
    let tmp = TempDir::new().unwrap();

    let (kept_id, gone_id) = {
        let app = app_at(&tmp);
        let (_, kept) = send(
            &app,
            "POST",
            "/api/bookings",
            Some(json!({"name": "Ann", "email": "ann@x.com", "event": "Synergia"})),
        )
        .await;
        let (_, gone) = send(
            &app,
            "POST",
            "/api/bookings",
            Some(json!({"name": "Bob", "email": "bob@x.com", "event": "Synergia"})),
        )
        .await;

        let kept_id = kept["data"]["id"].as_str().unwrap().to_string();
        let gone_id = gone["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/bookings/{kept_id}"),
            Some(json!({"ticketType": "vip"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", &format!("/api/bookings/{gone_id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        (kept_id, gone_id)
    };

    let store = FileStore::open(tmp.path().join("bookings.json")).unwrap();
    let all = store.find_many(&BookingQuery::all()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id.to_string(), kept_id);
    assert_eq!(all[0].ticket_type, "vip");

    let app = build_router(Arc::new(store), &[]);
    let (status, _) = send(&app, "GET", &format!("/api/bookings/{gone_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
