//! Integration tests for the full submit cycle.
//!
//! These drive a RecommenderView backed by the real HTTP client against a
//! mock recommendation service bound to a random local port.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use mood_client::{ClientConfig, HttpRecommendationClient};
use recommender_view::{
    BodyView, GENERIC_FAILURE_MESSAGE, Phase, RecommenderView, ResultContent, Settled,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn start_mock_service(router: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("Failed to get local address");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock service failed");
    });

    (format!("http://{}", addr), handle)
}

fn view_for(addr: &str) -> RecommenderView {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let client = HttpRecommendationClient::new(&ClientConfig {
        base_url: addr.to_string(),
        timeout: Some(Duration::from_secs(5)),
    })
    .expect("Failed to build client");
    RecommenderView::new(Arc::new(client))
}

/// Slow for "slow" input, instant otherwise; the emotion tells them apart.
async fn mood_by_text(Json(payload): Json<Value>) -> Json<Value> {
    let text = payload["user_text"].as_str().unwrap_or_default().to_string();
    if text == "slow" {
        tokio::time::sleep(Duration::from_millis(300)).await;
        return Json(json!({"emotion": "sad", "recommendations": [{"title": "Old", "artist": "X"}]}));
    }
    Json(json!({
        "emotion": "happy",
        "recommendations": [
            {"title": "A", "artist": "Artist A"},
            {"title": "B", "artist": "Artist B"},
            {"title": "C", "artist": "Artist C"}
        ]
    }))
}

#[tokio::test]
async fn test_success_renders_songs_in_server_order() {
    let (addr, handle) = start_mock_service(Router::new().route("/recommend", post(mood_by_text))).await;
    let mut view = view_for(&addr);

    view.set_user_text("sunny morning");
    view.submit().expect("submit rejected");
    assert_eq!(view.wait_until_settled().await, Phase::Success);

    let BodyView::Result(result) = view.render().body else {
        panic!("Expected a result view");
    };
    assert_eq!(result.badge.heading(), "Detected Mood: Happy");
    let ResultContent::Songs(rows) = result.content else {
        panic!("Expected song rows");
    };
    let headings: Vec<String> = rows.iter().map(|r| r.heading()).collect();
    assert_eq!(headings, vec!["1. A", "2. B", "3. C"]);

    handle.abort();
}

#[tokio::test]
async fn test_server_error_and_network_error_look_the_same() {
    let router = Router::new().route(
        "/recommend",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"}))) }),
    );
    let (addr, handle) = start_mock_service(router).await;
    let mut server_view = view_for(&addr);

    // Nothing listens on a port we just released
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let mut network_view = view_for(&dead_addr);

    for view in [&mut server_view, &mut network_view] {
        view.set_user_text("anything");
        view.submit().expect("submit rejected");
        assert_eq!(view.wait_until_settled().await, Phase::Failure);
        assert!(!view.state().loading());
        assert!(view.state().result().is_none());
    }

    assert_eq!(server_view.render().body, network_view.render().body);
    assert_eq!(
        server_view.render().body,
        BodyView::Error { message: GENERIC_FAILURE_MESSAGE.to_string() }
    );

    handle.abort();
}

#[tokio::test]
async fn test_response_without_emotion_is_a_failure() {
    let router = Router::new().route(
        "/recommend",
        post(|| async { Json(json!({"recommendations": [{"title": "A", "artist": "B"}]})) }),
    );
    let (addr, handle) = start_mock_service(router).await;
    let mut view = view_for(&addr);

    view.set_user_text("meh");
    view.submit().unwrap();
    assert_eq!(view.wait_until_settled().await, Phase::Failure);

    handle.abort();
}

#[tokio::test]
async fn test_late_response_from_superseded_submission_is_ignored() {
    let (addr, handle) = start_mock_service(Router::new().route("/recommend", post(mood_by_text))).await;
    let mut view = view_for(&addr);

    view.set_user_text("slow");
    let first = view.submit().unwrap();
    view.set_user_text("fast");
    let second = view.submit().unwrap();
    assert!(second > first);

    // The fast one settles the view
    assert_eq!(view.wait_until_settled().await, Phase::Success);
    assert_eq!(view.state().result().unwrap().emotion, "happy");

    // The slow one arrives later and is dropped
    let late = tokio::time::timeout(Duration::from_secs(5), view.next_event())
        .await
        .expect("slow response never arrived");
    assert_eq!(late, Some(Settled::Stale));
    assert_eq!(view.state().result().unwrap().emotion, "happy");

    handle.abort();
}
