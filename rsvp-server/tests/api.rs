use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use rsvp_core::{Catalog, InMemoryLedger, NewEvent};
use rsvp_server::{app, state::AppState};
use serde_json::{Value, json};
use tower::ServiceExt;

fn builtin_app() -> Router {
    app(AppState::new(Catalog::builtin(), InMemoryLedger::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn rsvp(app: &Router, event_id: &str, address: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/events/{}/rsvp", event_id),
        Some(json!({ "userAddress": address })),
    )
    .await
}

async fn cached_count(app: &Router, event_id: &str) -> u64 {
    let (status, body) = send(app, Method::GET, &format!("/events/{}/rsvp", event_id), None).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["rsvpCount"].as_u64().unwrap()
}

#[tokio::test]
async fn rsvp_then_cancel_round_trips_count() {
    let app = builtin_app();
    let before = cached_count(&app, "art-show").await;

    let (status, body) = rsvp(&app, "art-show", "0xabc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());
    assert_eq!(body["data"]["eventId"], "art-show");
    assert_eq!(body["data"]["eventName"], "Onchain Summit Art Show");
    assert_eq!(body["data"]["newRsvpCount"], before + 1);
    assert_eq!(
        body["data"]["message"],
        "✅ You're RSVP'd for Onchain Summit Art Show!"
    );
    assert!(body["data"]["rsvpId"].as_str().unwrap().starts_with("rsvp_"));
    assert_eq!(cached_count(&app, "art-show").await, before + 1);

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/user/rsvps?userAddress=0xabc&eventId=art-show",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["newRsvpCount"], before);
    assert_eq!(cached_count(&app, "art-show").await, before);
}

#[tokio::test]
async fn rsvp_requires_address() {
    let app = builtin_app();

    let (status, body) = send(&app, Method::POST, "/events/art-show/rsvp", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "User address is required");
    assert!(body.get("data").is_none());

    let (status, _) = rsvp(&app, "art-show", "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rsvp_rejects_malformed_body() {
    let app = builtin_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/events/art-show/rsvp")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn rsvp_unknown_event_is_not_found() {
    let app = builtin_app();

    let (status, body) = rsvp(&app, "casino-night", "0xabc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Event not found");

    let (status, _) = send(&app, Method::GET, "/events/casino-night/rsvp", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_rsvp_is_rejected_case_insensitively() {
    let app = builtin_app();

    let (status, _) = rsvp(&app, "networking", "0xAbC").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = rsvp(&app, "networking", "0xabc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You have already RSVP'd to this event");
    assert_eq!(cached_count(&app, "networking").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_rsvps_record_once() {
    let app = builtin_app();

    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let app = app.clone();
            let address = if i % 2 == 0 { "0xABC" } else { "0xabc" };
            tokio::spawn(async move { rsvp(&app, "art-show", address).await })
        })
        .collect();

    let mut accepted = 0;
    for task in tasks {
        let (status, body) = task.await.unwrap();
        match status {
            StatusCode::OK => accepted += 1,
            StatusCode::BAD_REQUEST => {
                assert_eq!(body["error"], "You have already RSVP'd to this event")
            }
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(cached_count(&app, "art-show").await, 1);

    let (_, body) = send(&app, Method::GET, "/user/rsvps?userAddress=0xABC", None).await;
    assert_eq!(body["data"]["count"], 1);
}

#[tokio::test]
async fn rsvp_requires_json_content_type() {
    let app = builtin_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/events/art-show/rsvp")
        .body(Body::from(json!({ "userAddress": "0xabc" }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    assert_eq!(cached_count(&app, "art-show").await, 0);
}

#[tokio::test]
async fn list_events_with_stats() {
    let app = builtin_app();
    rsvp(&app, "art-show", "0x1").await;
    rsvp(&app, "art-show", "0x2").await;
    rsvp(&app, "dev-workshop", "0x1").await;

    let (status, body) = send(&app, Method::GET, "/events", None).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<_> = body["data"]["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        ids,
        vec!["art-show", "roor-osc-party", "dev-workshop", "networking", "panel-discussion"]
    );
    assert_eq!(body["data"]["events"][0]["rsvpCount"], 2);
    assert_eq!(body["data"]["stats"]["totalEvents"], 5);
    assert_eq!(body["data"]["stats"]["totalRSVPs"], 3);
}

#[tokio::test]
async fn create_event() {
    let app = builtin_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/events",
        Some(json!({
            "name": "OSC Casino Night",
            "date": "Saturday 7:00-11:00 PM",
            "description": "Casino Night hosted by Franco Finn",
            "link": "https://www.onchainsummit.io"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "osc-casino-night");
    assert_eq!(body["data"]["rsvpCount"], 0);

    let (status, _) = rsvp(&app, "osc-casino-night", "0xabc").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/events", None).await;
    assert_eq!(body["data"]["stats"]["totalEvents"], 6);
}

#[tokio::test]
async fn create_event_trims_fields_before_deriving_id() {
    let app = builtin_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/events",
        Some(json!({
            "name": "  Builder Breakfast ",
            "date": " Sunday 9:00 AM",
            "description": "Coffee with builders",
            "link": "https://www.onchainsummit.io"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "builder-breakfast");
    assert_eq!(body["data"]["name"], "Builder Breakfast");
    assert_eq!(body["data"]["date"], "Sunday 9:00 AM");
}

#[tokio::test]
async fn create_event_requires_all_fields() {
    let app = builtin_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/events",
        Some(json!({ "name": "Half an event", "date": "Friday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn popular_events_ranking() {
    let mut catalog = Catalog::new();
    for (name, count) in [
        ("Onchain Summit Art Show", 23),
        ("ROOR OSC Party", 45),
        ("Onchain Summit Happy Hour", 67),
        ("Onchain Summit Main Stage", 89),
        ("OSC Casino Night", 34),
    ] {
        let event = catalog.put(NewEvent {
            name: name.to_string(),
            date: "Saturday".to_string(),
            description: "Test".to_string(),
            link: "https://www.onchainsummit.io".to_string(),
        });
        catalog.set_rsvp_count(&event.id, count);
    }
    let app = app(AppState::new(catalog, InMemoryLedger::new()));

    let (status, body) = send(&app, Method::GET, "/events/popular", None).await;
    assert_eq!(status, StatusCode::OK);

    let top3: Vec<_> = body["data"]["top3Events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["rsvpCount"].as_u64().unwrap())
        .collect();
    assert_eq!(top3, vec![89, 67, 45]);
    assert_eq!(body["data"]["mostPopular"]["id"], "onchain-summit-main-stage");
    assert_eq!(body["data"]["popularEvents"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn popular_events_empty_catalog() {
    let app = app(AppState::new(Catalog::new(), InMemoryLedger::new()));

    let (status, body) = send(&app, Method::GET, "/events/popular", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["mostPopular"].is_null());
    assert!(body["data"]["top3Events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn user_rsvps_are_normalized() {
    let app = builtin_app();
    rsvp(&app, "art-show", "0xABC").await;
    rsvp(&app, "networking", "0xabc").await;
    rsvp(&app, "networking", "0xdef").await;

    let (status, body) = send(&app, Method::GET, "/user/rsvps?userAddress=0xAbc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);

    let rsvps = body["data"]["rsvps"].as_array().unwrap();
    assert_eq!(rsvps[0]["eventId"], "art-show");
    assert_eq!(rsvps[0]["userAddress"], "0xabc");
    assert_eq!(rsvps[0]["eventName"], "Onchain Summit Art Show");
    assert_eq!(rsvps[1]["eventId"], "networking");
}

#[tokio::test]
async fn user_rsvps_requires_address() {
    let app = builtin_app();

    let (status, body) = send(&app, Method::GET, "/user/rsvps", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User address is required");
}

#[tokio::test]
async fn cancel_missing_rsvp_is_not_found() {
    let app = builtin_app();

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/user/rsvps?userAddress=0xabc&eventId=art-show",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "RSVP not found");

    let (status, _) = send(&app, Method::DELETE, "/user/rsvps?userAddress=0xabc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthz() {
    let (status, body) = send(&builtin_app(), Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
