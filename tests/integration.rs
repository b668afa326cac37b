use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use booking_intake::api::rest::router;
use booking_intake::state::AppState;
use booking_intake::store::MemoryContactStore;
use chrono::{Duration, Local};
use serde_json::{json, Value};
use tower::ServiceExt;

fn setup() -> axum::Router {
    let store = Arc::new(MemoryContactStore::new());
    router(Arc::new(AppState::new(store)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn today() -> String {
    Local::now().date_naive().to_string()
}

fn booking_payload() -> Value {
    json!({
        "serviceType": "one-way",
        "pickupDate": today(),
        "pickupTime": "10:00",
        "pickupLocationType": "airport",
        "pickupLocation": { "address": "JFK", "lat": 40.64, "lng": -73.78 },
        "stops": [],
        "dropoffLocationType": "location",
        "dropoffLocation": { "address": "123 Main St", "lat": 40.71, "lng": -74.0 },
        "phone": "774-415-3244",
        "phoneRecognized": true,
        "firstName": "",
        "lastName": "",
        "email": "",
        "passengers": 1
    })
}

#[tokio::test]
async fn health_returns_ok_with_contact_count() {
    let app = setup();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["contacts"], 0);
}

#[tokio::test]
async fn metrics_returns_prometheus_format() {
    let app = setup();

    // Touch a counter so the exposition has at least one family.
    let response = app
        .clone()
        .oneshot(get_request("/phone/999-999-9999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/plain"));

    let body = body_string(response).await;
    assert!(body.contains("phone_lookups_total"));
}

#[tokio::test]
async fn short_phone_lookup_returns_400() {
    let app = setup();
    let response = app.oneshot(get_request("/phone/123456")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid phone number");
}

#[tokio::test]
async fn unknown_phone_lookup_returns_not_found_flag() {
    let app = setup();
    let response = app
        .oneshot(get_request("/phone/999-999-9999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["found"], false);
    assert!(body.get("contact").is_none());
}

#[tokio::test]
async fn submit_valid_booking_returns_confirmation() {
    let app = setup();
    let response = app
        .oneshot(json_request("POST", "/bookings", booking_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "confirmed");
    assert!(body["id"].as_str().unwrap().starts_with("BK-"));
    assert_eq!(body["serviceType"], "one-way");
    assert_eq!(body["pickup"]["address"], "JFK");
    assert_eq!(body["dropoff"]["address"], "123 Main St");
    assert_eq!(body["passengers"], 1);
    assert!(body["distance"].is_null());
    assert!(body["duration"].is_null());
    assert_eq!(body["contact"]["phone"], "774-415-3244");
    assert_eq!(body["contact"]["firstName"], "");
}

#[tokio::test]
async fn submit_with_empty_contact_reports_every_violation() {
    let app = setup();
    let mut payload = booking_payload();
    payload["phone"] = json!("");
    payload["phoneRecognized"] = json!(false);

    let response = app
        .oneshot(json_request("POST", "/bookings", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation failed");

    let fields: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"phone"));
    assert!(fields.contains(&"firstName"));
    assert!(fields.contains(&"lastName"));
    assert!(fields.contains(&"email"));
}

#[tokio::test]
async fn submit_with_past_pickup_date_rejected() {
    let app = setup();
    let mut payload = booking_payload();
    payload["pickupDate"] = json!((Local::now().date_naive() - Duration::days(1)).to_string());

    let response = app
        .oneshot(json_request("POST", "/bookings", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["pickupDate"]);
}

#[tokio::test]
async fn submit_with_unknown_service_type_rejected() {
    let app = setup();
    let mut payload = booking_payload();
    payload["serviceType"] = json!("teleport");

    let response = app
        .oneshot(json_request("POST", "/bookings", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn new_customer_submission_creates_contact_found_by_lookup() {
    let app = setup();

    let mut payload = booking_payload();
    payload["phoneRecognized"] = json!(false);
    payload["firstName"] = json!("Ada");
    payload["lastName"] = json!("Lovelace");
    payload["email"] = json!("ada@example.com");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/bookings", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Lookup with different formatting must still match.
    let response = app
        .clone()
        .oneshot(get_request("/phone/7744153244"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["found"], true);
    assert_eq!(body["contact"]["firstName"], "Ada");
    assert_eq!(body["contact"]["lastName"], "Lovelace");
    assert_eq!(body["contact"]["email"], "ada@example.com");
    assert_eq!(body["contact"]["phone"], "774-415-3244");

    let response = app.oneshot(get_request("/health")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["contacts"], 1);
}

#[tokio::test]
async fn resubmission_updates_contact_without_second_row() {
    let app = setup();

    let mut payload = booking_payload();
    payload["phoneRecognized"] = json!(false);
    payload["firstName"] = json!("Ada");
    payload["lastName"] = json!("Lovelace");
    payload["email"] = json!("ada@example.com");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/bookings", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    payload["phone"] = json!("(774) 415-3244");
    payload["email"] = json!("ada@lovelace.dev");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/bookings", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_request("/phone/774-415-3244"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["found"], true);
    assert_eq!(body["contact"]["email"], "ada@lovelace.dev");

    let response = app.oneshot(get_request("/health")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["contacts"], 1);
}

#[tokio::test]
async fn recognized_phone_submission_does_not_create_contact() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/bookings", booking_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get_request("/health")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["contacts"], 0);
}

#[tokio::test]
async fn distance_and_duration_pass_through() {
    let app = setup();
    let mut payload = booking_payload();
    payload["distance"] = json!("12.4 km");
    payload["duration"] = json!("25 min");
    payload["stops"] = json!(["5th Ave", "Bryant Park"]);

    let response = app
        .oneshot(json_request("POST", "/bookings", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["distance"], "12.4 km");
    assert_eq!(body["duration"], "25 min");
    assert_eq!(body["stops"], json!(["5th Ave", "Bryant Park"]));
}
