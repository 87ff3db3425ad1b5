mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{TestApp, authed_json_request, json_request};
use serde_json::{Value, json};

async fn list(app: &TestApp) -> Vec<Value> {
    let (status, body) = app
        .send(
            Request::builder()
                .uri("/api/consultations")
                .header(header::AUTHORIZATION, app.bearer())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body["data"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_general_consultation() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/consultations",
            &json!({ "name": "Sara", "email": "sara@example.com", "phone": "0300-1111111" }),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Consultation request submitted successfully!");
    assert_eq!(body["data"]["consultationType"], "General Consultation");
    assert_eq!(body["data"]["requirements"], "");
    assert_eq!(body["data"]["status"], "pending");
    assert!(body["data"]["_id"].as_i64().is_some());
    assert!(body["data"]["submittedAt"].as_str().is_some());
}

#[tokio::test]
async fn test_contact_message_under_both_mounts() {
    let app = TestApp::spawn().await;

    let payload = json!({
        "firstName": "Ali",
        "lastName": "Khan",
        "email": "ali@example.com",
        "phone": "0311",
        "subject": "Plot enquiry",
        "message": "Is the corner plot still available?"
    });

    for uri in ["/api/consultations/contact", "/api/contact/contact"] {
        let (status, body) = app.send(json_request("POST", uri, &payload)).await;
        assert_eq!(status, StatusCode::CREATED, "{uri}");
        assert_eq!(
            body["message"],
            "Message sent successfully! We will get back to you soon."
        );
        assert_eq!(body["data"]["name"], "Ali Khan");
        assert_eq!(body["data"]["consultationType"], "Plot enquiry");
        assert_eq!(
            body["data"]["requirements"],
            "Is the corner plot still available?"
        );
    }

    assert_eq!(list(&app).await.len(), 2);
}

#[tokio::test]
async fn test_viewing_and_service_requests() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/consultations/viewing",
            &json!({
                "name": "Hina",
                "email": "hina@example.com",
                "phone": "0321",
                "preferredDate": "2026-11-02",
                "propertyTitle": "Corner house"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["consultationType"], "Property Viewing");
    assert_eq!(
        body["data"]["requirements"],
        "Property: Corner house\nPreferred Date: 2026-11-02\nMessage: No additional message"
    );

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/consultations/service",
            &json!({ "name": "Omar", "email": "omar@example.com", "serviceRequired": "Valuation" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["phone"], "Not provided");
    assert_eq!(body["data"]["consultationType"], "Valuation");
    assert_eq!(
        body["data"]["requirements"],
        "No additional requirements specified"
    );
}

#[tokio::test]
async fn test_missing_fields_persist_nothing() {
    let app = TestApp::spawn().await;

    let cases = [
        (
            "/api/consultations",
            json!({ "name": "Sara", "email": "sara@example.com" }),
            "Name, email, and phone are required",
        ),
        (
            "/api/consultations/consultation",
            json!({ "name": "  ", "email": "sara@example.com", "phone": "0300" }),
            "Name, email, and phone are required",
        ),
        (
            "/api/contact/contact",
            json!({ "firstName": "Ali", "email": "ali@example.com", "phone": "0311", "subject": "Hi", "message": "x" }),
            "All fields are required",
        ),
        (
            "/api/consultations/viewing",
            json!({ "name": "Hina", "email": "hina@example.com", "phone": "0321" }),
            "Name, email, phone, and preferred date are required",
        ),
        (
            "/api/consultations/service",
            json!({ "name": "Omar", "email": "omar@example.com" }),
            "Name, email, and service required are mandatory",
        ),
    ];

    for (uri, payload, message) in cases {
        let (status, body) = app.send(json_request("POST", uri, &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], message);
    }

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_list_requires_auth_and_is_newest_first() {
    let app = TestApp::spawn().await;

    for name in ["First", "Second"] {
        let (status, _) = app
            .send(json_request(
                "POST",
                "/api/consultations",
                &json!({ "name": name, "email": "x@example.com", "phone": "1" }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = app.get("/api/consultations").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let names: Vec<String> = list(&app)
        .await
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn test_status_update_and_delete() {
    let app = TestApp::spawn().await;

    let (_, body) = app
        .send(json_request(
            "POST",
            "/api/consultations",
            &json!({ "name": "Sara", "email": "sara@example.com", "phone": "0300" }),
        ))
        .await;
    let id = body["data"]["_id"].as_i64().unwrap();

    let (status, body) = app
        .send(authed_json_request(
            "PUT",
            &format!("/api/consultations/{id}/status"),
            &app.bearer(),
            &json!({ "status": "in-progress" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Consultation status updated successfully");
    assert_eq!(body["data"]["status"], "in-progress");

    let (status, body) = app
        .send(authed_json_request(
            "PUT",
            &format!("/api/consultations/{id}/status"),
            &app.bearer(),
            &json!({ "status": "archived" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid status: archived");

    let (status, _) = app
        .send(authed_json_request(
            "PUT",
            "/api/consultations/999/status",
            &app.bearer(),
            &json!({ "status": "completed" }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let delete = |uri: String| {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, app.bearer())
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = app
        .send(delete(format!("/api/contact/{id}")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Consultation deleted successfully");
    assert!(list(&app).await.is_empty());

    let (status, body) = app
        .send(delete(format!("/api/consultations/{id}")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Consultation not found");
}

#[tokio::test]
async fn test_numeric_phone_is_stored_as_text() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/consultations",
            &json!({ "name": "Sara", "email": "sara@example.com", "phone": 3_001_234_567_u64 }),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["phone"], "3001234567");

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/consultations/viewing",
            &json!({
                "name": "Sara",
                "email": "sara@example.com",
                "phone": 3_001_234_567_u64,
                "preferredDate": "2026-11-02",
                "propertyId": 7
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = TestApp::spawn().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/consultations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/consultations/contact",
            &json!({ "firstName": ["Ali"] }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let request = Request::builder()
        .method("PUT")
        .uri("/api/consultations/1/status")
        .header(header::AUTHORIZATION, app.bearer())
        .body(Body::from(r#"{"status":"completed"}"#))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    assert!(list(&app).await.is_empty());
}
