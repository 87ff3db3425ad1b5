mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{MultipartForm, TestApp};
use http_body_util::BodyExt;
use tower::ServiceExt;

#[tokio::test]
async fn test_images_are_stored_and_served() {
    let app = TestApp::spawn().await;

    let form = MultipartForm::listing(&[])
        .image("front.JPG")
        .file("images", "plan.png", "image/png", b"\x89PNG fake");
    let (status, body) = app
        .send(form.request("POST", "/api/properties", Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Property created successfully!");

    let images = body["data"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["originalName"], "front.JPG");

    let filename = images[1]["filename"].as_str().unwrap();
    assert!(filename.starts_with("images-"));
    assert!(filename.ends_with(".png"));
    assert_eq!(images[1]["path"], format!("/uploads/{filename}"));
    assert!(images[0]["filename"].as_str().unwrap().ends_with(".jpg"));
    assert_eq!(app.uploaded_files().len(), 2);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/uploads/{filename}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"\x89PNG fake");
}

#[tokio::test]
async fn test_eleventh_image_rejects_whole_request() {
    let app = TestApp::spawn().await;

    let mut form = MultipartForm::listing(&[]);
    for i in 0..11 {
        form = form.image(&format!("photo-{i}.jpg"));
    }

    let (status, body) = app
        .send(form.request("POST", "/api/properties", Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "File upload error: Too many files. Maximum is 10."
    );

    assert!(app.uploaded_files().is_empty());
    let (_, body) = app.get("/api/properties").await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_ten_images_are_accepted() {
    let app = TestApp::spawn().await;

    let mut form = MultipartForm::listing(&[]);
    for i in 0..10 {
        form = form.image(&format!("photo-{i}.jpg"));
    }

    let (status, body) = app
        .send(form.request("POST", "/api/properties", Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["images"].as_array().unwrap().len(), 10);
    assert_eq!(app.uploaded_files().len(), 10);
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let app = TestApp::spawn().await;

    let six_mb = vec![0u8; 6 * 1024 * 1024];
    let form = MultipartForm::listing(&[])
        .image("small.jpg")
        .file("images", "huge.jpg", "image/jpeg", &six_mb);

    let (status, body) = app
        .send(form.request("POST", "/api/properties", Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File too large. Maximum size is 5MB.");

    assert!(app.uploaded_files().is_empty());
    let (_, body) = app.get("/api/properties").await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_images_are_rejected() {
    let app = TestApp::spawn().await;

    let cases = [
        ("notes.txt", "text/plain"),
        ("photo.jpg", "text/plain"),
        ("script.exe", "image/jpeg"),
        ("vector.svg", "image/svg+xml"),
    ];

    for (filename, content_type) in cases {
        let form = MultipartForm::listing(&[]).file("images", filename, content_type, b"data");
        let (status, body) = app
            .send(form.request("POST", "/api/properties", Some(&app.bearer())))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{filename}");
        assert_eq!(body["message"], "Only image files are allowed!");
    }

    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_empty_file_part_is_ignored() {
    let app = TestApp::spawn().await;

    let form = MultipartForm::listing(&[]).file("images", "", "application/octet-stream", b"");
    let (status, body) = app
        .send(form.request("POST", "/api/properties", Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["images"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unexpected_file_field_is_rejected() {
    let app = TestApp::spawn().await;

    let form = MultipartForm::listing(&[]).file("avatar", "me.jpg", "image/jpeg", b"data");
    let (status, _) = app
        .send(form.request("POST", "/api/properties", Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_update_appends_or_replaces_images() {
    let app = TestApp::spawn().await;

    let form = MultipartForm::listing(&[]).image("first.jpg");
    let (_, body) = app
        .send(form.request("POST", "/api/properties", Some(&app.bearer())))
        .await;
    let id = body["data"]["_id"].as_i64().unwrap();
    let uri = format!("/api/properties/{id}");

    let form = MultipartForm::default().image("second.jpg");
    let (status, body) = app
        .send(form.request("PUT", &uri, Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["originalName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first.jpg", "second.jpg"]);

    let form = MultipartForm::default()
        .text("replaceImages", "true")
        .image("third.jpg");
    let (status, body) = app
        .send(form.request("PUT", &uri, Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::OK);
    let images = body["data"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["originalName"], "third.jpg");

    // Replaced files stay on disk until the sweep reclaims them.
    assert_eq!(app.uploaded_files().len(), 3);
}

#[tokio::test]
async fn test_update_of_missing_property_stores_nothing() {
    let app = TestApp::spawn().await;

    let form = MultipartForm::default().image("lost.jpg");
    let (status, _) = app
        .send(form.request("PUT", "/api/properties/77", Some(&app.bearer())))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.uploaded_files().is_empty());
}
