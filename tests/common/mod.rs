#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sharjah::api::AppState;
use sharjah::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";
pub const JWT_SECRET: &str = "integration-secret";

pub const BOUNDARY: &str = "sharjah-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub root: PathBuf,
    pub token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let root = std::env::temp_dir().join(format!("sharjah-it-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();

        let mut config = Config::default();
        config.general.database_url = format!("sqlite:{}?mode=rwc", root.join("test.db").display());
        config.uploads.dir = root.join("uploads").to_string_lossy().into_owned();
        config.auth.jwt_secret = JWT_SECRET.to_string();
        // Cheap hashing keeps the suite fast.
        config.auth.argon2_memory_cost_kib = 256;
        config.auth.argon2_time_cost = 1;

        let state = sharjah::api::create_app_state_from_config(config.clone(), None)
            .await
            .expect("Failed to create app state");
        state
            .store()
            .create_admin(ADMIN_EMAIL, ADMIN_PASSWORD, &config.auth)
            .await
            .expect("Failed to seed admin");

        let router = sharjah::api::router(state.clone());

        let mut app = Self {
            router,
            state,
            root,
            token: String::new(),
        };

        let (status, body) = app
            .send(json_request(
                "POST",
                "/api/admin/login",
                &json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        app.token = body["token"].as_str().unwrap().to_string();

        app
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// Names of every file currently in the upload directory.
    pub fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads_dir())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Creates a listing through the API and returns its id.
    pub async fn create_property(&self, fields: &[(&str, &str)]) -> i64 {
        let form = MultipartForm::listing(fields);
        let (status, body) = self
            .send(form.request("POST", "/api/properties", Some(&self.bearer())))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["data"]["_id"].as_i64().unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_json_request(method: &str, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, token)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Hand-assembled multipart/form-data body.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    /// A complete valid listing, with `overrides` replacing or adding fields.
    pub fn listing(overrides: &[(&str, &str)]) -> Self {
        let defaults = [
            ("title", "Corner house"),
            ("description", "Double storey"),
            ("location", "Sector F"),
            ("marlaSize", "5"),
            ("propertyType", "House"),
            ("society", "DHA Phase 2"),
            ("price", "12500000"),
            ("priceType", "For Sale"),
        ];

        let mut form = Self::default();
        for (name, value) in defaults {
            if !overrides.iter().any(|(n, _)| *n == name) {
                form = form.text(name, value);
            }
        }
        for (name, value) in overrides {
            form = form.text(name, value);
        }
        form
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn image(self, filename: &str) -> Self {
        self.file("images", filename, "image/jpeg", b"\xFF\xD8\xFF\xE0fake-jpeg")
    }

    pub fn request(mut self, method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder().method(method).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::from(self.body)).unwrap()
    }
}
