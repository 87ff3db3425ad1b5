use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::constants::uploads::URL_PREFIX;
use crate::services::{AuthService, ConsultationService, PropertyService, UploadPolicy};
use crate::state::SharedState;

pub mod auth;
mod consultations;
mod error;
mod observability;
mod properties;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

/// Multipart bodies beyond the per-file limits are rejected by the upload
/// policy; this only caps the raw request size.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn property_service(&self) -> &Arc<dyn PropertyService> {
        &self.shared.property_service
    }

    #[must_use]
    pub fn consultation_service(&self) -> &Arc<dyn ConsultationService> {
        &self.shared.consultation_service
    }

    #[must_use]
    pub fn upload_policy(&self) -> UploadPolicy {
        self.shared.upload_policy
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let config = state.config();
    let uploads_dir = config.uploads.dir.clone();
    let frontend_dir = config.server.frontend_dir.clone();
    let cors_origins = config.server.cors_allowed_origins.clone();
    let body_limit = config
        .uploads
        .max_files
        .saturating_mul(config.uploads.max_file_size_bytes)
        .saturating_add(BODY_LIMIT_SLACK);

    let api_router = Router::new()
        .route("/", get(liveness))
        .merge(admin_router(state.clone()))
        .merge(property_router(state.clone()))
        .nest("/consultations", consultation_router(state.clone()))
        .nest("/contact", consultation_router(state.clone()))
        .route(
            "/metrics",
            get(observability::get_metrics).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::auth_middleware,
            )),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let app = Router::new()
        .nest("/api", api_router)
        .nest_service(URL_PREFIX, ServeDir::new(uploads_dir));

    let app = match frontend_dir {
        Some(dir) => {
            let index = Path::new(&dir).join("index.html");
            app.fallback_service(ServeDir::new(&dir).not_found_service(ServeFile::new(index)))
        }
        None => app.route("/", get(liveness)),
    };

    app.layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::security_headers))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::request_tracing))
}

async fn liveness() -> Json<Value> {
    Json(json!({ "message": "Sharjah Properties API is running!" }))
}

fn admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/admin/verify", get(auth::verify))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware));

    Router::new()
        .route("/admin/login", post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .merge(protected)
}

fn property_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/properties", post(properties::create_property))
        .route("/properties/{id}", put(properties::update_property))
        .route("/properties/{id}", delete(properties::delete_property))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware));

    Router::new()
        .route("/properties", get(properties::list_properties))
        .route("/properties/featured", get(properties::list_featured))
        .route("/properties/search", get(properties::search_properties))
        .route(
            "/properties/category/{category}",
            get(properties::list_by_category),
        )
        .route("/properties/{id}", get(properties::get_property))
        .merge(protected)
}

/// Mounted under both `/consultations` and `/contact`.
fn consultation_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/", get(consultations::list_consultations))
        .route("/{id}/status", put(consultations::update_status))
        .route("/{id}", delete(consultations::delete_consultation))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware));

    Router::new()
        .route("/", post(consultations::submit_general))
        .route("/consultation", post(consultations::submit_general))
        .route("/contact", post(consultations::submit_contact))
        .route("/viewing", post(consultations::submit_viewing))
        .route("/service", post(consultations::submit_service))
        .merge(protected)
}
