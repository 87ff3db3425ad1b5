use axum::{
    Extension, Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::ApiJson;
use super::{ApiError, ApiResponse, AppState, LoginResponse};
use crate::models::admin::Admin;
use crate::services::{AdminSummary, AuthError};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Set on responses to authenticated requests so request logging can name
/// the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAdmin(pub i32);

// ============================================================================
// Middleware
// ============================================================================

/// Requires `Authorization: Bearer <token>`. On success the admin record is
/// attached to the request extensions for the handler.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers).ok_or(AuthError::MissingToken)?;

    let admin = state.auth_service().authenticate(&token).await?;
    let admin_id = admin.id;
    request.extensions_mut().insert(admin);

    let mut response = next.run(request).await;
    response
        .extensions_mut()
        .insert(AuthenticatedAdmin(admin_id));
    Ok(response)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /admin/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    tracing::info!(admin_id = result.admin.id, "Admin logged in");

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token: result.token,
        admin: result.admin,
    }))
}

/// POST /admin/logout
/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Logout successful"))
}

/// GET /admin/verify
pub async fn verify(Extension(admin): Extension<Admin>) -> Json<ApiResponse<AdminSummary>> {
    Json(ApiResponse::with_message(
        "Token is valid",
        AdminSummary::from(&admin),
    ))
}
