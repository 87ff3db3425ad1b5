//! Domain service for admin authentication.
//!
//! Handles login, bearer-token verification and the admin profile lookup.

use serde::Serialize;
use thiserror::Error;

use crate::models::admin::Admin;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Access denied. No token provided.")]
    MissingToken,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Token expired. Please login again.")]
    TokenExpired,

    #[error("Invalid token. Admin not found.")]
    AdminNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Public part of an admin returned alongside a token.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub id: i32,
    pub email: String,
}

impl From<&Admin> for AdminSummary {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub admin: AdminSummary,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues a signed token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] when either field is blank and
    /// [`AuthError::InvalidCredentials`] when the pair does not match an admin.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves a bearer token to the admin it was issued for.
    ///
    /// The admin is re-read from the database, so deleted accounts lose access
    /// immediately.
    async fn authenticate(&self, token: &str) -> Result<Admin, AuthError>;
}
