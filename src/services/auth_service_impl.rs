//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::AuthConfig;
use crate::db::Store;
use crate::models::admin::Admin;
use crate::services::auth_service::{AdminSummary, AuthError, AuthService, LoginResult};
use crate::services::token::{TokenError, TokenSigner};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
    signer: TokenSigner,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, config: &AuthConfig) -> Self {
        Self {
            store,
            signer: TokenSigner::new(&config.jwt_secret, config.token_ttl_hours),
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let admin = self
            .store
            .verify_admin_credentials(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self
            .signer
            .issue(admin.id, &admin.email)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(LoginResult {
            token,
            admin: AdminSummary::from(&admin),
        })
    }

    async fn authenticate(&self, token: &str) -> Result<Admin, AuthError> {
        let claims = self.signer.verify(token).map_err(|e| match e {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Malformed | TokenError::BadSignature => AuthError::InvalidToken,
        })?;

        self.store
            .get_admin(claims.admin_id)
            .await?
            .ok_or(AuthError::AdminNotFound)
    }
}
