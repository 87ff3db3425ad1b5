use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tokio::task;

use crate::config::AuthConfig;
use crate::entities::admins;
use crate::models::admin::Admin;

impl From<admins::Model> for Admin {
    fn from(model: admins::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub struct AdminRepository {
    conn: DatabaseConnection,
}

impl AdminRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Admin>> {
        let admin = admins::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query admin by ID")?;

        Ok(admin.map(Admin::from))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admin = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query admin by email")?;

        Ok(admin.map(Admin::from))
    }

    /// The account the interactive credential update edits.
    pub async fn first(&self) -> Result<Option<Admin>> {
        let admin = admins::Entity::find()
            .order_by_asc(admins::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query admin")?;

        Ok(admin.map(Admin::from))
    }

    /// Returns the admin when `password` matches the stored hash.
    /// Verification runs on the blocking pool.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<Admin>> {
        let Some(model) = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query admin for password verification")?
        else {
            return Ok(None);
        };

        let password_hash = model.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then(|| Admin::from(model)))
    }

    pub async fn create(&self, email: &str, password: &str, config: &AuthConfig) -> Result<Admin> {
        let password_hash = hash_in_background(password, config).await?;
        let now = super::timestamp();

        let active = admins::ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert admin")?;

        Ok(Admin::from(model))
    }

    pub async fn update_credentials(
        &self,
        id: i32,
        email: &str,
        password: &str,
        config: &AuthConfig,
    ) -> Result<Admin> {
        let model = admins::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query admin for update")?
            .ok_or_else(|| anyhow::anyhow!("Admin not found: {id}"))?;

        let password_hash = hash_in_background(password, config).await?;

        let mut active: admins::ActiveModel = model.into();
        active.email = Set(email.to_string());
        active.password_hash = Set(password_hash);
        active.updated_at = Set(super::timestamp());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update admin")?;

        Ok(Admin::from(model))
    }
}

async fn hash_in_background(password: &str, config: &AuthConfig) -> Result<String> {
    let password = password.to_string();
    let config = config.clone();

    task::spawn_blocking(move || hash_password(&password, &config))
        .await
        .context("Password hashing task panicked")?
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &AuthConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
