use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::AuthConfig;
use crate::models::admin::Admin;
use crate::models::consultation::{Consultation, ConsultationStatus, NewConsultation};
use crate::models::property::{NewProperty, Property, PropertyChanges, PropertyFilter};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");
        let path_str = path_str.split('?').next().unwrap_or(path_str);
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn property_repo(&self) -> repositories::property::PropertyRepository {
        repositories::property::PropertyRepository::new(self.conn.clone())
    }

    fn consultation_repo(&self) -> repositories::consultation::ConsultationRepository {
        repositories::consultation::ConsultationRepository::new(self.conn.clone())
    }

    fn admin_repo(&self) -> repositories::admin::AdminRepository {
        repositories::admin::AdminRepository::new(self.conn.clone())
    }

    // Properties

    pub async fn list_properties(&self) -> Result<Vec<Property>> {
        self.property_repo().list().await
    }

    pub async fn get_property(&self, id: i32) -> Result<Option<Property>> {
        self.property_repo().get(id).await
    }

    pub async fn list_featured_properties(&self, limit: u64) -> Result<Vec<Property>> {
        self.property_repo().list_featured(limit).await
    }

    pub async fn search_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>> {
        self.property_repo().search(filter).await
    }

    pub async fn add_property(&self, input: &NewProperty) -> Result<Property> {
        self.property_repo().insert(input).await
    }

    pub async fn update_property(
        &self,
        id: i32,
        changes: PropertyChanges,
    ) -> Result<Option<Property>> {
        self.property_repo().update(id, changes).await
    }

    pub async fn remove_property(&self, id: i32) -> Result<bool> {
        self.property_repo().delete(id).await
    }

    pub async fn referenced_upload_filenames(&self) -> Result<HashSet<String>> {
        self.property_repo().referenced_filenames().await
    }

    // Consultations

    pub async fn list_consultations(&self) -> Result<Vec<Consultation>> {
        self.consultation_repo().list().await
    }

    pub async fn add_consultation(&self, input: &NewConsultation) -> Result<Consultation> {
        self.consultation_repo().insert(input).await
    }

    pub async fn update_consultation_status(
        &self,
        id: i32,
        status: ConsultationStatus,
    ) -> Result<Option<Consultation>> {
        self.consultation_repo().update_status(id, status).await
    }

    pub async fn remove_consultation(&self, id: i32) -> Result<bool> {
        self.consultation_repo().delete(id).await
    }

    // Admins

    pub async fn get_admin(&self, id: i32) -> Result<Option<Admin>> {
        self.admin_repo().get_by_id(id).await
    }

    pub async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
        self.admin_repo().get_by_email(email).await
    }

    pub async fn first_admin(&self) -> Result<Option<Admin>> {
        self.admin_repo().first().await
    }

    pub async fn verify_admin_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Admin>> {
        self.admin_repo().verify_credentials(email, password).await
    }

    pub async fn create_admin(
        &self,
        email: &str,
        password: &str,
        config: &AuthConfig,
    ) -> Result<Admin> {
        self.admin_repo().create(email, password, config).await
    }

    pub async fn update_admin_credentials(
        &self,
        id: i32,
        email: &str,
        password: &str,
        config: &AuthConfig,
    ) -> Result<Admin> {
        self.admin_repo()
            .update_credentials(id, email, password, config)
            .await
    }
}
