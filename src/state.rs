use anyhow::Context;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, ConsultationService, PropertyService, SeaOrmAuthService,
    SeaOrmConsultationService, SeaOrmPropertyService, UploadPolicy, UploadStore,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub uploads: UploadStore,

    pub upload_policy: UploadPolicy,

    pub auth_service: Arc<dyn AuthService>,

    pub property_service: Arc<dyn PropertyService>,

    pub consultation_service: Arc<dyn ConsultationService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let uploads = UploadStore::new(&config.uploads.dir);
        uploads.ensure_dir().await.with_context(|| {
            format!("Failed to create upload directory: {}", config.uploads.dir)
        })?;

        let upload_policy = UploadPolicy::from_config(&config.uploads);

        let auth_service =
            Arc::new(SeaOrmAuthService::new(store.clone(), &config.auth)) as Arc<dyn AuthService>;

        let property_service = Arc::new(SeaOrmPropertyService::new(
            store.clone(),
            uploads.clone(),
        )) as Arc<dyn PropertyService>;

        let consultation_service = Arc::new(SeaOrmConsultationService::new(store.clone()))
            as Arc<dyn ConsultationService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            uploads,
            upload_policy,
            auth_service,
            property_service,
            consultation_service,
        })
    }
}
