//! `SeaORM` implementation of the `PropertyService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::constants::listings::FEATURED_LIMIT;
use crate::db::Store;
use crate::models::property::{Category, Property, PropertyFilter};
use crate::services::property_service::{
    PropertyError, PropertyForm, PropertyService, SearchQuery,
};
use crate::services::upload::{StagedFile, UploadStore};

pub struct SeaOrmPropertyService {
    store: Store,
    uploads: UploadStore,
}

impl SeaOrmPropertyService {
    #[must_use]
    pub const fn new(store: Store, uploads: UploadStore) -> Self {
        Self { store, uploads }
    }
}

#[async_trait]
impl PropertyService for SeaOrmPropertyService {
    async fn list(&self) -> Result<Vec<Property>, PropertyError> {
        Ok(self.store.list_properties().await?)
    }

    async fn get(&self, id: i32) -> Result<Property, PropertyError> {
        self.store
            .get_property(id)
            .await?
            .ok_or(PropertyError::NotFound)
    }

    async fn list_by_category(&self, code: &str) -> Result<Vec<Property>, PropertyError> {
        let category = Category::from_code(code).ok_or(PropertyError::InvalidCategory)?;
        Ok(self
            .store
            .search_properties(&PropertyFilter::by_category(category))
            .await?)
    }

    async fn list_featured(&self) -> Result<Vec<Property>, PropertyError> {
        Ok(self.store.list_featured_properties(FEATURED_LIMIT).await?)
    }

    async fn search(&self, query: SearchQuery) -> Result<Vec<Property>, PropertyError> {
        let filter = query.into_filter()?;
        Ok(self.store.search_properties(&filter).await?)
    }

    async fn create(
        &self,
        form: PropertyForm,
        files: Vec<StagedFile>,
    ) -> Result<Property, PropertyError> {
        let mut input = form.into_new_property()?;
        input.images = self.uploads.persist(files).await?;

        match self.store.add_property(&input).await {
            Ok(property) => {
                info!(
                    property_id = property.id,
                    images = property.images.len(),
                    "Property created"
                );
                Ok(property)
            }
            Err(e) => {
                warn!("Insert failed, removing {} stored images", input.images.len());
                self.uploads.discard(&input.images).await;
                Err(e.into())
            }
        }
    }

    async fn update(
        &self,
        id: i32,
        form: PropertyForm,
        files: Vec<StagedFile>,
    ) -> Result<Property, PropertyError> {
        let replace = form.replace_images();
        let mut changes = form.into_changes()?;

        let existing = self
            .store
            .get_property(id)
            .await?
            .ok_or(PropertyError::NotFound)?;

        if files.is_empty() {
            return self
                .store
                .update_property(id, changes)
                .await?
                .ok_or(PropertyError::NotFound);
        }

        let added = self.uploads.persist(files).await?;
        changes.images = Some(if replace {
            added.clone()
        } else {
            existing.images.into_iter().chain(added.iter().cloned()).collect()
        });

        match self.store.update_property(id, changes).await {
            Ok(Some(property)) => {
                info!(property_id = id, added = added.len(), replace, "Property updated");
                Ok(property)
            }
            Ok(None) => {
                self.uploads.discard(&added).await;
                Err(PropertyError::NotFound)
            }
            Err(e) => {
                warn!("Update failed, removing {} stored images", added.len());
                self.uploads.discard(&added).await;
                Err(e.into())
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<(), PropertyError> {
        if self.store.remove_property(id).await? {
            info!(property_id = id, "Property deleted");
            Ok(())
        } else {
            Err(PropertyError::NotFound)
        }
    }
}
