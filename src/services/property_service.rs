//! Domain service for property listings.
//!
//! Covers catalog queries (all, by id, by category, featured, search) and the
//! admin create/update/delete flow including image persistence.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::models::UnknownVariant;
use crate::models::property::{
    Category, ContactInfo, Feature, MarlaSize, NewProperty, Property, PropertyChanges,
    PropertyFilter, PropertyStatus,
};
use crate::services::upload::{StagedFile, UploadError};

#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Property not found")]
    NotFound,

    #[error("Invalid category")]
    InvalidCategory,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for PropertyError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PropertyError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<UnknownVariant> for PropertyError {
    fn from(err: UnknownVariant) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Raw query string of the search endpoint. Blank values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub society: Option<String>,
    pub price_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl SearchQuery {
    pub fn into_filter(self) -> Result<PropertyFilter, PropertyError> {
        let category = present(self.category)
            .map(|code| Category::from_code(&code).ok_or(PropertyError::InvalidCategory))
            .transpose()?;

        Ok(PropertyFilter {
            text: present(self.q),
            category,
            society: present(self.society).map(|s| s.parse()).transpose()?,
            price_type: present(self.price_type).map(|s| s.parse()).transpose()?,
            min_price: parse_price_bound("minPrice", self.min_price)?,
            max_price: parse_price_bound("maxPrice", self.max_price)?,
            status: None,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_price_bound(name: &str, raw: Option<String>) -> Result<Option<i64>, PropertyError> {
    present(raw)
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| PropertyError::Validation(format!("{name} must be an integer")))
        })
        .transpose()
}

/// Text fields of a create/update multipart form.
#[derive(Debug, Clone, Default)]
pub struct PropertyForm {
    fields: HashMap<String, String>,
}

impl PropertyForm {
    #[must_use]
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Builds a form from a JSON object body. Scalars become their text form,
    /// arrays and objects their JSON encoding. Nulls count as absent.
    #[must_use]
    pub fn from_json(body: serde_json::Map<String, serde_json::Value>) -> Self {
        let fields = body
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(text) => Some((name, text)),
                other => Some((name, other.to_string())),
            })
            .collect();

        Self { fields }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn required(&self, name: &str) -> Result<String, PropertyError> {
        self.text(name)
            .ok_or_else(|| PropertyError::Validation(format!("{name} is required")))
    }

    /// A field that may be omitted but must not be sent blank.
    fn non_blank(&self, name: &str) -> Result<Option<String>, PropertyError> {
        match self.get(name) {
            None => Ok(None),
            Some(_) => self.required(name).map(Some),
        }
    }

    fn parsed<T>(&self, name: &str) -> Result<Option<T>, PropertyError>
    where
        T: std::str::FromStr<Err = UnknownVariant>,
    {
        Ok(self.non_blank(name)?.map(|v| v.parse()).transpose()?)
    }

    fn price(&self) -> Result<Option<i64>, PropertyError> {
        self.non_blank("price")?
            .map(|raw| match raw.parse::<i64>() {
                Ok(price) if price > 0 => Ok(price),
                _ => Err(PropertyError::Validation(
                    "price must be a positive integer".to_string(),
                )),
            })
            .transpose()
    }

    fn features(&self) -> Result<Option<Vec<Feature>>, PropertyError> {
        self.text("features")
            .map(|raw| {
                serde_json::from_str::<Vec<Feature>>(&raw)
                    .map_err(|e| PropertyError::Validation(format!("Invalid features: {e}")))
            })
            .transpose()
    }

    #[must_use]
    pub fn replace_images(&self) -> bool {
        self.get("replaceImages") == Some("true")
    }

    pub fn into_new_property(self) -> Result<NewProperty, PropertyError> {
        let missing = |name: &str| PropertyError::Validation(format!("{name} is required"));

        Ok(NewProperty {
            title: self.required("title")?,
            description: self.required("description")?,
            location: self.required("location")?,
            marla_size: self
                .parsed::<MarlaSize>("marlaSize")?
                .ok_or_else(|| missing("marlaSize"))?,
            property_type: self
                .parsed("propertyType")?
                .ok_or_else(|| missing("propertyType"))?,
            society: self.parsed("society")?.ok_or_else(|| missing("society"))?,
            price: self.price()?.ok_or_else(|| missing("price"))?,
            price_type: self
                .parsed("priceType")?
                .ok_or_else(|| missing("priceType"))?,
            features: self.features()?.unwrap_or_default(),
            status: self
                .parsed("status")?
                .unwrap_or(PropertyStatus::Available),
            contact_info: ContactInfo {
                name: self.text("contactName"),
                phone: self.text("contactPhone"),
                email: self.text("contactEmail"),
            },
            images: Vec::new(),
        })
    }

    pub fn into_changes(self) -> Result<PropertyChanges, PropertyError> {
        let contact = |name: &str| self.get(name).map(|v| v.trim().to_string());

        Ok(PropertyChanges {
            title: self.non_blank("title")?,
            description: self.non_blank("description")?,
            location: self.non_blank("location")?,
            marla_size: self.parsed("marlaSize")?,
            property_type: self.parsed("propertyType")?,
            society: self.parsed("society")?,
            price: self.price()?,
            price_type: self.parsed("priceType")?,
            features: match self.get("features") {
                Some(_) => Some(self.features()?.unwrap_or_default()),
                None => None,
            },
            status: self.parsed("status")?,
            contact_name: contact("contactName"),
            contact_phone: contact("contactPhone"),
            contact_email: contact("contactEmail"),
            images: None,
        })
    }
}

/// Domain service trait for property listings.
#[async_trait::async_trait]
pub trait PropertyService: Send + Sync {
    /// All properties, newest first.
    async fn list(&self) -> Result<Vec<Property>, PropertyError>;

    async fn get(&self, id: i32) -> Result<Property, PropertyError>;

    /// Properties whose marla size falls in the category addressed by `code`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidCategory`] for an unknown code.
    async fn list_by_category(&self, code: &str) -> Result<Vec<Property>, PropertyError>;

    async fn list_featured(&self) -> Result<Vec<Property>, PropertyError>;

    async fn search(&self, query: SearchQuery) -> Result<Vec<Property>, PropertyError>;

    /// Validates the form, stores the images, then inserts the row. Files are
    /// removed again if the insert fails.
    async fn create(
        &self,
        form: PropertyForm,
        files: Vec<StagedFile>,
    ) -> Result<Property, PropertyError>;

    /// Applies an admin edit. New images replace the list when the form sets
    /// `replaceImages=true`, otherwise they are appended.
    async fn update(
        &self,
        id: i32,
        form: PropertyForm,
        files: Vec<StagedFile>,
    ) -> Result<Property, PropertyError>;

    /// Removes the row. Image files stay on disk for the upload sweep.
    async fn delete(&self, id: i32) -> Result<(), PropertyError>;
}
