use std::collections::HashSet;

use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::entities::{prelude::*, properties};
use crate::models::property::{
    ContactInfo, MarlaSize, NewProperty, Property, PropertyChanges, PropertyFilter, PropertyImage,
    PropertyStatus,
};

pub struct PropertyRepository {
    conn: DatabaseConnection,
}

impl PropertyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn newest_first(query: Select<Properties>) -> Select<Properties> {
        query
            .order_by_desc(properties::Column::CreatedAt)
            .order_by_desc(properties::Column::Id)
    }

    pub async fn list(&self) -> Result<Vec<Property>> {
        let rows = Self::newest_first(Properties::find())
            .all(&self.conn)
            .await
            .context("Failed to list properties")?;

        rows.into_iter().map(Property::try_from).collect()
    }

    pub async fn get(&self, id: i32) -> Result<Option<Property>> {
        let row = Properties::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query property")?;

        row.map(Property::try_from).transpose()
    }

    pub async fn list_featured(&self, limit: u64) -> Result<Vec<Property>> {
        let rows = Self::newest_first(Properties::find())
            .filter(properties::Column::Status.eq(PropertyStatus::Available.as_str()))
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list featured properties")?;

        rows.into_iter().map(Property::try_from).collect()
    }

    pub async fn search(&self, filter: &PropertyFilter) -> Result<Vec<Property>> {
        let mut query = Self::newest_first(Properties::find());

        if let Some(category) = filter.category {
            query = query.filter(
                properties::Column::MarlaSize.is_in(category.marla_sizes().iter().copied()),
            );
        }

        if let Some(society) = filter.society {
            query = query.filter(properties::Column::Society.eq(society.as_str()));
        }

        if let Some(price_type) = filter.price_type {
            query = query.filter(properties::Column::PriceType.eq(price_type.as_str()));
        }

        if let Some(min) = filter.min_price {
            query = query.filter(properties::Column::Price.gte(min));
        }

        if let Some(max) = filter.max_price {
            query = query.filter(properties::Column::Price.lte(max));
        }

        if let Some(status) = filter.status {
            query = query.filter(properties::Column::Status.eq(status.as_str()));
        }

        let rows = query
            .all(&self.conn)
            .await
            .context("Failed to search properties")?;

        // SQLite LIKE only folds ASCII case, so free text is matched here.
        let needle = filter.text.as_deref().map(str::to_lowercase);
        let mut found = Vec::with_capacity(rows.len());
        for row in rows {
            let property = Property::try_from(row)?;
            if needle
                .as_deref()
                .is_none_or(|needle| matches_text(&property, needle))
            {
                found.push(property);
            }
        }

        Ok(found)
    }

    pub async fn insert(&self, input: &NewProperty) -> Result<Property> {
        let now = super::timestamp();

        let active = properties::ActiveModel {
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            location: Set(input.location.clone()),
            marla_size: Set(input.marla_size.value()),
            property_type: Set(input.property_type.as_str().to_string()),
            society: Set(input.society.as_str().to_string()),
            price: Set(input.price),
            price_type: Set(input.price_type.as_str().to_string()),
            images: Set(serde_json::to_string(&input.images)?),
            features: Set(serde_json::to_string(&input.features)?),
            status: Set(input.status.as_str().to_string()),
            contact_name: Set(input.contact_info.name.clone()),
            contact_phone: Set(input.contact_info.phone.clone()),
            contact_email: Set(input.contact_info.email.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert property")?;

        Property::try_from(model)
    }

    /// Applies `changes` to an existing row. Returns `None` when the id is unknown.
    pub async fn update(&self, id: i32, changes: PropertyChanges) -> Result<Option<Property>> {
        let Some(model) = Properties::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query property for update")?
        else {
            return Ok(None);
        };

        let mut active: properties::ActiveModel = model.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(location) = changes.location {
            active.location = Set(location);
        }
        if let Some(size) = changes.marla_size {
            active.marla_size = Set(size.value());
        }
        if let Some(property_type) = changes.property_type {
            active.property_type = Set(property_type.as_str().to_string());
        }
        if let Some(society) = changes.society {
            active.society = Set(society.as_str().to_string());
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(price_type) = changes.price_type {
            active.price_type = Set(price_type.as_str().to_string());
        }
        if let Some(features) = changes.features {
            active.features = Set(serde_json::to_string(&features)?);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(name) = changes.contact_name {
            active.contact_name = Set(Some(name).filter(|v| !v.is_empty()));
        }
        if let Some(phone) = changes.contact_phone {
            active.contact_phone = Set(Some(phone).filter(|v| !v.is_empty()));
        }
        if let Some(email) = changes.contact_email {
            active.contact_email = Set(Some(email).filter(|v| !v.is_empty()));
        }
        if let Some(images) = changes.images {
            active.images = Set(serde_json::to_string(&images)?);
        }
        active.updated_at = Set(super::timestamp());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update property")?;

        Property::try_from(model).map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Properties::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete property")?;

        Ok(result.rows_affected > 0)
    }

    /// Every upload filename some property still points at.
    pub async fn referenced_filenames(&self) -> Result<HashSet<String>> {
        let columns: Vec<String> = Properties::find()
            .select_only()
            .column(properties::Column::Images)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to load property images")?;

        let mut names = HashSet::new();
        for raw in columns {
            let images: Vec<PropertyImage> = serde_json::from_str(&raw)?;
            names.extend(images.into_iter().map(|image| image.filename));
        }

        Ok(names)
    }
}

/// Case-insensitive substring match over the searchable text of a listing.
/// `needle` must already be lowercased.
fn matches_text(property: &Property, needle: &str) -> bool {
    [
        property.title.as_str(),
        property.description.as_str(),
        property.location.as_str(),
        property.society.as_str(),
    ]
    .iter()
    .any(|haystack| haystack.to_lowercase().contains(needle))
}

impl TryFrom<properties::Model> for Property {
    type Error = anyhow::Error;

    fn try_from(model: properties::Model) -> Result<Self> {
        Ok(Self {
            id: model.id,
            marla_size: MarlaSize::try_from(model.marla_size)
                .with_context(|| format!("Stored property {} has bad marla size", model.id))?,
            property_type: model.property_type.parse()?,
            society: model.society.parse()?,
            price_type: model.price_type.parse()?,
            status: model.status.parse()?,
            images: serde_json::from_str(&model.images)
                .with_context(|| format!("Stored property {} has bad images", model.id))?,
            features: serde_json::from_str(&model.features)
                .with_context(|| format!("Stored property {} has bad features", model.id))?,
            contact_info: ContactInfo {
                name: model.contact_name,
                phone: model.contact_phone,
                email: model.contact_email,
            },
            title: model.title,
            description: model.description,
            location: model.location,
            price: model.price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
