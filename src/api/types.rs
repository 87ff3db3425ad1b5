use serde::Serialize;

use crate::models::consultation::Consultation;
use crate::models::property::{ContactInfo, Feature, Property, PropertyImage};
use crate::services::AdminSummary;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    #[serde(rename = "_id")]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub marla_size: i32,
    pub category: &'static str,
    pub property_type: String,
    pub society: String,
    pub price: i64,
    pub price_type: String,
    pub images: Vec<PropertyImage>,
    pub features: Vec<Feature>,
    pub status: String,
    pub contact_info: ContactInfo,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            category: p.marla_size.category_label(),
            marla_size: p.marla_size.value(),
            property_type: p.property_type.to_string(),
            society: p.society.to_string(),
            price_type: p.price_type.to_string(),
            status: p.status.to_string(),
            title: p.title,
            description: p.description,
            location: p.location,
            price: p.price,
            images: p.images,
            features: p.features,
            contact_info: p.contact_info,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationDto {
    #[serde(rename = "_id")]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub consultation_type: String,
    pub requirements: String,
    pub status: String,
    pub submitted_at: String,
}

impl From<Consultation> for ConsultationDto {
    fn from(c: Consultation) -> Self {
        Self {
            id: c.id,
            status: c.status.to_string(),
            name: c.name,
            email: c.email,
            phone: c.phone,
            consultation_type: c.consultation_type,
            requirements: c.requirements,
            submitted_at: c.submitted_at,
        }
    }
}

/// Login success body. The token and admin sit beside `success`, not under `data`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub admin: AdminSummary,
}
