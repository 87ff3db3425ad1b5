use axum::{
    Json,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::StatusCode,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::validation::{ApiJson, is_json, parse_id};
use super::{ApiError, ApiResponse, AppState, PropertyDto};
use crate::constants::uploads::FIELD_NAME;
use crate::services::property_service::{PropertyForm, SearchQuery};
use crate::services::upload::{StagedFile, UploadError, UploadPolicy};

type PropertyList = Json<ApiResponse<Vec<PropertyDto>>>;

fn to_dtos(properties: Vec<crate::models::property::Property>) -> PropertyList {
    Json(ApiResponse::success(
        properties.into_iter().map(PropertyDto::from).collect(),
    ))
}

fn property_id(raw: &str) -> Result<i32, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::NotFound("Property not found".to_string()))
}

/// GET /properties
pub async fn list_properties(State(state): State<Arc<AppState>>) -> Result<PropertyList, ApiError> {
    Ok(to_dtos(state.property_service().list().await?))
}

/// GET /properties/featured
pub async fn list_featured(State(state): State<Arc<AppState>>) -> Result<PropertyList, ApiError> {
    Ok(to_dtos(state.property_service().list_featured().await?))
}

/// GET /properties/category/{category}
pub async fn list_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<PropertyList, ApiError> {
    Ok(to_dtos(
        state.property_service().list_by_category(&category).await?,
    ))
}

/// GET /properties/search
pub async fn search_properties(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<PropertyList, ApiError> {
    Ok(to_dtos(state.property_service().search(query).await?))
}

/// GET /properties/{id}
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PropertyDto>>, ApiError> {
    let property = state.property_service().get(property_id(&id)?).await?;
    Ok(Json(ApiResponse::success(property.into())))
}

/// POST /properties
pub async fn create_property(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PropertyDto>>), ApiError> {
    let (form, files) = read_property_form(multipart, state.upload_policy()).await?;
    let property = state.property_service().create(form, files).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Property created successfully!",
            property.into(),
        )),
    ))
}

/// PUT /properties/{id}
/// Accepts multipart (optionally with new images) or a plain JSON object.
pub async fn update_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<ApiResponse<PropertyDto>>, ApiError> {
    let id = property_id(&id)?;

    let (form, files) = if is_json(request.headers()) {
        let ApiJson(body) = ApiJson::<Map<String, Value>>::from_request(request, &state).await?;
        (PropertyForm::from_json(body), Vec::new())
    } else {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| UploadError::Malformed(e.body_text()))?;
        read_property_form(multipart, state.upload_policy()).await?
    };

    let property = state.property_service().update(id, form, files).await?;

    Ok(Json(ApiResponse::with_message(
        "Property updated successfully!",
        property.into(),
    )))
}

/// DELETE /properties/{id}
pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.property_service().delete(property_id(&id)?).await?;
    Ok(Json(ApiResponse::message("Property deleted successfully")))
}

/// Drains the multipart body into text fields and in-memory image files.
/// Every file is checked for count, type and size before the body is accepted,
/// so a rejected request never reaches the disk.
async fn read_property_form(
    mut multipart: Multipart,
    policy: UploadPolicy,
) -> Result<(PropertyForm, Vec<StagedFile>), ApiError> {
    let mut form = PropertyForm::default();
    let mut files = Vec::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let value = field
                .text()
                .await
                .map_err(|e| UploadError::Malformed(e.body_text()))?;
            form.insert(name, value);
            continue;
        };

        // Browsers post an empty file part when no image was picked.
        if file_name.is_empty() {
            continue;
        }

        if name != FIELD_NAME {
            return Err(UploadError::Malformed(format!("Unexpected field {name}")).into());
        }

        policy.check_count(files.len() + 1)?;
        let extension = policy.check_type(&file_name, field.content_type())?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| UploadError::Malformed(e.body_text()))?
        {
            policy.check_size(bytes.len() + chunk.len())?;
            bytes.extend_from_slice(&chunk);
        }

        files.push(StagedFile {
            original_name: file_name,
            extension,
            bytes,
        });
    }

    Ok((form, files))
}
