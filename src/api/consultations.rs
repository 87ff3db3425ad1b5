use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{ApiJson, parse_id};
use super::{ApiError, ApiResponse, AppState, ConsultationDto};
use crate::services::consultation_service::{FormKind, IntakeForm};

type Created = (StatusCode, Json<ApiResponse<ConsultationDto>>);

#[derive(Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
}

fn consultation_id(raw: &str) -> Result<i32, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::NotFound("Consultation not found".to_string()))
}

async fn submit(state: &AppState, kind: FormKind, form: IntakeForm) -> Result<Created, ApiError> {
    let consultation = state.consultation_service().submit(kind, form).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            kind.success_message(),
            consultation.into(),
        )),
    ))
}

/// POST /consultations and /consultations/consultation
pub async fn submit_general(
    State(state): State<Arc<AppState>>,
    ApiJson(form): ApiJson<IntakeForm>,
) -> Result<Created, ApiError> {
    submit(&state, FormKind::General, form).await
}

/// POST /consultations/contact
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ApiJson(form): ApiJson<IntakeForm>,
) -> Result<Created, ApiError> {
    submit(&state, FormKind::Contact, form).await
}

/// POST /consultations/viewing
pub async fn submit_viewing(
    State(state): State<Arc<AppState>>,
    ApiJson(form): ApiJson<IntakeForm>,
) -> Result<Created, ApiError> {
    submit(&state, FormKind::Viewing, form).await
}

/// POST /consultations/service
pub async fn submit_service(
    State(state): State<Arc<AppState>>,
    ApiJson(form): ApiJson<IntakeForm>,
) -> Result<Created, ApiError> {
    submit(&state, FormKind::Service, form).await
}

/// GET /consultations
pub async fn list_consultations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ConsultationDto>>>, ApiError> {
    let consultations = state.consultation_service().list().await?;

    Ok(Json(ApiResponse::success(
        consultations.into_iter().map(ConsultationDto::from).collect(),
    )))
}

/// PUT /consultations/{id}/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<StatusUpdate>,
) -> Result<Json<ApiResponse<ConsultationDto>>, ApiError> {
    let consultation = state
        .consultation_service()
        .update_status(consultation_id(&id)?, &payload.status)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Consultation status updated successfully",
        consultation.into(),
    )))
}

/// DELETE /consultations/{id}
pub async fn delete_consultation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .consultation_service()
        .delete(consultation_id(&id)?)
        .await?;

    Ok(Json(ApiResponse::message("Consultation deleted successfully")))
}
