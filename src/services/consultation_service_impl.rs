//! `SeaORM` implementation of the `ConsultationService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::models::consultation::Consultation;
use crate::services::consultation_service::{
    ConsultationError, ConsultationService, FormKind, IntakeForm, parse_status,
};

pub struct SeaOrmConsultationService {
    store: Store,
}

impl SeaOrmConsultationService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ConsultationService for SeaOrmConsultationService {
    async fn submit(
        &self,
        kind: FormKind,
        form: IntakeForm,
    ) -> Result<Consultation, ConsultationError> {
        let input = kind.normalize(&form)?;
        let consultation = self.store.add_consultation(&input).await?;

        info!(
            consultation_id = consultation.id,
            kind = ?kind,
            "Consultation request received"
        );

        Ok(consultation)
    }

    async fn list(&self) -> Result<Vec<Consultation>, ConsultationError> {
        Ok(self.store.list_consultations().await?)
    }

    async fn update_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<Consultation, ConsultationError> {
        let status = parse_status(status)?;

        self.store
            .update_consultation_status(id, status)
            .await?
            .ok_or(ConsultationError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), ConsultationError> {
        if self.store.remove_consultation(id).await? {
            Ok(())
        } else {
            Err(ConsultationError::NotFound)
        }
    }
}
