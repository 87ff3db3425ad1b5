use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::{consultations, prelude::*};
use crate::models::consultation::{Consultation, ConsultationStatus, NewConsultation};

pub struct ConsultationRepository {
    conn: DatabaseConnection,
}

impl ConsultationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Consultation>> {
        let rows = Consultations::find()
            .order_by_desc(consultations::Column::SubmittedAt)
            .order_by_desc(consultations::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list consultations")?;

        rows.into_iter().map(Consultation::try_from).collect()
    }

    pub async fn insert(&self, input: &NewConsultation) -> Result<Consultation> {
        let active = consultations::ActiveModel {
            name: Set(input.name.clone()),
            email: Set(input.email.clone()),
            phone: Set(input.phone.clone()),
            consultation_type: Set(input.consultation_type.clone()),
            requirements: Set(input.requirements.clone()),
            status: Set(ConsultationStatus::Pending.as_str().to_string()),
            submitted_at: Set(super::timestamp()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert consultation")?;

        Consultation::try_from(model)
    }

    pub async fn update_status(
        &self,
        id: i32,
        status: ConsultationStatus,
    ) -> Result<Option<Consultation>> {
        let Some(model) = Consultations::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query consultation")?
        else {
            return Ok(None);
        };

        let mut active: consultations::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update consultation status")?;

        Consultation::try_from(model).map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Consultations::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete consultation")?;

        Ok(result.rows_affected > 0)
    }
}

impl TryFrom<consultations::Model> for Consultation {
    type Error = anyhow::Error;

    fn try_from(model: consultations::Model) -> Result<Self> {
        Ok(Self {
            id: model.id,
            status: model.status.parse()?,
            name: model.name,
            email: model.email,
            phone: model.phone,
            consultation_type: model.consultation_type,
            requirements: model.requirements,
            submitted_at: model.submitted_at,
        })
    }
}
