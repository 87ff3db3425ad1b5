//! Domain service for consultation requests.
//!
//! Every public form (general consultation, contact, viewing, service) goes
//! through one intake path parameterized by [`FormKind`].

use serde::Deserialize;
use thiserror::Error;

use crate::constants::consultation::{DEFAULT_TYPE, PHONE_NOT_PROVIDED, VIEWING_TYPE};
use crate::models::UnknownVariant;
use crate::models::consultation::{Consultation, ConsultationStatus, NewConsultation};

#[derive(Debug, Error)]
pub enum ConsultationError {
    #[error("Consultation not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ConsultationError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ConsultationError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<UnknownVariant> for ConsultationError {
    fn from(err: UnknownVariant) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Union of the fields the public forms post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntakeForm {
    #[serde(deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub consultation_type: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub requirements: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub subject: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub message: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub preferred_date: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub property_id: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub property_title: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub service_required: Option<String>,
}

/// Accepts a JSON string, number or boolean as text. `null` counts as absent.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(value.to_string())),
        Some(_) => Err(serde::de::Error::custom("expected a string")),
    }
}

/// Trimmed value, or `None` when absent or blank.
fn filled(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    General,
    Contact,
    Viewing,
    Service,
}

impl FormKind {
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::General => &["name", "email", "phone"],
            Self::Contact => &["firstName", "lastName", "email", "phone", "subject", "message"],
            Self::Viewing => &["name", "email", "phone", "preferredDate"],
            Self::Service => &["name", "email", "serviceRequired"],
        }
    }

    #[must_use]
    pub const fn missing_fields_message(self) -> &'static str {
        match self {
            Self::General => "Name, email, and phone are required",
            Self::Contact => "All fields are required",
            Self::Viewing => "Name, email, phone, and preferred date are required",
            Self::Service => "Name, email, and service required are mandatory",
        }
    }

    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::General => "Consultation request submitted successfully!",
            Self::Contact => "Message sent successfully! We will get back to you soon.",
            Self::Viewing => {
                "Viewing request submitted successfully! We will contact you to confirm the appointment."
            }
            Self::Service => {
                "Service consultation request submitted successfully! We will contact you soon."
            }
        }
    }

    /// Validates `form` for this kind and maps it onto a consultation record.
    pub fn normalize(self, form: &IntakeForm) -> Result<NewConsultation, ConsultationError> {
        let field = |name: &str| {
            let value = match name {
                "name" => form.name.as_ref(),
                "email" => form.email.as_ref(),
                "phone" => form.phone.as_ref(),
                "firstName" => form.first_name.as_ref(),
                "lastName" => form.last_name.as_ref(),
                "subject" => form.subject.as_ref(),
                "message" => form.message.as_ref(),
                "preferredDate" => form.preferred_date.as_ref(),
                "serviceRequired" => form.service_required.as_ref(),
                _ => None,
            };
            filled(value)
        };

        if self.required_fields().iter().any(|name| field(name).is_none()) {
            return Err(ConsultationError::Validation(
                self.missing_fields_message().to_string(),
            ));
        }
        let required = |name: &str| field(name).unwrap_or_default();

        let consultation = match self {
            Self::General => NewConsultation {
                name: required("name"),
                email: required("email"),
                phone: required("phone"),
                consultation_type: filled(form.consultation_type.as_ref())
                    .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
                requirements: filled(form.requirements.as_ref()).unwrap_or_default(),
            },
            Self::Contact => NewConsultation {
                name: format!("{} {}", required("firstName"), required("lastName")),
                email: required("email"),
                phone: required("phone"),
                consultation_type: required("subject"),
                requirements: required("message"),
            },
            Self::Viewing => NewConsultation {
                name: required("name"),
                email: required("email"),
                phone: required("phone"),
                consultation_type: VIEWING_TYPE.to_string(),
                requirements: format!(
                    "Property: {}\nPreferred Date: {}\nMessage: {}",
                    filled(form.property_title.as_ref()).unwrap_or_else(|| "N/A".to_string()),
                    required("preferredDate"),
                    filled(form.message.as_ref())
                        .unwrap_or_else(|| "No additional message".to_string()),
                ),
            },
            Self::Service => NewConsultation {
                name: required("name"),
                email: required("email"),
                phone: PHONE_NOT_PROVIDED.to_string(),
                consultation_type: required("serviceRequired"),
                requirements: filled(form.message.as_ref())
                    .unwrap_or_else(|| "No additional requirements specified".to_string()),
            },
        };

        Ok(consultation)
    }
}

/// Domain service trait for consultation requests.
#[async_trait::async_trait]
pub trait ConsultationService: Send + Sync {
    /// Validates and stores a public form submission.
    ///
    /// # Errors
    ///
    /// Returns [`ConsultationError::Validation`] with the form's message when a
    /// required field is missing; nothing is stored in that case.
    async fn submit(
        &self,
        kind: FormKind,
        form: IntakeForm,
    ) -> Result<Consultation, ConsultationError>;

    /// All requests, most recently submitted first.
    async fn list(&self) -> Result<Vec<Consultation>, ConsultationError>;

    async fn update_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<Consultation, ConsultationError>;

    async fn delete(&self, id: i32) -> Result<(), ConsultationError>;
}

/// Parses an admin-supplied status string.
pub fn parse_status(raw: &str) -> Result<ConsultationStatus, ConsultationError> {
    Ok(raw.trim().parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_general_defaults() {
        let form = IntakeForm {
            name: s("Sara"),
            email: s("sara@example.com"),
            phone: s("0300"),
            ..IntakeForm::default()
        };

        let c = FormKind::General.normalize(&form).unwrap();
        assert_eq!(c.consultation_type, "General Consultation");
        assert_eq!(c.requirements, "");
    }

    #[test]
    fn test_contact_joins_names() {
        let form = IntakeForm {
            first_name: s("Ali"),
            last_name: s("Khan"),
            email: s("ali@example.com"),
            phone: s("0300"),
            subject: s("Pricing"),
            message: s("Call me"),
            ..IntakeForm::default()
        };

        let c = FormKind::Contact.normalize(&form).unwrap();
        assert_eq!(c.name, "Ali Khan");
        assert_eq!(c.consultation_type, "Pricing");
        assert_eq!(c.requirements, "Call me");
    }

    #[test]
    fn test_viewing_requirements_text() {
        let form = IntakeForm {
            name: s("Sara"),
            email: s("sara@example.com"),
            phone: s("0300"),
            preferred_date: s("2026-11-02"),
            ..IntakeForm::default()
        };

        let c = FormKind::Viewing.normalize(&form).unwrap();
        assert_eq!(c.consultation_type, "Property Viewing");
        assert_eq!(
            c.requirements,
            "Property: N/A\nPreferred Date: 2026-11-02\nMessage: No additional message"
        );
    }

    #[test]
    fn test_service_has_no_phone() {
        let form = IntakeForm {
            name: s("Sara"),
            email: s("sara@example.com"),
            service_required: s("Legal"),
            ..IntakeForm::default()
        };

        let c = FormKind::Service.normalize(&form).unwrap();
        assert_eq!(c.phone, "Not provided");
        assert_eq!(c.consultation_type, "Legal");
        assert_eq!(c.requirements, "No additional requirements specified");
    }

    #[test]
    fn test_blank_fields_are_missing() {
        let form = IntakeForm {
            name: s("Sara"),
            email: s("   "),
            phone: s("0300"),
            ..IntakeForm::default()
        };

        for kind in [FormKind::General, FormKind::Contact, FormKind::Viewing, FormKind::Service] {
            let err = kind.normalize(&form).unwrap_err();
            assert_eq!(err.to_string(), kind.missing_fields_message());
        }
    }

    #[test]
    fn test_intake_form_accepts_numbers() {
        let form: IntakeForm = serde_json::from_value(serde_json::json!({
            "name": "Sara",
            "email": "sara@example.com",
            "phone": 3_001_234_567_u64,
            "preferredDate": null
        }))
        .unwrap();

        assert_eq!(form.phone.as_deref(), Some("3001234567"));
        assert_eq!(form.preferred_date, None);
        assert_eq!(FormKind::General.normalize(&form).unwrap().phone, "3001234567");

        let nested = serde_json::from_value::<IntakeForm>(serde_json::json!({
            "name": { "first": "Sara" }
        }));
        assert!(nested.is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("completed").unwrap(), ConsultationStatus::Completed);
        assert_eq!(
            parse_status("archived").unwrap_err().to_string(),
            "Invalid status: archived"
        );
    }
}
