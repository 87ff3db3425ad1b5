pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AdminSummary, AuthError, AuthService, LoginResult};
pub use auth_service_impl::SeaOrmAuthService;

pub mod property_service;
pub mod property_service_impl;
pub use property_service::{PropertyError, PropertyService};
pub use property_service_impl::SeaOrmPropertyService;

pub mod consultation_service;
pub mod consultation_service_impl;
pub use consultation_service::{ConsultationError, ConsultationService};
pub use consultation_service_impl::SeaOrmConsultationService;

pub mod token;

pub mod upload;
pub use upload::{UploadError, UploadPolicy, UploadStore};

pub mod sweep;
pub use sweep::{SweepStats, UploadSweeper};
