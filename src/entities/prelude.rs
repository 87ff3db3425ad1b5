pub use super::admins::Entity as Admins;
pub use super::consultations::Entity as Consultations;
pub use super::properties::Entity as Properties;
