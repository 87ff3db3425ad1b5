pub mod prelude;

pub mod admins;
pub mod consultations;
pub mod properties;
