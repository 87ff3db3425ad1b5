mod seed_admin;
mod sweep;
mod update_admin;

pub use seed_admin::cmd_seed_admin;
pub use sweep::cmd_sweep_uploads;
pub use update_admin::cmd_update_admin;
