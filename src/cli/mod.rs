//! Operator command line.

mod commands;

use clap::{Parser, Subcommand};

/// Sharjah Properties - listings and consultation backend
#[derive(Parser)]
#[command(name = "sharjah")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create the admin account
    SeedAdmin {
        #[arg(long, default_value = crate::constants::admin::DEFAULT_EMAIL)]
        email: String,

        #[arg(long, default_value = crate::constants::admin::DEFAULT_PASSWORD)]
        password: String,
    },

    /// Change the admin email and password (interactive)
    UpdateAdmin,

    /// Delete upload files no property references
    SweepUploads,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
