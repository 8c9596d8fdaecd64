//! Stockroom - Application entry point
//!
//! CLI-based entry point that dispatches to the user and product commands.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::AppConfig;

use crate::cli::{Cli, Commands};

fn main() {
    // Load .env before clap reads its env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    let mut config = AppConfig::from_env();
    if let Some(path) = cli.users_db {
        config.storage.users_path = path;
    }
    if let Some(path) = cli.products_db {
        config.storage.products_path = path;
    }
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Register(args) => commands::users::register(args, &config),
        Commands::Login(args) => commands::users::login(args, &config),
        Commands::ForgotPassword { email } => commands::users::forgot_password(&email, &config),
        Commands::Employee(args) => commands::employees::execute(args, &config),
        Commands::Product(args) => commands::products::execute(args, &config),
    };

    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
