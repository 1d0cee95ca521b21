//! Main entry point for the clubreg backend.
//!
//! This file initializes the Axum web server, selects the spreadsheet store
//! backend, and registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall structure.

mod api;
mod auth;
mod config;
mod errors;
mod export;
mod services;

use std::sync::Arc;

use clubreg_adapters::{GoogleSheetsStore, InMemorySheetStore, SheetStore};

use crate::auth::SharedSecretAuthenticator;
use crate::config::Config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn SheetStore> = match config.sheet.clone() {
        Some(conn) => {
            tracing::info!(spreadsheet_id = %conn.spreadsheet_id, "using Google Sheets store");
            Arc::new(GoogleSheetsStore::new(conn))
        }
        None => {
            tracing::warn!("no sheet configured; registrations go to an in-memory store");
            Arc::new(InMemorySheetStore::new())
        }
    };

    let authenticator = Arc::new(SharedSecretAuthenticator::new(config.admin_secret.clone()));
    let app = api::app(store, authenticator);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("cannot bind {}: {err}", config.bind_addr);
            std::process::exit(1);
        }
    };
    tracing::info!("listening on {}", config.bind_addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {err}");
        std::process::exit(1);
    }
}
