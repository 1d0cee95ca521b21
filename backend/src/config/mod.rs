//! Central module for application-wide configuration settings.
//!
//! Configuration is read from the environment: the bind address, the shared
//! admin secret, and the optional Google Sheets connection. When the sheet
//! settings are incomplete the service falls back to the in-memory store.

use std::env;

use clubreg_adapters::google::{GoogleSheetsConnection, DEFAULT_API_BASE};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CLUBREG_ADMIN_SECRET must be set and non-empty")]
    MissingAdminSecret,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub admin_secret: String,
    pub sheet: Option<GoogleSheetsConnection>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_secret = env::var("CLUBREG_ADMIN_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingAdminSecret)?;

        let bind_addr =
            env::var("CLUBREG_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let sheet = match (env::var("CLUBREG_SHEET_ID"), env::var("CLUBREG_SHEET_TOKEN")) {
            (Ok(spreadsheet_id), Ok(token))
                if !spreadsheet_id.is_empty() && !token.is_empty() =>
            {
                Some(GoogleSheetsConnection {
                    spreadsheet_id,
                    sheet_name: env::var("CLUBREG_SHEET_NAME")
                        .unwrap_or_else(|_| DEFAULT_SHEET_NAME.to_string()),
                    token,
                    api_base: env::var("CLUBREG_SHEET_API")
                        .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                })
            }
            _ => None,
        };

        Ok(Self {
            bind_addr,
            admin_secret,
            sheet,
        })
    }
}
