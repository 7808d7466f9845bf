//! Configuration module
//!
//! Everything is resolved from the environment once at startup.
//! Missing credentials are not fatal: the selector opens anyway and
//! reports the failed fetch through a notification.

use crate::error::{AppError, AppResult};
use log::info;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// How the authorizer obtains a bearer token.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    /// A ready-made access token, used as is.
    AccessToken(String),
    /// OAuth2 refresh-token grant against Google's token endpoint.
    RefreshToken {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
    None,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub credentials: CredentialSource,
    pub api_base: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let db_path = non_empty_var("CALPICKER_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let credentials = if let Some(token) = non_empty_var("GOOGLE_ACCESS_TOKEN") {
            CredentialSource::AccessToken(token)
        } else {
            match (
                non_empty_var("GOOGLE_CLIENT_ID"),
                non_empty_var("GOOGLE_CLIENT_SECRET"),
                non_empty_var("GOOGLE_REFRESH_TOKEN"),
            ) {
                (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                    CredentialSource::RefreshToken {
                        client_id,
                        client_secret,
                        refresh_token,
                    }
                }
                _ => CredentialSource::None,
            }
        };

        let api_base = non_empty_var("GOOGLE_CALENDAR_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Self {
            db_path,
            credentials,
            api_base,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("calpicker").join("preferences.db"))
        .unwrap_or_else(|| PathBuf::from("calpicker.db"))
}

/// Validates the resolved configuration
///
/// # Returns
///
/// * `Ok(())` - a credential source is present and the API base parses
/// * `Err(AppError::Config)` - otherwise
///
pub fn validate_config(config: &AppConfig) -> AppResult<()> {
    info!("Validating configuration (database: {})", config.db_path.display());

    let base = url::Url::parse(&config.api_base)
        .map_err(|e| AppError::config(format!("Invalid calendar API base '{}': {}", config.api_base, e)))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(AppError::config(format!(
            "Calendar API base must be http(s), got '{}'",
            base.scheme()
        )));
    }

    if config.credentials == CredentialSource::None {
        return Err(AppError::config(
            "No Google credentials configured. Set GOOGLE_ACCESS_TOKEN or GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REFRESH_TOKEN",
        ));
    }

    Ok(())
}
