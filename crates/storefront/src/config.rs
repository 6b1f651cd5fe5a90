//! Storefront configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use vitashop_observability::LogFormat;

use crate::notify::DEFAULT_DISPLAY;
use crate::storage::default_sqlite_path;

pub const ENV_PERSIST_CART: &str = "VITASHOP_PERSIST_CART";
pub const ENV_STORAGE: &str = "VITASHOP_STORAGE";
pub const ENV_DATA_DIR: &str = "VITASHOP_DATA_DIR";
pub const ENV_API_URL: &str = "VITASHOP_API_URL";
pub const ENV_NOTIFICATION_MS: &str = "VITASHOP_NOTIFICATION_MS";
pub const ENV_LOG_FORMAT: &str = "VITASHOP_LOG_FORMAT";

const STORAGE_FILE: &str = "storage.db";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("no data directory available for {key}")]
    NoDataDir { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub persist_cart: bool,
    pub storage: StorageBackend,
    pub api_url: Option<String>,
    pub notification_display: Duration,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            persist_cart: false,
            storage: StorageBackend::Memory,
            api_url: None,
            notification_display: DEFAULT_DISPLAY,
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let persist_cart = match lookup(ENV_PERSIST_CART) {
            Some(raw) => parse_bool(ENV_PERSIST_CART, &raw)?,
            None => defaults.persist_cart,
        };

        let storage = match lookup(ENV_STORAGE).as_deref().map(str::trim) {
            None | Some("memory") => StorageBackend::Memory,
            Some("sqlite") => {
                let path = match lookup(ENV_DATA_DIR) {
                    Some(dir) => PathBuf::from(dir).join(STORAGE_FILE),
                    None => default_sqlite_path().map_err(|err| {
                        tracing::warn!(
                            error = %format!("{err:#}"),
                            "cannot resolve default data directory"
                        );
                        ConfigError::NoDataDir { key: ENV_DATA_DIR }
                    })?,
                };
                StorageBackend::Sqlite { path }
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: ENV_STORAGE,
                    value: other.to_string(),
                });
            }
        };

        if persist_cart && storage == StorageBackend::Memory {
            tracing::warn!(
                "cart persistence enabled with memory storage; the cart will not survive restarts"
            );
        }

        let api_url = lookup(ENV_API_URL).filter(|url| !url.trim().is_empty());

        let notification_display = match lookup(ENV_NOTIFICATION_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    key: ENV_NOTIFICATION_MS,
                    value: raw,
                })?,
            None => defaults.notification_display,
        };

        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|_| ConfigError::Invalid {
                key: ENV_LOG_FORMAT,
                value: raw,
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            persist_cart,
            storage,
            api_url,
            notification_display,
            log_format,
        })
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
    }
}
