//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `VITRINA_CATALOG_PATH` - Catalogue YAML file (default: catalog.yaml)
//! - `VITRINA_STORAGE_PATH` - Key-value store file (default: .vitrina/storage.json)
//! - `VITRINA_CURRENCY` - Display currency: EUR, USD, GBP or CLP (default: EUR)
//! - `VITRINA_CHECKOUT_PHONE` - Messaging destination for orders
//! - `VITRINA_CHECKOUT_BASE_URL` - Deep-link base (default: <https://wa.me>)
//! - `VITRINA_SEARCH_DEBOUNCE_MS` - Search-as-you-type delay (default: 150)
//! - `VITRINA_SEARCH_HISTORY_LIMIT` - Recent searches kept, 1-100 (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use vitrina_core::{CurrencyCode, PhoneNumber};

use crate::checkout::CheckoutDestination;

const DEFAULT_CATALOG_PATH: &str = "catalog.yaml";
const DEFAULT_STORAGE_PATH: &str = ".vitrina/storage.json";
const DEFAULT_CHECKOUT_BASE_URL: &str = "https://wa.me";
const DEFAULT_DEBOUNCE_MS: u64 = 150;
const DEFAULT_HISTORY_LIMIT: usize = 10;
const MAX_HISTORY_LIMIT: usize = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalogue YAML file
    pub catalog_path: PathBuf,
    /// Key-value store file (cart snapshot and search history)
    pub storage_path: PathBuf,
    /// Currency used for rounding and display
    pub currency: CurrencyCode,
    /// Where checkout messages go; `None` disables checkout
    pub checkout: Option<CheckoutDestination>,
    /// Search tuning
    pub search: SearchConfig,
}

/// Search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Delay after the last keystroke before searching
    pub debounce: Duration,
    /// Number of recent search terms kept
    pub history_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            currency: CurrencyCode::default(),
            checkout: None,
            search: SearchConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = PathBuf::from(get_env_or_default(
            &lookup,
            "VITRINA_CATALOG_PATH",
            DEFAULT_CATALOG_PATH,
        ));
        let storage_path = PathBuf::from(get_env_or_default(
            &lookup,
            "VITRINA_STORAGE_PATH",
            DEFAULT_STORAGE_PATH,
        ));

        let currency = get_env_or_default(&lookup, "VITRINA_CURRENCY", "EUR")
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINA_CURRENCY".to_string(), e.to_string())
            })?;

        let checkout = checkout_from_lookup(&lookup)?;
        let search = SearchConfig::from_lookup(&lookup)?;

        Ok(Self {
            catalog_path,
            storage_path,
            currency,
            checkout,
            search,
        })
    }
}

impl SearchConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let debounce_ms = get_optional_env(lookup, "VITRINA_SEARCH_DEBOUNCE_MS")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "VITRINA_SEARCH_DEBOUNCE_MS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        let history_limit = get_optional_env(lookup, "VITRINA_SEARCH_HISTORY_LIMIT")
            .map(|raw| parse_history_limit(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        Ok(Self {
            debounce: Duration::from_millis(debounce_ms),
            history_limit,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional_env<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn checkout_from_lookup<F>(lookup: &F) -> Result<Option<CheckoutDestination>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw_phone) = get_optional_env(lookup, "VITRINA_CHECKOUT_PHONE") else {
        return Ok(None);
    };

    let phone = PhoneNumber::parse(&raw_phone).map_err(|e| {
        ConfigError::InvalidEnvVar("VITRINA_CHECKOUT_PHONE".to_string(), e.to_string())
    })?;

    let base_url =
        get_env_or_default(lookup, "VITRINA_CHECKOUT_BASE_URL", DEFAULT_CHECKOUT_BASE_URL);
    validate_base_url(&base_url)?;

    Ok(Some(CheckoutDestination::new(base_url, phone)))
}

/// Deep links must be absolute http(s) URLs.
fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => Err(ConfigError::InvalidEnvVar(
            "VITRINA_CHECKOUT_BASE_URL".to_string(),
            format!("expected an http(s) URL, got '{url}'"),
        )),
    }
}

fn parse_history_limit(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("VITRINA_SEARCH_HISTORY_LIMIT".to_string(), reason)
    };

    let limit = raw.trim().parse::<usize>().map_err(|e| invalid(e.to_string()))?;
    if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(invalid(format!(
            "must be between 1 and {MAX_HISTORY_LIMIT} (got {limit})"
        )));
    }
    Ok(limit)
}
