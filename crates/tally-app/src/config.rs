//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

use serde::Serialize;
use tally_core::PricingPolicy;

/// Handler and logging configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// `tracing` filter directive (`TALLY_LOG`)
    pub log_filter: String,

    /// Whether item quantities are checked up front or left to the discount pass
    pub pricing_policy: PricingPolicy,

    /// Page size used when a list query does not name one
    pub default_page_size: u32,

    /// Largest page size a list query may ask for
    pub max_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_filter: "info".to_string(),
            pricing_policy: PricingPolicy::Atomic,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name: &str| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let config = AppConfig {
            log_filter: lookup("TALLY_LOG").unwrap_or(defaults.log_filter),

            pricing_policy: match lookup("TALLY_PRICING_POLICY") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("TALLY_PRICING_POLICY".to_string()))?,
                None => defaults.pricing_policy,
            },

            default_page_size: parse_page_size(
                &lookup,
                "TALLY_DEFAULT_PAGE_SIZE",
                defaults.default_page_size,
            )?,

            max_page_size: parse_page_size(&lookup, "TALLY_MAX_PAGE_SIZE", defaults.max_page_size)?,
        };

        if config.default_page_size > config.max_page_size {
            return Err(ConfigError::Inconsistent(format!(
                "TALLY_DEFAULT_PAGE_SIZE ({}) exceeds TALLY_MAX_PAGE_SIZE ({})",
                config.default_page_size, config.max_page_size
            )));
        }

        Ok(config)
    }
}

fn parse_page_size<F>(lookup: &F, name: &str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Inconsistent configuration: {0}")]
    Inconsistent(String),
}
