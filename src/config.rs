//! Service configuration parsed from environment variables.

use crate::handoff::DEFAULT_FALLBACK_DELAY_MS;
use crate::page::PageOptions;
use crate::target::{RedirectTarget, TargetError};

pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid RETURN_FALLBACK_MS (expected a positive integer): {0}")]
    InvalidFallbackDelay(String),
    #[error("invalid RETURN_DEFAULT_REDIRECT: {0}")]
    InvalidDefaultRedirect(#[from] TargetError),
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnConfig {
    pub port: u16,
    pub page: PageOptions,
    /// Used when a request carries no `redirect` parameter.
    pub default_redirect: Option<RedirectTarget>,
    /// Lowercased schemes a request may redirect to. Empty allows any.
    pub allowed_schemes: Vec<String>,
}

impl Default for ReturnConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, page: PageOptions::default(), default_redirect: None, allowed_schemes: Vec::new() }
    }
}

impl ReturnConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `RETURN_LOADING_UI`: default true
    /// - `RETURN_FALLBACK_MS`: default 2000
    /// - `RETURN_DEFAULT_REDIRECT`: unset means `redirect` is required
    /// - `RETURN_ALLOWED_SCHEMES`: comma-separated, unset allows any scheme
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a present value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let loading_ui = std::env::var("RETURN_LOADING_UI")
            .ok()
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(true);
        let fallback_delay_ms = parse_fallback_delay(std::env::var("RETURN_FALLBACK_MS").ok().as_deref())?;
        let default_redirect = std::env::var("RETURN_DEFAULT_REDIRECT")
            .ok()
            .map(|raw| RedirectTarget::parse(&raw))
            .transpose()?;
        let allowed_schemes = parse_schemes(std::env::var("RETURN_ALLOWED_SCHEMES").ok().as_deref());

        Ok(Self { port, page: PageOptions { loading_ui, fallback_delay_ms }, default_redirect, allowed_schemes })
    }

    /// Whether `scheme` (already lowercased) passes the allow-list.
    #[must_use]
    pub fn scheme_allowed(&self, scheme: &str) -> bool {
        self.allowed_schemes.is_empty() || self.allowed_schemes.iter().any(|s| s == scheme)
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidPort(v.to_owned())),
    }
}

fn parse_fallback_delay(raw: Option<&str>) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(DEFAULT_FALLBACK_DELAY_MS),
        Some(v) => match v.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Ok(ms),
            _ => Err(ConfigError::InvalidFallbackDelay(v.to_owned())),
        },
    }
}

fn parse_schemes(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().trim_end_matches(':').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
