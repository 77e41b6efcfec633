//! Settings loader supporting YAML, TOML, and JSON formats with
//! environment variable overrides.

use std::path::Path;

use crate::error::ConfigError;

use super::{ClientSettings, Theme};

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "FOLIO";

/// Supported settings file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml)
    #[default]
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "yaml" | "yml" => Some(Self::Yaml),
                "toml" => Some(Self::Toml),
                "json" => Some(Self::Json),
                _ => None,
            })
    }
}

/// Loads settings from a file, applies environment overrides, and
/// validates the result.
///
/// # Errors
///
/// Returns `ConfigError` when the file cannot be read or parsed, an
/// environment override is malformed, or validation fails.
pub fn load_settings(path: impl AsRef<Path>) -> Result<ClientSettings, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::InvalidFormat {
        path: path.display().to_string(),
        reason: "unrecognized file extension".to_string(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut settings = parse_settings(&content, format, path)?;
    apply_env_overrides(&mut settings)?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings like [`load_settings`], but a missing file falls back to
/// defaults (environment overrides and validation still apply).
///
/// # Errors
///
/// Returns `ConfigError` for any failure other than the file not existing.
pub fn load_settings_or_default(path: impl AsRef<Path>) -> Result<ClientSettings, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        return load_settings(path);
    }
    let mut settings = ClientSettings::default();
    apply_env_overrides(&mut settings)?;
    settings.validate()?;
    Ok(settings)
}

fn parse_settings(
    content: &str,
    format: ConfigFormat,
    path: &Path,
) -> Result<ClientSettings, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidFormat {
        path: path.display().to_string(),
        reason,
    };
    match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| invalid(e.to_string())),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| invalid(e.to_string())),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| invalid(e.to_string())),
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

fn apply_env_overrides(settings: &mut ClientSettings) -> Result<(), ConfigError> {
    if let Some(base_url) = env_var("BASE_URL") {
        settings.base_url = base_url;
    }
    if let Some(raw) = env_var("TIMEOUT_MS") {
        settings.timeout_ms = parse_env("FOLIO_TIMEOUT_MS", &raw)?;
    }
    if let Some(raw) = env_var("MAX_RETRIES") {
        settings.max_retries = parse_env("FOLIO_MAX_RETRIES", &raw)?;
    }
    if let Some(token_path) = env_var("TOKEN_PATH") {
        settings.token_path = token_path.into();
    }
    if let Some(raw) = env_var("THEME") {
        settings.theme = raw.parse::<Theme>()?;
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
