//! Configuration management.
//!
//! Client settings load from a YAML, TOML, or JSON file (format detected
//! by extension), then `FOLIO_`-prefixed environment variables override
//! individual fields, then the result is validated. Sensitive state (the
//! bearer token) lives in its own file referenced by `token_path`, not in
//! the settings file.

mod loader;
mod settings;

pub use loader::{ConfigFormat, load_settings, load_settings_or_default};
pub use settings::{ClientSettings, Theme};
