//! Process-wide client settings and their owning store.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ALLOWED_RETRY_COUNTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS,
};
use crate::error::SettingsError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

/// Client settings.
///
/// Field names follow the settings panel (`timeoutMs`, `autoFormat`, ...);
/// missing fields deserialize to their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(alias = "timeout")]
    pub timeout_ms: u64,
    pub auto_format: bool,
    pub show_headers: bool,
    pub follow_redirects: bool,
    #[serde(rename = "validateSSL")]
    pub validate_ssl: bool,
    pub max_retries: u8,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            auto_format: true,
            show_headers: true,
            follow_redirects: true,
            validate_ssl: true,
            max_retries: DEFAULT_MAX_RETRIES,
            theme: Theme::Auto,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(SettingsError::TimeoutOutOfRange {
                value: self.timeout_ms,
                min: MIN_TIMEOUT_MS,
                max: MAX_TIMEOUT_MS,
            });
        }
        if !ALLOWED_RETRY_COUNTS.contains(&self.max_retries) {
            return Err(SettingsError::UnsupportedRetryCount(self.max_retries));
        }
        Ok(())
    }
}

/// Owns the current settings value: init, replace-on-save, reset.
#[derive(Clone, Debug, Default)]
pub struct SettingsStore {
    current: Settings,
}

impl SettingsStore {
    pub fn new() -> Self {
        SettingsStore::default()
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Rejected settings leave the store untouched.
    pub fn replace(&mut self, settings: Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        tracing::info!(?settings, "Settings replaced");
        self.current = settings;
        Ok(())
    }

    pub fn reset(&mut self) {
        tracing::info!("Settings reset to defaults");
        self.current = Settings::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.timeout_ms, 5000);
        assert!(settings.auto_format);
        assert!(settings.show_headers);
        assert!(settings.follow_redirects);
        assert!(settings.validate_ssl);
        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.theme, Theme::Auto);
    }

    #[test]
    fn test_replace_rejects_invalid_values() {
        let mut store = SettingsStore::new();

        let too_fast = Settings {
            timeout_ms: 500,
            ..Settings::default()
        };
        assert!(matches!(
            store.replace(too_fast),
            Err(SettingsError::TimeoutOutOfRange { value: 500, .. })
        ));

        let four_retries = Settings {
            max_retries: 4,
            ..Settings::default()
        };
        assert_eq!(
            store.replace(four_retries),
            Err(SettingsError::UnsupportedRetryCount(4))
        );

        assert_eq!(store.current(), &Settings::default());
    }

    #[test]
    fn test_replace_then_reset() {
        let mut store = SettingsStore::new();
        let custom = Settings {
            timeout_ms: 60_000,
            auto_format: false,
            max_retries: 5,
            theme: Theme::Dark,
            ..Settings::default()
        };
        store.replace(custom.clone()).unwrap();
        assert_eq!(store.current(), &custom);

        store.reset();
        assert_eq!(store.current(), &Settings::default());
    }

    #[test]
    fn test_deserialize_partial_document() {
        let settings: Settings =
            serde_json::from_str(r#"{"timeout": 10000, "validateSSL": false, "theme": "light"}"#)
                .unwrap();
        assert_eq!(settings.timeout_ms, 10_000);
        assert!(!settings.validate_ssl);
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.auto_format);
        assert_eq!(settings.max_retries, 3);
    }
}
