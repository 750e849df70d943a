//! Environment-driven settings and tracing setup.

use crate::error::ConfigError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Level for this crate's events when `RUST_LOG` is unset.
    pub log_level: String,
    pub default_page_size: u32,
    /// JSON file of serializer configs, if serializers are declared as data.
    pub serializers_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: "info".into(),
            default_page_size: DEFAULT_PAGE_SIZE,
            serializers_path: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);
        let default_page_size = match lookup("DEFAULT_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Load(format!(
                        "DEFAULT_PAGE_SIZE must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => defaults.default_page_size,
        };
        let serializers_path = lookup("SERIALIZERS_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Ok(Settings {
            log_level,
            default_page_size,
            serializers_path,
        })
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG`, else `crud_starter=<log_level>`.
/// A second call is a no-op.
pub fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crud_starter={}", settings.log_level)));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Settings::from_lookup(lookup(&[])).unwrap(), Settings::default());
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("LOG_LEVEL", "debug"),
            ("DEFAULT_PAGE_SIZE", "20"),
            ("SERIALIZERS_PATH", "config/serializers.json"),
        ]))
        .unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.default_page_size, 20);
        assert_eq!(settings.serializers_path, Some(PathBuf::from("config/serializers.json")));
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = Settings::from_lookup(lookup(&[("DEFAULT_PAGE_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        assert!(Settings::from_lookup(lookup(&[("DEFAULT_PAGE_SIZE", "ten")])).is_err());
    }

    #[test]
    fn init_tracing_twice_is_harmless() {
        let settings = Settings::default();
        init_tracing(&settings);
        init_tracing(&settings);
    }
}
