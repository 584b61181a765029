use std::{env, sync::Arc};

use crate::config::Config;

pub const DEFAULT_PORT: u16 = 3333;
pub const DEFAULT_IDENTITY_HEADER: &str = "x-rh-identity";

pub trait ConfigService: Send + Sync {
    fn port(&self) -> u16;
    fn values(&self) -> &Config;
}

pub struct ConfigServiceImpl {
    config: Arc<Config>,
}

impl ConfigServiceImpl {
    fn strip_wrapping_quotes(value: &str) -> &str {
        if value.len() >= 2 {
            let bytes = value.as_bytes();
            let first = bytes[0];
            let last = bytes[value.len() - 1];
            if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
                return &value[1..value.len() - 1];
            }
        }
        value
    }

    fn normalize(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = Self::strip_wrapping_quotes(trimmed).trim();
        if normalized.is_empty() {
            None
        } else {
            Some(normalized.to_string())
        }
    }

    fn env_nonempty(key: &str) -> Option<String> {
        env::var(key).ok().and_then(|value| Self::normalize(&value))
    }

    fn env_u16(key: &str) -> Option<u16> {
        Self::env_nonempty(key).and_then(|value| value.parse::<u16>().ok())
    }

    fn env_bool(key: &str, default: bool) -> bool {
        Self::env_nonempty(key)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(default)
    }

    pub fn new() -> Self {
        let port = Self::env_u16("PORT").unwrap_or(DEFAULT_PORT);
        let database_url = Self::env_nonempty("DATABASE_URL");
        let apply_schema = Self::env_bool("DB_APPLY_SCHEMA", true);
        let identity_header = Self::env_nonempty("IDENTITY_HEADER")
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_IDENTITY_HEADER.to_string());

        Self::from_config(Config {
            port,
            database_url,
            apply_schema,
            identity_header,
        })
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl Default for ConfigServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService for ConfigServiceImpl {
    fn port(&self) -> u16 {
        self.config.port
    }

    fn values(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_quotes_only() {
        assert_eq!(ConfigServiceImpl::strip_wrapping_quotes("\"abc\""), "abc");
        assert_eq!(ConfigServiceImpl::strip_wrapping_quotes("'abc'"), "abc");
        assert_eq!(ConfigServiceImpl::strip_wrapping_quotes("\"abc'"), "\"abc'");
        assert_eq!(ConfigServiceImpl::strip_wrapping_quotes("\""), "\"");
    }

    #[test]
    fn normalize_drops_blank_values() {
        assert_eq!(ConfigServiceImpl::normalize("   "), None);
        assert_eq!(ConfigServiceImpl::normalize(" \"  \" "), None);
        assert_eq!(
            ConfigServiceImpl::normalize("  'postgres://db/realms' "),
            Some("postgres://db/realms".to_string())
        );
    }

    #[test]
    fn from_config_exposes_values() {
        let service = ConfigServiceImpl::from_config(Config {
            port: 8080,
            database_url: None,
            apply_schema: false,
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
        });

        assert_eq!(service.port(), 8080);
        assert_eq!(service.values().identity_header, "x-rh-identity");
        assert!(!service.values().apply_schema);
    }
}
