use std::env;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_POOL_SIZE: usize = 16;
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://openfarm.cc";

/// Runtime settings, read from the environment (and `.env` via dotenvy).
///
/// - `GARDEN_BIND_ADDR`: listen address (default `0.0.0.0:8080`)
/// - `DATABASE_URL`: PostgreSQL URL; unset means in-memory storage
/// - `GARDEN_DB_POOL_SIZE`: max pooled connections (default 16)
/// - `GARDEN_CORS_ORIGINS`: comma-separated allowed origins; empty allows any
/// - `GARDEN_IMAGE_BASE_URL`: host prefixed to relative plant image paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub pool_size: usize,
    pub cors_origins: Vec<String>,
    pub image_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            cors_origins: Vec::new(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            bind_addr: non_empty("GARDEN_BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: non_empty("DATABASE_URL"),
            pool_size: non_empty("GARDEN_DB_POOL_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.pool_size),
            cors_origins: non_empty("GARDEN_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            image_base_url: non_empty("GARDEN_IMAGE_BASE_URL").unwrap_or(defaults.image_base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        let cfg = config_from(&[
            ("GARDEN_BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "postgres://garden@localhost/garden"),
            ("GARDEN_DB_POOL_SIZE", "4"),
            ("GARDEN_CORS_ORIGINS", "https://a.example, https://b.example,"),
        ]);
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://garden@localhost/garden"));
        assert_eq!(cfg.pool_size, 4);
        assert_eq!(cfg.cors_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_invalid_pool_size_falls_back() {
        assert_eq!(config_from(&[("GARDEN_DB_POOL_SIZE", "zero")]).pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config_from(&[("GARDEN_DB_POOL_SIZE", "0")]).pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config_from(&[("DATABASE_URL", "  ")]).database_url, None);
    }
}
