use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file path, or ":memory:"
    pub path: String,
    pub max_open_conns: u32,
    /// Connections kept open while idle (r2d2 `min_idle`, a floor, not a cap);
    /// clamped to `max_open_conns`
    pub max_idle_conns: u32,
    pub idle_timeout_secs: u64,
    /// How long to wait for a free pooled connection
    pub acquire_timeout_secs: u64,
    /// Deadline for the statements of a single store call. Waiting on a
    /// locked database is bounded separately by the same amount, so a
    /// contended call can take up to twice this.
    pub query_timeout_ms: u64,
}

impl DatabaseSettings {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "social.db".to_string(),
            max_open_conns: 3,
            max_idle_conns: 3,
            idle_timeout_secs: 15 * 60,
            acquire_timeout_secs: 5,
            query_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // 1. Optional settings.toml in the working directory
        let config_file_name = "settings.toml";
        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }

        // 2. Defaults
        let defaults = DatabaseSettings::default();
        builder = builder
            .set_default("database.path", defaults.path)?
            .set_default("database.max_open_conns", defaults.max_open_conns as i64)?
            .set_default("database.max_idle_conns", defaults.max_idle_conns as i64)?
            .set_default("database.idle_timeout_secs", defaults.idle_timeout_secs as i64)?
            .set_default("database.acquire_timeout_secs", defaults.acquire_timeout_secs as i64)?
            .set_default("database.query_timeout_ms", defaults.query_timeout_ms as i64)?;

        // 3. Environment variables (highest priority)
        let overrides = [
            ("DB_ADDR", "database.path"),
            ("DB_MAX_OPEN_CONNS", "database.max_open_conns"),
            ("DB_MAX_IDLE_CONNS", "database.max_idle_conns"),
            ("DB_IDLE_TIMEOUT_SECS", "database.idle_timeout_secs"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "database.acquire_timeout_secs"),
            ("DB_QUERY_TIMEOUT_MS", "database.query_timeout_ms"),
        ];
        for (var, key) in overrides {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_seed_connection() {
        let settings = DatabaseSettings::default();
        assert_eq!(settings.max_open_conns, 3);
        assert_eq!(settings.max_idle_conns, 3);
        assert_eq!(settings.idle_timeout(), Duration::from_secs(900));
        assert_eq!(settings.query_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_env_overrides_defaults() {
        std::env::set_var("DB_MAX_OPEN_CONNS", "7");
        std::env::set_var("DB_QUERY_TIMEOUT_MS", "250");
        let result = Settings::new();
        std::env::remove_var("DB_MAX_OPEN_CONNS");
        std::env::remove_var("DB_QUERY_TIMEOUT_MS");

        let settings = result.expect("Failed to load settings").database;
        assert_eq!(settings.max_open_conns, 7u32);
        assert_eq!(settings.query_timeout(), Duration::from_millis(250));
        assert_eq!(settings.idle_timeout_secs, 900);
    }
}
