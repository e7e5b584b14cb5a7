// src/config.rs
//
// Runtime configuration
//
// Defaults place everything under the platform data directory.
// Each field can be overridden through a MATCHDAY_* environment variable.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::logging::default_log_level;

pub const ENV_DATABASE_PATH: &str = "MATCHDAY_DATABASE_PATH";
pub const ENV_POOL_SIZE: &str = "MATCHDAY_POOL_SIZE";
pub const ENV_BUSY_TIMEOUT_MS: &str = "MATCHDAY_BUSY_TIMEOUT_MS";
pub const ENV_LOG_LEVEL: &str = "MATCHDAY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MATCHDAY_LOG_DIR";

const APP_DIR_NAME: &str = "matchday";
const DATABASE_FILE_NAME: &str = "matchday.db";
const DEFAULT_POOL_SIZE: u32 = 15;
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub pool_max_size: u32,
    pub busy_timeout_ms: u32,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Defaults rooted at `{APP_DATA}/matchday`
    pub fn default_for_platform() -> AppResult<Self> {
        let root = dirs::data_dir()
            .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?
            .join(APP_DIR_NAME);

        Ok(Self::rooted_at(root))
    }

    /// Defaults rooted at an explicit directory
    pub fn rooted_at(root: PathBuf) -> Self {
        Self {
            database_path: root.join(DATABASE_FILE_NAME),
            pool_max_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            log_level: default_log_level().to_string(),
            log_dir: root.join("logs"),
        }
    }

    /// Platform defaults overridden by the process environment
    pub fn from_env() -> AppResult<Self> {
        let base = Self::default_for_platform()?;
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source.
    pub fn with_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = non_blank(lookup(ENV_DATABASE_PATH)) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(size) = non_blank(lookup(ENV_POOL_SIZE)) {
            self.pool_max_size = parse_positive(ENV_POOL_SIZE, &size)?;
        }
        if let Some(timeout) = non_blank(lookup(ENV_BUSY_TIMEOUT_MS)) {
            self.busy_timeout_ms = parse_positive(ENV_BUSY_TIMEOUT_MS, &timeout)?;
        }
        if let Some(level) = non_blank(lookup(ENV_LOG_LEVEL)) {
            self.log_level = level;
        }
        if let Some(dir) = non_blank(lookup(ENV_LOG_DIR)) {
            self.log_dir = PathBuf::from(dir);
        }
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_positive(key: &str, raw: &str) -> AppResult<u32> {
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(AppError::Config(format!(
            "{} must be a positive integer, got `{}`",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_rooted_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::rooted_at(dir.path().to_path_buf());
        assert!(config.database_path.ends_with("matchday.db"));
        assert!(config.log_dir.ends_with("logs"));
        assert_eq!(config.pool_max_size, 15);
        assert_eq!(config.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::rooted_at(dir.path().to_path_buf())
            .with_overrides(lookup(&[
                (ENV_DATABASE_PATH, "/tmp/other.db"),
                (ENV_POOL_SIZE, "4"),
                (ENV_LOG_LEVEL, "warn"),
                (ENV_BUSY_TIMEOUT_MS, "  "),
            ]))
            .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.pool_max_size, 4);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_invalid_pool_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::rooted_at(dir.path().to_path_buf())
            .with_overrides(lookup(&[(ENV_POOL_SIZE, "0")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
