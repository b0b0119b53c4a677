//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TodoSettings::default()`]
//! 2. If `~/.todo/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn, Level};

use todo_store::DatabaseOptions;
use todo_telemetry::TelemetryConfig;

/// File name of the task database.
pub const DATABASE_FILE: &str = "tasks.db";

/// Errors that can occur when loading or parsing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Root settings.
///
/// ```json
/// {
///   "database": { "path": "/data/tasks.db", "busyTimeoutMs": 2000 },
///   "logging": { "level": "debug", "json": true }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoSettings {
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    /// Path of the SQLite file.
    pub path: String,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: todo_home()
                .join("database")
                .join(DATABASE_FILE)
                .to_string_lossy()
                .into_owned(),
            busy_timeout_ms: 5000,
        }
    }
}

impl DatabaseSettings {
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    pub fn options(&self) -> DatabaseOptions {
        DatabaseOptions {
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingSettings {
    pub fn telemetry_config(&self) -> TelemetryConfig {
        let log_level = Level::from_str(&self.level).unwrap_or_else(|_| {
            warn!(level = %self.level, "unknown log level, using info");
            Level::INFO
        });
        TelemetryConfig {
            log_level,
            json: self.json,
            ..TelemetryConfig::default()
        }
    }
}

/// Resolve the path to the settings file (`~/.todo/settings.json`).
pub fn settings_path() -> PathBuf {
    todo_home().join("settings.json")
}

fn todo_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join(".todo")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TodoSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<TodoSettings> {
    load_settings_from_path_with(path, |name| std::env::var(name).ok())
}

/// Load settings from a specific path, resolving overrides through `lookup`.
pub fn load_settings_from_path_with<F>(path: &Path, lookup: F) -> Result<TodoSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = serde_json::to_value(TodoSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: TodoSettings = serde_json::from_value(merged)?;
    apply_overrides_with(&mut settings, lookup);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `TODO_*` overrides from an arbitrary lookup. Invalid values are ignored
/// with a warning.
pub fn apply_overrides_with<F>(settings: &mut TodoSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let string = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = string("TODO_DB_PATH") {
        settings.database.path = v;
    }
    if let Some(v) = string("TODO_DB_BUSY_TIMEOUT_MS") {
        match parse_u64_range(&v, 0, 600_000) {
            Some(ms) => settings.database.busy_timeout_ms = ms,
            None => warn!(key = "TODO_DB_BUSY_TIMEOUT_MS", value = %v, "invalid u64 env var, ignoring"),
        }
    }
    if let Some(v) = string("TODO_LOG_LEVEL") {
        if Level::from_str(&v).is_ok() {
            settings.logging.level = v.to_lowercase();
        } else {
            warn!(key = "TODO_LOG_LEVEL", value = %v, "invalid log level env var, ignoring");
        }
    }
    if let Some(v) = string("TODO_LOG_JSON") {
        match parse_bool(&v) {
            Some(b) => settings.logging.json = b,
            None => warn!(key = "TODO_LOG_JSON", value = %v, "invalid boolean env var, ignoring"),
        }
    }
}

/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}
