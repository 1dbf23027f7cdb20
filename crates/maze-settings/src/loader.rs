//! Builds [`MazeSettings`] from defaults, the user's JSON file and `MAZE_*`
//! variables, in that order. CLI flags are applied by the binary on top.

use std::path::{Path, PathBuf};

use maze_core::Orientation;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::MazeSettings;

/// `~/.maze-walker/settings.json`, or under `/tmp` when `HOME` is unset.
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".maze-walker").join("settings.json")
}

/// Load `~/.maze-walker/settings.json` with env var overrides.
pub fn load_settings() -> Result<MazeSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path, then apply `MAZE_*` overrides from
/// the process environment. A missing file yields defaults; invalid JSON is
/// an error.
pub fn load_settings_from_path(path: &Path) -> Result<MazeSettings> {
    load_settings_with(path, |name| std::env::var(name).ok())
}

/// Same as [`load_settings_from_path`] but reads overrides through `lookup`.
pub fn load_settings_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<MazeSettings> {
    let defaults = serde_json::to_value(MazeSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: MazeSettings = serde_json::from_value(merged)?;
    apply_overrides_with(&mut settings, lookup);
    Ok(settings)
}

/// Overlay a user settings file onto the defaults. Keys present in both
/// objects merge recursively, so `{"retry": {"maxRetries": 5}}` keeps the
/// other retry fields. A `null` leaves the default in place.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = match target_map.remove(&key) {
                    Some(target_val) => deep_merge(target_val, source_val),
                    None => source_val,
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `MAZE_*` overrides from the process environment.
pub fn apply_env_overrides(settings: &mut MazeSettings) {
    apply_overrides_with(settings, |name| std::env::var(name).ok());
}

/// Apply `MAZE_*` overrides read through `lookup`. A value that fails to
/// parse is logged and skipped, leaving the file or default value.
pub fn apply_overrides_with(settings: &mut MazeSettings, lookup: impl Fn(&str) -> Option<String>) {
    let string = |name: &str| lookup(name).filter(|v| !v.is_empty());
    let ranged = |name: &str, min: u64, max: u64| {
        let val = lookup(name)?;
        let parsed = parse_u64_range(&val, min, max);
        if parsed.is_none() {
            warn!(key = name, value = %val, "invalid integer env var, ignoring");
        }
        parsed
    };

    if let Some(v) = string("MAZE_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = string("MAZE_START_TOKEN") {
        settings.start_token = v;
    }
    if let Some(v) = ranged("MAZE_REQUEST_TIMEOUT_MS", 100, 600_000) {
        settings.request_timeout_ms = v;
    }
    if let Some(v) = ranged("MAZE_CONNECT_TIMEOUT_MS", 100, 600_000) {
        settings.connect_timeout_ms = v;
    }
    if let Some(v) = ranged("MAZE_MAX_RETRIES", 0, 20) {
        settings.retry.max_retries = v as u32;
    }
    if let Some(val) = lookup("MAZE_INITIAL_ORIENTATION") {
        match val.parse::<Orientation>() {
            Ok(o) => settings.initial_orientation = o,
            Err(e) => warn!(key = "MAZE_INITIAL_ORIENTATION", value = %val, error = %e, "invalid orientation env var, ignoring"),
        }
    }
}

/// Parse a string as a `u64` within an inclusive range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (min..=max).contains(&n).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::errors::SettingsError;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"retry": {"maxRetries": 2, "baseDelayMs": 250}});
        let source = serde_json::json!({"retry": {"maxRetries": 7}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["retry"]["maxRetries"], 7);
        assert_eq!(merged["retry"]["baseDelayMs"], 250);
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"endpoint": "a"});
        let source = serde_json::json!({"endpoint": null});
        assert_eq!(deep_merge(target, source)["endpoint"], "a");
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let source = serde_json::json!({"a": 42});
        assert_eq!(deep_merge(target, source)["a"], 42);
    }

    #[test]
    fn parse_range() {
        assert_eq!(parse_u64_range("500", 100, 1000), Some(500));
        assert_eq!(parse_u64_range(" 100 ", 100, 1000), Some(100));
        assert_eq!(parse_u64_range("99", 100, 1000), None);
        assert_eq!(parse_u64_range("abc", 0, 10), None);
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let settings = load_settings_with(Path::new("/nonexistent/settings.json"), no_env).unwrap();
        assert_eq!(settings.retry, MazeSettings::default().retry);
    }

    #[test]
    fn load_partial_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"initialOrientation": "east", "retry": {"maxDelayMs": 1000}}"#,
        )
        .unwrap();

        let settings = load_settings_with(&path, no_env).unwrap();
        assert_eq!(settings.initial_orientation, Orientation::East);
        assert_eq!(settings.retry.max_delay_ms, 1000);
        assert_eq!(settings.retry.base_delay_ms, 250);
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result = load_settings_with(&path, no_env);
        assert!(matches!(result.unwrap_err(), SettingsError::Json(_)));
    }

    #[test]
    fn load_wrong_type_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"requestTimeoutMs": "soon"}"#).unwrap();

        assert!(load_settings_with(&path, no_env).is_err());
    }

    #[test]
    fn env_overrides_win() {
        let mut settings = MazeSettings::default();
        apply_overrides_with(
            &mut settings,
            env(&[
                ("MAZE_ENDPOINT", "http://localhost:8080/"),
                ("MAZE_START_TOKEN", "MTEsOCxF"),
                ("MAZE_REQUEST_TIMEOUT_MS", "2500"),
                ("MAZE_CONNECT_TIMEOUT_MS", "750"),
                ("MAZE_MAX_RETRIES", "5"),
                ("MAZE_INITIAL_ORIENTATION", "West"),
            ]),
        );
        assert_eq!(settings.endpoint, "http://localhost:8080/");
        assert_eq!(settings.start_token, "MTEsOCxF");
        assert_eq!(settings.request_timeout_ms, 2500);
        assert_eq!(settings.connect_timeout_ms, 750);
        assert_eq!(settings.retry.max_retries, 5);
        assert_eq!(settings.initial_orientation, Orientation::West);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut settings = MazeSettings::default();
        apply_overrides_with(
            &mut settings,
            env(&[
                ("MAZE_ENDPOINT", ""),
                ("MAZE_REQUEST_TIMEOUT_MS", "0"),
                ("MAZE_CONNECT_TIMEOUT_MS", "soon"),
                ("MAZE_MAX_RETRIES", "abc"),
                ("MAZE_INITIAL_ORIENTATION", "up"),
            ]),
        );
        assert_eq!(settings, MazeSettings::default());
    }

    #[test]
    fn env_layers_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"initialOrientation": "east", "retry": {"maxRetries": 7}}"#,
        )
        .unwrap();

        let settings = load_settings_with(
            &path,
            env(&[("MAZE_INITIAL_ORIENTATION", "south"), ("MAZE_MAX_RETRIES", "abc")]),
        )
        .unwrap();
        assert_eq!(settings.initial_orientation, Orientation::South);
        assert_eq!(settings.retry.max_retries, 7);
    }
}
