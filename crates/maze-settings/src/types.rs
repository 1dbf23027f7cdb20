//! Settings type definitions.
//!
//! Field names are camelCase in JSON. Every struct is `#[serde(default)]`, so a
//! partial file only overrides what it names.

use std::time::Duration;

use maze_core::{LocationToken, Orientation, START_TOKEN};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings for the maze client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MazeSettings {
    /// Base URL of the maze service. The query string is appended to it.
    pub endpoint: String,
    /// Token sent with the opening request.
    pub start_token: String,
    /// Facing assumed at the entrance. The service never reports it.
    pub initial_orientation: Orientation,
    /// Whole-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// TCP/TLS connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    pub user_agent: String,
    pub retry: RetrySettings,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://challenge20.appspot.com/".to_string(),
            start_token: START_TOKEN.to_string(),
            initial_orientation: Orientation::North,
            request_timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
            user_agent: concat!("maze-walker/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: RetrySettings::default(),
        }
    }
}

impl MazeSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn start_token(&self) -> LocationToken {
        LocationToken::from_raw(self.start_token.clone())
    }

    /// Reject values no transport could work with.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(SettingsError::InvalidValue("endpoint is empty".into()));
        }
        if self.start_token.trim().is_empty() {
            return Err(SettingsError::InvalidValue("start token is empty".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(SettingsError::InvalidValue("request timeout must be positive".into()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(SettingsError::InvalidValue("connect timeout must be positive".into()));
        }
        Ok(())
    }
}

/// Retry policy applied by the client around each request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 250,
            max_delay_ms: 4_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = MazeSettings::default();
        assert_eq!(s.endpoint, "https://challenge20.appspot.com/");
        assert_eq!(s.start_token, "MSwxLEU=");
        assert_eq!(s.initial_orientation, Orientation::North);
        assert_eq!(s.request_timeout(), Duration::from_secs(10));
        assert_eq!(s.retry.max_retries, 2);
        assert!(s.user_agent.starts_with("maze-walker/"));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn camel_case_json() {
        let json = serde_json::to_value(MazeSettings::default()).unwrap();
        assert!(json.get("startToken").is_some());
        assert!(json.get("requestTimeoutMs").is_some());
        assert_eq!(json["initialOrientation"], "north");
        assert_eq!(json["retry"]["baseDelayMs"], 250);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: MazeSettings = serde_json::from_str(r#"{"retry": {"maxRetries": 5}}"#).unwrap();
        assert_eq!(s.retry.max_retries, 5);
        assert_eq!(s.retry.base_delay_ms, 250);
        assert_eq!(s.start_token, "MSwxLEU=");
    }

    #[test]
    fn validate_rejects_empty_endpoint() {
        let s = MazeSettings {
            endpoint: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::InvalidValue(_))));
    }

    #[test]
    fn validate_rejects_zero_timeouts() {
        let s = MazeSettings {
            request_timeout_ms: 0,
            ..Default::default()
        };
        assert!(s.validate().is_err());

        let s = MazeSettings {
            connect_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::InvalidValue(m)) if m.contains("connect")));
    }
}
