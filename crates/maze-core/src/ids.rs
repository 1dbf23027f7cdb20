use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque server-issued identifier of the agent's cell.
///
/// Never parsed; only compared for equality.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationToken(String);

impl LocationToken {
    pub fn from_raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LocationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocationToken {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for LocationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_preserves_value() {
        let token = LocationToken::from_raw("MSwxLEU=");
        assert_eq!(token.as_str(), "MSwxLEU=");
        assert!(!token.is_empty());
    }

    #[test]
    fn display_and_from_str_agree() {
        let token: LocationToken = "MTEsOCxF".parse().unwrap();
        assert_eq!(token.to_string(), "MTEsOCxF");
    }

    #[test]
    fn serializes_as_plain_string() {
        let token = LocationToken::from_raw("abc=");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"abc=\"");
        let parsed: LocationToken = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, token);
    }
}
