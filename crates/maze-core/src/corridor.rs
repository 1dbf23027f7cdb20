use serde::{Deserialize, Serialize};

use crate::ids::LocationToken;

/// One visible passage cell, as reported by the maze service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorToken {
    Open,
    OpenLeft,
    OpenRight,
    OpenBoth,
    Goal,
}

impl CorridorToken {
    /// Decode a wire code. Unknown codes fall back to [`CorridorToken::Open`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "OL" => Self::OpenLeft,
            "OR" => Self::OpenRight,
            "OLR" => Self::OpenBoth,
            "X" => Self::Goal,
            _ => Self::Open,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Open => "O",
            Self::OpenLeft => "OL",
            Self::OpenRight => "OR",
            Self::OpenBoth => "OLR",
            Self::Goal => "X",
        }
    }

    pub fn has_left_branch(self) -> bool {
        matches!(self, Self::OpenLeft | Self::OpenBoth)
    }

    pub fn has_right_branch(self) -> bool {
        matches!(self, Self::OpenRight | Self::OpenBoth)
    }

    pub fn is_goal(self) -> bool {
        self == Self::Goal
    }
}

/// One decoded server response. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    location_token: LocationToken,
    /// Farthest cell first, nearest cell last.
    corridor: Vec<CorridorToken>,
}

impl Step {
    pub fn new(location_token: LocationToken, corridor: Vec<CorridorToken>) -> Self {
        Self {
            location_token,
            corridor,
        }
    }

    pub fn location_token(&self) -> &LocationToken {
        &self.location_token
    }

    /// Corridor in wire order (farthest to nearest).
    pub fn corridor(&self) -> &[CorridorToken] {
        &self.corridor
    }

    /// Corridor from the agent outwards.
    pub fn nearest_first(&self) -> impl Iterator<Item = CorridorToken> + '_ {
        self.corridor.iter().rev().copied()
    }

    pub fn nearest(&self) -> Option<CorridorToken> {
        self.corridor.last().copied()
    }

    pub fn is_goal(&self) -> bool {
        self.nearest().is_some_and(CorridorToken::is_goal)
    }
}
