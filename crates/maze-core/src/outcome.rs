use serde::{Deserialize, Serialize};

use crate::ids::LocationToken;

/// What the most recent command did to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Initial placement at the maze entrance.
    Placed,
    /// A forward move changed cell.
    Advanced,
    /// A forward move hit a wall; the agent stayed put.
    Blocked,
    /// A rotation; position unchanged.
    Turned,
}

/// A move succeeded iff the service issued a different location token.
/// The service has no explicit "blocked" signal.
pub fn did_move(previous: &LocationToken, new: &LocationToken) -> bool {
    previous != new
}
