//! Text views printed by the terminal client.

use std::fmt::Write as _;

use maze_core::{CorridorToken, Step};
use maze_engine::NavigationState;

pub fn corridor_cell(token: CorridorToken) -> &'static str {
    match token {
        CorridorToken::Open => " [ ] ",
        CorridorToken::OpenLeft => "<[ ] ",
        CorridorToken::OpenRight => " [ ]>",
        CorridorToken::OpenBoth => "<[ ]>",
        CorridorToken::Goal => " [X] ",
    }
}

/// Corridor drawn nearest cell first, followed by the agent's own cell.
pub fn corridor_view(step: &Step) -> String {
    let mut out = String::from("/////\n-----\n");
    for token in step.nearest_first() {
        out.push_str(corridor_cell(token));
        out.push('\n');
    }
    out.push_str("?[.]?\n");
    out
}

pub fn status(state: &NavigationState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Facing {}", state.orientation());
    let _ = writeln!(out, "Location: {}", state.location_token());
    let _ = writeln!(out, "Position: {}", state.position());
    out.push_str(&corridor_view(state.current_step()));
    out.push('\n');
    out.push_str(&state.render().to_string());
    out
}

pub fn history(state: &NavigationState) -> String {
    let mut out = String::new();
    for (i, step) in state.history().iter().enumerate() {
        let codes: Vec<&str> = step.corridor().iter().map(|t| t.code()).collect();
        let _ = writeln!(out, "{i:>4}  {}  {}", step.location_token(), codes.join(","));
    }
    out
}
