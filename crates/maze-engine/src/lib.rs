//! Navigation engine: drives the maze service one command at a time and
//! keeps the agent's orientation, position, explored map and step history.

pub mod navigator;
pub mod state;

pub use navigator::{Navigator, NavigatorConfig};
pub use state::NavigationState;
