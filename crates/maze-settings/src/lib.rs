//! # maze-settings
//!
//! Configuration for the maze client, loaded from three layers (in priority
//! order):
//! 1. **Compiled defaults**: [`MazeSettings::default()`]
//! 2. **User file**: `~/.maze-walker/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `MAZE_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, apply_overrides_with, deep_merge, load_settings, load_settings_from_path, load_settings_with,
    settings_path,
};
pub use types::{MazeSettings, RetrySettings};
