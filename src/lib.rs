//! Library entry for yabset exposing the engine for integration tests.

pub mod app;
pub mod command;
pub mod effects;
pub mod hotkeys;
pub mod paths;
pub mod persist;
pub mod reducer;
pub mod state;
