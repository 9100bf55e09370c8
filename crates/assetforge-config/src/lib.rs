//! Settings types and loader for Assetforge.
//!
//! The settings file (`config.yml`) carries the browser compatibility
//! targets, the path globs each task reads, and the command lines of
//! the external filter tools. It is loaded once at startup and never
//! mutated afterwards.

pub mod loader;
pub mod types;

pub use loader::{SettingsError, SettingsLoader};
pub use types::{Overrides, Paths, Settings, ToolCommand, Tools};
