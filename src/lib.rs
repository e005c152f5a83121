//! Live Chart Bot - Main Library
//!
//! Thin root crate for the livechart workspace: re-exports the engine
//! library and carries the pieces only binaries need (config loading, CLI
//! helpers).
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use livechart_bot::bin_common::{load_config_from_env, ConfigType};
//! use livechart_bot::config::AppConfig;
//! ```

// Re-export workspace libraries for convenience
pub use livechart;

pub mod config;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{load_config_from_env, parse_args, ConfigType};
}
