//! CLI utilities for binaries
//!
//! Handles configuration loading and environment variables
//! for all binary executables.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Application configuration (config.yaml)
    App,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::App => "config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::App => "CONFIG_PATH",
            ConfigType::Custom(_) => "CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_type_paths() {
        assert_eq!(ConfigType::App.default_path(), "config.yaml");
        assert_eq!(
            ConfigType::Custom("custom/app.yaml".to_string()).default_path(),
            "custom/app.yaml"
        );
    }

    #[test]
    fn test_config_type_env_vars() {
        assert_eq!(ConfigType::App.env_var_name(), "CONFIG_PATH");
    }
}
