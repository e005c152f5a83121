//! Integration test: Configuration utilities
//!
//! Tests the bin_common configuration loading functionality.

use livechart_bot::bin_common::{load_config_from_env, ConfigType};
use std::env;

#[test]
fn test_app_config_default() {
    // Clear env var to test default
    env::remove_var("CONFIG_PATH");

    let config_path = load_config_from_env(ConfigType::App);
    assert_eq!(config_path.to_str().unwrap(), "config.yaml");
}

#[test]
fn test_custom_config() {
    let custom = ConfigType::Custom("custom/path.yaml".to_string());
    let config_path = load_config_from_env(custom);

    assert_eq!(config_path.to_str().unwrap(), "custom/path.yaml");
}

#[test]
fn test_config_type_env_var_names() {
    assert_eq!(ConfigType::App.env_var_name(), "CONFIG_PATH");
    assert_eq!(
        ConfigType::Custom("test.yaml".to_string()).env_var_name(),
        "CONFIG_PATH"
    );
}

#[test]
fn test_config_type_default_paths() {
    assert_eq!(ConfigType::App.default_path(), "config.yaml");

    let custom = ConfigType::Custom("test.yaml".to_string());
    assert_eq!(custom.default_path(), "test.yaml");
}
