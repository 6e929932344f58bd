//! Environment-driven configuration.
//!
//! Kept in its own test binary: it mutates the process environment.

use std::time::Duration;

use mws_event_service::{Config, PluginContext};

const KEYS: [&str; 6] = [
    "MWS_PLUGIN_TYPE",
    "MWS_PLUGIN_ID",
    "MWS_PLUGIN_COMPONENT_CODE",
    "MWS_POLLING_INTERVAL_SECS",
    "MWS_LOG_LEVEL",
    "MWS_LOG_JSON",
];

#[test]
fn from_env_reads_plugin_identity_and_logging() {
    for key in KEYS {
        std::env::remove_var(key);
    }
    let defaults = Config::from_env().unwrap();
    assert_eq!(defaults.log_level, "info");
    assert!(!defaults.log_json);
    assert_eq!(defaults.plugin, PluginContext::new("", ""));

    std::env::set_var("MWS_PLUGIN_TYPE", "Native");
    std::env::set_var("MWS_PLUGIN_ID", "native1");
    std::env::set_var("MWS_PLUGIN_COMPONENT_CODE", "0x2B");
    std::env::set_var("MWS_POLLING_INTERVAL_SECS", "15");
    std::env::set_var("MWS_LOG_LEVEL", "debug");
    std::env::set_var("MWS_LOG_JSON", "1");

    let config = Config::from_env().unwrap();
    assert_eq!(
        config.plugin,
        PluginContext::new("Native", "native1")
            .with_component_code(0x2B)
            .with_polling_interval(Duration::from_secs(15))
    );
    assert_eq!(config.log_level, "debug");
    assert!(config.log_json);

    std::env::set_var("MWS_POLLING_INTERVAL_SECS", "-1");
    assert!(Config::from_env().is_err());

    for key in KEYS {
        std::env::remove_var(key);
    }
}
