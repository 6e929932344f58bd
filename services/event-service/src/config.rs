//! Plugin runtime configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use mws_events::UNKNOWN_PLUGIN_COMPONENT;

/// Identity and timing of the plugin instance emitting events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginContext {
    /// Plugin type name, e.g. "Native".
    pub plugin_type: String,

    /// Plugin instance identifier, e.g. "native1".
    pub plugin_id: String,

    /// Component code folded into every event code.
    pub component_code: u8,

    /// Polling interval of the plugin, if it polls.
    pub polling_interval: Option<Duration>,
}

impl PluginContext {
    pub fn new(plugin_type: impl Into<String>, plugin_id: impl Into<String>) -> Self {
        Self {
            plugin_type: plugin_type.into(),
            plugin_id: plugin_id.into(),
            component_code: UNKNOWN_PLUGIN_COMPONENT,
            polling_interval: None,
        }
    }

    pub fn with_component_code(mut self, code: u8) -> Self {
        self.component_code = code;
        self
    }

    pub fn with_polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = Some(interval);
        self
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub plugin: PluginContext,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON.
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let plugin_type = lookup("MWS_PLUGIN_TYPE").unwrap_or_default();
        let plugin_id = lookup("MWS_PLUGIN_ID").unwrap_or_default();

        let component_code = match lookup("MWS_PLUGIN_COMPONENT_CODE") {
            Some(raw) => parse_component_code(&raw)
                .with_context(|| format!("invalid MWS_PLUGIN_COMPONENT_CODE: {raw}"))?,
            None => UNKNOWN_PLUGIN_COMPONENT,
        };

        let polling_interval = lookup("MWS_POLLING_INTERVAL_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("invalid MWS_POLLING_INTERVAL_SECS: {raw}"))
            })
            .transpose()?;

        let log_level = lookup("MWS_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_json = lookup("MWS_LOG_JSON")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Self {
            plugin: PluginContext {
                plugin_type,
                plugin_id,
                component_code,
                polling_interval,
            },
            log_level,
            log_json,
        })
    }
}

/// Parse a component code given in decimal or `0x` hexadecimal.
pub fn parse_component_code(raw: &str) -> Result<u8> {
    let raw = raw.trim();
    let code = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16)?,
        None => raw.parse::<u8>()?,
    };
    Ok(code)
}
