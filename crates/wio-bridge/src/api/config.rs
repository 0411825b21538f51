use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for a bridge session, provided by the host.
/// Loaded from JSON; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Upper bound of a null-terminated string scan in guest memory (default: 64 KiB).
    pub max_cstr_len: usize,
    /// Initial allocation of the event queue, in scalars (default: 64).
    pub queue_capacity: usize,
    /// `log` target used for text the guest writes and flushes (default: "wio::guest").
    pub guest_log_target: String,
    /// Level the host installs its logger at (default: "info").
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_cstr_len: 64 * 1024,
            queue_capacity: 64,
            guest_log_target: "wio::guest".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The configured level, falling back to `Info` on an unrecognised name.
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
