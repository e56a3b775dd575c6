// --- File: crates/slotcheck_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_TESTER_NAME: &str = "E2E Tester";
pub const DEFAULT_TESTER_EMAIL: &str = "test+e2e@example.com";
pub const DEFAULT_EXCERPT_CHARS: usize = 800;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// --- Smoke Run Config ---
// Base URL and slot id are not part of this; they only come from the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SmokeConfig {
    /// Per-request timeout; loaded via SLOTCHECK__TIMEOUT_SECS
    pub timeout_secs: u64,
    /// `name` sent in the appointment creation payload
    pub tester_name: String,
    /// `email` sent in the appointment creation payload
    pub tester_email: String,
    /// Number of characters of a response body shown in failure diagnostics
    pub excerpt_chars: usize,
    pub log_level: String,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tester_name: DEFAULT_TESTER_NAME.to_string(),
            tester_email: DEFAULT_TESTER_EMAIL.to_string(),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
