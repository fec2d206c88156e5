//! Default value functions for configuration fields.
//!
//! Used by serde's `#[serde(default = ...)]` attributes throughout the
//! configuration tree.

use super::logging::LogFormat;

// =============================================================================
// Root
// =============================================================================

pub const fn default_port() -> u16 {
    8000
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

// =============================================================================
// Server
// =============================================================================

pub fn default_cors_origins() -> String {
    "*".to_string()
}

pub const fn default_enable_reset_endpoint() -> bool {
    false
}

// =============================================================================
// Game
// =============================================================================

pub const fn default_restrict_directions() -> bool {
    false
}

// =============================================================================
// WebSocket
// =============================================================================

pub const fn default_max_message_size() -> usize {
    4096
}

pub const fn default_outbound_queue_capacity() -> usize {
    32
}

// =============================================================================
// Logging
// =============================================================================

pub fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn default_log_filename() -> String {
    "skirmish.log".to_string()
}

pub fn default_rotation() -> String {
    "daily".to_string()
}

pub const fn default_enable_file_logging() -> bool {
    false
}

pub const fn default_log_format() -> LogFormat {
    LogFormat::Text
}
