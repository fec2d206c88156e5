//! WebSocket configuration types.

use super::defaults::{default_max_message_size, default_outbound_queue_capacity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebSocketConfig {
    /// Largest accepted inbound text frame, in bytes
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
    /// Outbound frames buffered per connection before new ones are dropped
    #[serde(default = "default_outbound_queue_capacity")]
    pub outbound_queue_capacity: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            max_message_size: default_max_message_size(),
            outbound_queue_capacity: default_outbound_queue_capacity(),
        }
    }
}

impl WebSocketConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.outbound_queue_capacity == 0 {
            anyhow::bail!("websocket.outbound_queue_capacity must be at least 1");
        }
        if self.max_message_size < 64 {
            anyhow::bail!(
                "websocket.max_message_size must be at least 64 bytes (configured: {})",
                self.max_message_size
            );
        }
        Ok(())
    }
}
