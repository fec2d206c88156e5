//! Configuration module.
//!
//! JSON configuration files, inline JSON and environment variable overrides
//! layered over compiled-in defaults.
//!
//! # Module Structure
//!
//! - [`crate::config::types`]: Root `Config` struct
//! - [`server`]: HTTP surface (CORS, reset endpoint)
//! - [`game`]: Rule switches
//! - [`websocket`]: Frame limits and outbound queue sizing
//! - [`logging`]: Logging configuration
//! - [`crate::config::loader`]: Configuration loading functions
//! - [`crate::config::validation`]: Configuration validation functions
//! - [`crate::config::defaults`]: Default value functions

pub mod defaults;
pub mod game;
pub mod loader;
pub mod logging;
pub mod server;
pub mod types;
pub mod validation;
pub mod websocket;

pub use game::GameConfig;
pub use loader::load;
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use server::ServerConfig;
pub use types::Config;
pub use validation::{is_production_mode, validate_config};
pub use websocket::WebSocketConfig;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::DirectionPolicy;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins, "*");
        assert!(!config.server.enable_reset_endpoint);
        assert!(!config.game.restrict_directions);
        assert_eq!(config.websocket.max_message_size, 4096);
        assert_eq!(config.websocket.outbound_queue_capacity, 32);
        assert_eq!(config.logging.dir, "logs");
        assert_eq!(config.logging.rotation, "daily");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(config.port, deserialized.port);
        assert_eq!(
            config.websocket.outbound_queue_capacity,
            deserialized.websocket.outbound_queue_capacity
        );
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"port": 9100, "game": {"restrict_directions": true}}"#)
                .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.game.direction_policy(), DirectionPolicy::ByKind);
        assert_eq!(config.websocket.max_message_size, 4096);
    }

    #[test]
    fn test_log_level_parsing() {
        let level: LogLevel = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
    }
}
