use serial_test::serial;
use skirmish_server::config::{self, LogFormat, LogLevel};
use skirmish_server::game::DirectionPolicy;
use std::env;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

const CONFIG_VARS: [&str; 6] = [
    "SKIRMISH_CONFIG_PATH",
    "SKIRMISH_CONFIG_JSON",
    "SKIRMISH__PORT",
    "SKIRMISH__GAME__RESTRICT_DIRECTIONS",
    "SKIRMISH__LOGGING__LEVEL",
    "SKIRMISH__WEBSOCKET__MAX_MESSAGE_SIZE",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_uses_defaults_without_sources() {
    clear_config_env();
    let cfg = config::load();
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.game.direction_policy(), DirectionPolicy::Unrestricted);
    assert_eq!(cfg.logging.format, LogFormat::Text);
}

#[test]
#[serial]
fn test_config_precedence_file_json_env() {
    clear_config_env();

    let dir = tempdir().unwrap();
    let config_file = dir.path().join("skirmish.json");
    let mut file = File::create(&config_file).unwrap();
    file.write_all(
        br#"{
            "port": 9100,
            "game": { "restrict_directions": true },
            "websocket": { "max_message_size": 2048, "outbound_queue_capacity": 8 },
            "logging": { "format": "json" }
        }"#,
    )
    .unwrap();
    file.flush().unwrap();

    env::set_var("SKIRMISH_CONFIG_PATH", config_file.to_str().unwrap());
    env::set_var(
        "SKIRMISH_CONFIG_JSON",
        r#"{"port": 9200, "websocket": {"max_message_size": 1024}}"#,
    );
    env::set_var("SKIRMISH__PORT", "9300");
    env::set_var("SKIRMISH__LOGGING__LEVEL", "warning");

    let cfg = config::load();

    assert_eq!(cfg.port, 9300); // env override
    assert_eq!(cfg.websocket.max_message_size, 1024); // inline JSON
    assert_eq!(cfg.websocket.outbound_queue_capacity, 8); // file
    assert_eq!(cfg.game.direction_policy(), DirectionPolicy::ByKind); // file
    assert_eq!(cfg.logging.format, LogFormat::Json); // file
    assert_eq!(cfg.logging.level, Some(LogLevel::Warn)); // env alias
    assert_eq!(cfg.host, "0.0.0.0"); // default

    clear_config_env();
}

#[test]
#[serial]
fn test_invalid_sources_fall_back() {
    clear_config_env();
    env::set_var("SKIRMISH_CONFIG_JSON", "{ not json");
    env::set_var("SKIRMISH_CONFIG_PATH", "/nonexistent/skirmish.json");
    env::set_var("SKIRMISH__GAME__RESTRICT_DIRECTIONS", "true");

    let cfg = config::load();
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.game.direction_policy(), DirectionPolicy::ByKind);

    clear_config_env();
}

#[test]
#[serial]
fn test_type_mismatch_uses_defaults() {
    clear_config_env();
    env::set_var("SKIRMISH__WEBSOCKET__MAX_MESSAGE_SIZE", "lots");

    let cfg = config::load();
    assert_eq!(cfg.websocket.max_message_size, 4096);

    clear_config_env();
}
