#![cfg_attr(not(test), deny(clippy::panic))]

use clap::Parser;
use skirmish_server::config;
use skirmish_server::logging;
use skirmish_server::server::GameServer;
use skirmish_server::websocket;
use std::net::{IpAddr, SocketAddr};

/// Skirmish -- authoritative WebSocket server for a two-player 5x5 board game
#[derive(Parser, Debug)]
#[command(name = "skirmish-server")]
#[command(about = "Authoritative WebSocket server for a two-player 5x5 board game")]
#[command(version)]
struct Cli {
    /// Validate configuration and exit without starting the server.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the loaded configuration to stdout (as JSON) and exit.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load();

    if cli.print_config {
        let json = serde_json::to_string_pretty(&cfg)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let validation_result = config::validate_config(&cfg);

    if cli.validate_config {
        match validation_result {
            Ok(()) => {
                println!("Configuration validation passed");
                println!();
                println!("Configuration summary:");
                println!("  Listen address: {}:{}", cfg.host, cfg.port);
                println!("  CORS origins: {}", cfg.server.cors_origins);
                println!("  Reset endpoint: {}", cfg.server.enable_reset_endpoint);
                println!("  Direction policy: {:?}", cfg.game.direction_policy());
                println!("  Max message size: {}", cfg.websocket.max_message_size);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Configuration validation failed:\n{e}");
                std::process::exit(1);
            }
        }
    }

    validation_result?;

    // Held for the process lifetime so buffered file logs are flushed.
    let _log_guard = logging::init_with_config(&cfg.logging);

    let ip: IpAddr = cfg
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid host '{}': {e}", cfg.host))?;
    let addr = SocketAddr::new(ip, cfg.port);

    let cors_origins = cfg.server.cors_origins.clone();
    let server = GameServer::new(cfg);
    let app = websocket::app(server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        %cors_origins,
        "Server started over HTTP - WebSocket: /ws/{{A|B}}, State: /state, Metrics: /metrics"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn test_cli_default_no_flags() {
        let cli = Cli::try_parse_from(["skirmish-server"]).unwrap();
        assert!(!cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_validate_config_short() {
        let cli = Cli::try_parse_from(["skirmish-server", "-c"]).unwrap();
        assert!(cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_print_config() {
        let cli = Cli::try_parse_from(["skirmish-server", "--print-config"]).unwrap();
        assert!(!cli.validate_config);
        assert!(cli.print_config);
    }

    #[test]
    fn test_cli_validate_and_print_config_conflict() {
        let result = Cli::try_parse_from(["skirmish-server", "--validate-config", "--print-config"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("cannot be used with"));
    }

    #[test]
    fn test_cli_help_contains_flags() {
        let result = Cli::try_parse_from(["skirmish-server", "--help"]);
        assert!(result.is_err());
        let help_text = result.unwrap_err().to_string();
        assert!(help_text.contains("--validate-config"));
        assert!(help_text.contains("--print-config"));
    }
}
