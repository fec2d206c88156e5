//! Configuration validation functions.

use super::Config;
use std::net::IpAddr;

/// Reject configurations the server cannot start with, and warn about
/// permissive settings in production.
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    config
        .host
        .parse::<IpAddr>()
        .map_err(|err| anyhow::anyhow!("host '{}' is not an IP address: {err}", config.host))?;

    config.websocket.validate()?;

    if config.server.cors_origins.trim().is_empty() {
        anyhow::bail!("server.cors_origins must not be empty; use \"*\" to allow any origin");
    }

    if is_production_mode() {
        if config.server.cors_origins.trim() == "*" {
            eprintln!(
                "\nSECURITY WARNING: permissive CORS in production.\n\
                 Restrict origins with SKIRMISH__SERVER__CORS_ORIGINS=\"https://your.site\"\n"
            );
        }
        if config.server.enable_reset_endpoint {
            eprintln!(
                "\nSECURITY WARNING: POST /reset is enabled in production.\n\
                 Any client can restart the running game.\n\
                 Disable it with SKIRMISH__SERVER__ENABLE_RESET_ENDPOINT=false\n"
            );
        }
    }

    Ok(())
}

pub fn is_production_mode() -> bool {
    use std::env;

    if let Ok(mode) = env::var("SKIRMISH__ENVIRONMENT") {
        let mode = mode.to_lowercase();
        return mode == "production" || mode == "prod";
    }

    env::var("SKIRMISH_PRODUCTION").is_ok() || env::var("PRODUCTION").is_ok()
}
