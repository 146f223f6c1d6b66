//! # CareBid Node
//!
//! The runtime binary for the marketplace core.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (`--config <path>`, then env overrides)
//! 2. Install the tracing subscriber
//! 3. Refuse to start with the placeholder webhook secret
//! 4. Wire store adapters into the subsystem services
//! 5. Serve the HTTP gateway until ctrl-c

mod adapters;
mod config;
mod wiring;

use anyhow::{Context, Result};
use cb_gateway::DEFAULT_WEBHOOK_SECRET;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = parse_config_arg(std::env::args().collect());
    let config =
        config::load(config_path.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if config.gateway.webhook.secret == DEFAULT_WEBHOOK_SECRET {
        anyhow::bail!(
            "refusing to start with the placeholder webhook secret; set CAREBID_WEBHOOK_SECRET"
        );
    }

    let mut gateway = wiring::build_gateway(&config).context("failed to assemble gateway")?;

    tokio::select! {
        result = gateway.start() => {
            result.context("gateway exited with error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received, shutting down");
        }
    }

    Ok(())
}

fn parse_config_arg(args: Vec<String>) -> Option<String> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next();
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(path.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_config_arg_forms() {
        assert_eq!(
            parse_config_arg(args(&["carebid-node", "--config", "/etc/carebid.json"])),
            Some("/etc/carebid.json".to_string())
        );
        assert_eq!(
            parse_config_arg(args(&["carebid-node", "--config=node.json"])),
            Some("node.json".to_string())
        );
        assert_eq!(parse_config_arg(args(&["carebid-node"])), None);
    }
}
