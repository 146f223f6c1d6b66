//! Node configuration: a JSON file plus environment overrides.
//!
//! Overrides recognized: `CAREBID_HTTP_PORT`, `CAREBID_WEBHOOK_SECRET`,
//! `CAREBID_CHECKOUT_URL`.

use anyhow::{Context, Result};
use cb_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub gateway: GatewayConfig,
    /// Seed a demo catalog and balances for local development.
    pub seed_demo_data: bool,
}

/// Loads configuration from an optional file, then applies env overrides.
pub fn load(path: Option<&str>) -> Result<NodeConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("cannot read config file {path}"))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("cannot parse config file {path}"))?
        }
        None => NodeConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut NodeConfig) -> Result<()> {
    if let Ok(port) = env::var("CAREBID_HTTP_PORT") {
        config.gateway.http.port = port
            .parse()
            .context("CAREBID_HTTP_PORT must be a port number")?;
    }
    if let Ok(secret) = env::var("CAREBID_WEBHOOK_SECRET") {
        config.gateway.webhook.secret = secret;
    }
    if let Ok(url) = env::var("CAREBID_CHECKOUT_URL") {
        config.gateway.checkout.base_url = url;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_path_yields_defaults() {
        let config = NodeConfig::default();
        assert!(!config.seed_demo_data);
        assert_eq!(config.gateway.http.port, 8780);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"gateway": {{"http": {{"port": 9100}}}}, "seed_demo_data": true}}"#
        )
        .unwrap();

        let config = load(file.path().to_str()).unwrap();
        assert_eq!(config.gateway.http.port, 9100);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        assert!(load(Some("/nonexistent/carebid.json")).is_err());
    }
}
