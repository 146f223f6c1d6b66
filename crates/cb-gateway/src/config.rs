//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use shared_types::webhook::DEFAULT_TOLERANCE_SECS;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Placeholder secret shipped in the default config. The runtime refuses
/// to start until it is replaced.
pub const DEFAULT_WEBHOOK_SECRET: &str = "whsec_change_me";

/// Main gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Request size limits.
    pub limits: LimitsConfig,
    /// Request timeout configuration.
    pub timeouts: TimeoutConfig,
    /// Payment webhook verification.
    pub webhook: WebhookConfig,
    /// Checkout session creation.
    pub checkout: CheckoutConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            cors: CorsConfig::default(),
            limits: LimitsConfig::default(),
            timeouts: TimeoutConfig::default(),
            webhook: WebhookConfig::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook.secret.is_empty() {
            return Err(ConfigError::MissingWebhookSecret);
        }
        if self.webhook.tolerance_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "webhook tolerance cannot be 0".into(),
            ));
        }
        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }
        if self.timeouts.request_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }
        if self.checkout.base_url.is_empty() {
            return Err(ConfigError::InvalidCheckout(
                "checkout base_url cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// HTTP server bind address.
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Port (default: 8780).
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8780,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// Allowed origins ("*" for all).
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 256 KiB).
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 256 * 1024,
        }
    }
}

/// Request timeout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Payment webhook verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Shared secret for the signature scheme.
    pub secret: String,
    /// How old a signed timestamp may be, in seconds.
    pub tolerance_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_WEBHOOK_SECRET.to_string(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }
}

/// Checkout session creation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Base URL of the provider's hosted payment page.
    pub base_url: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pay.carebid.example".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// No webhook secret configured.
    #[error("webhook secret is not configured")]
    MissingWebhookSecret,

    /// Invalid size or count limit.
    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    /// Invalid timeout value.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    /// Invalid checkout settings.
    #[error("invalid checkout config: {0}")]
    InvalidCheckout(String),
}
