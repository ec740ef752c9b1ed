//! Application configuration management with security considerations.
//!
//! All values come from environment variables. Sensitive fields are marked
//! and must never be logged.

use anyhow::{Context, bail};
use envconfig::Envconfig;
use ntex::http::Uri;
use std::sync::LazyLock;

/// Application configuration loaded from the environment.
///
/// # Security Requirements
/// - `SENSITIVE` fields must be stored in a secret manager in production
/// - Never log or expose sensitive values
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(from = "ENV", default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(from = "WEP_SERVER_HOST", default = "0.0.0.0")]
    pub wep_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(from = "WEP_SERVER_PORT", default = "8000")]
    pub wep_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    /// Security: File should have 600 permissions
    #[envconfig(from = "PRIVATE_KEY_PATH", default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(from = "CERTIFICATE_PATH", default = "server.crt")]
    pub certificate_path: String,

    /// File receiving the audit trail of processed payments (NON-SENSITIVE)
    #[envconfig(from = "AUDIT_LOG_PATH", default = "audit.log")]
    pub audit_log_path: String,

    /// Comma separated front-end origins allowed to post card data, on top of
    /// the origin serving the payment form (NON-SENSITIVE)
    #[envconfig(from = "ALLOWED_ORIGIN", default = "http://localhost:3000")]
    pub allowed_origin: String,

    /// URL the payment form page posts to (NON-SENSITIVE)
    #[envconfig(
        from = "PAYMENT_ENDPOINT",
        default = "http://localhost:8000/api/payment"
    )]
    pub payment_endpoint: String,

    /// 🔒 SENSITIVE: HMAC key used to derive card tokens.
    /// Empty means tokens are a plain SHA-256 digest of the card number.
    /// Rotation: changing it changes every token issued afterwards
    #[envconfig(from = "TOKENIZATION_KEY", default = "")]
    pub tokenization_key: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the appropriate protocol (HTTP/HTTPS) based on environment
    pub fn wep_server_protocol(&self) -> &'static str {
        if self.is_prod() {
            return "https";
        }
        "http"
    }

    /// Origins accepted by CORS: the origin of [payment_endpoint](Self::payment_endpoint),
    /// where the form page is served and posts to, followed by `ALLOWED_ORIGIN`
    pub fn cors_origins(&self) -> anyhow::Result<Vec<String>> {
        let mut origins = vec![origin_of(&self.payment_endpoint)?];

        for origin in self.allowed_origin.split(',').map(str::trim) {
            if origin.is_empty() {
                continue;
            }
            let origin = origin_of(origin)?;
            if !origins.contains(&origin) {
                origins.push(origin);
            }
        }

        Ok(origins)
    }

    /// Tokenization key, `None` when not configured
    pub fn tokenization_key(&self) -> Option<&str> {
        Some(self.tokenization_key.as_str()).filter(|key| !key.is_empty())
    }
}

/// `scheme://authority` part of an absolute url
fn origin_of(url: &str) -> anyhow::Result<String> {
    let uri = url
        .parse::<Uri>()
        .with_context(|| format!("invalid url in config: {url}"))?;

    match (uri.scheme_str(), uri.authority()) {
        (Some(scheme), Some(authority)) => Ok(format!("{scheme}://{authority}")),
        _ => bail!("url in config must be absolute: {url}"),
    }
}

/// Global application configuration instance
///
/// Loaded on first access; [init_config] forces it at startup so missing or
/// malformed variables fail before the server binds.
pub static APP_CONFIG: LazyLock<Result<AppConfig, envconfig::Error>> =
    LazyLock::new(AppConfig::init_from_env);

/// Loads [APP_CONFIG] and returns it
pub fn init_config() -> anyhow::Result<&'static AppConfig> {
    APP_CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("failed to load app config from environment: {e}"))
}
