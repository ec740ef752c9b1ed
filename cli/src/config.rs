use envconfig::Envconfig;
use std::sync::LazyLock;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Payment endpoint used when `--endpoint` is not given
    #[envconfig(
        from = "PAY_FORM_ENDPOINT",
        default = "http://localhost:8000/api/payment"
    )]
    pub endpoint: String,

    /// Seconds to wait for the payment endpoint
    #[envconfig(from = "PAY_FORM_TIMEOUT_SECS", default = "10")]
    pub timeout_secs: u64,
}

pub static APP_CONFIG: LazyLock<Result<AppConfig, envconfig::Error>> =
    LazyLock::new(AppConfig::init_from_env);

pub fn app_config() -> anyhow::Result<&'static AppConfig> {
    APP_CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("failed to load pay-form config from environment: {e}"))
}
