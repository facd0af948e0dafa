use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Scoring service used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://purchasepulseai.onrender.com";

/// Default `tracing` filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "purchase_pulse=info,controller=info";

/// Client settings, layered from defaults, `purchase_pulse.toml` and
/// `PULSE_*` environment variables (in increasing priority).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Scoring service base URL (e.g., "https://purchasepulseai.onrender.com")
    pub api_base_url: String,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Settings {
    /// Base URL without a trailing slash.
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

/// Load settings from `.env`, the optional config file and the environment.
pub fn load_settings() -> Result<Settings> {
    dotenvy::dotenv().ok();
    let builder = Config::builder()
        .add_source(File::with_name("purchase_pulse").required(false))
        .add_source(Environment::with_prefix("PULSE"));
    build_settings(builder)
}

fn build_settings(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Settings> {
    let settings = builder
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("log_filter", DEFAULT_LOG_FILTER)?
        .build()?
        .try_deserialize::<Settings>()?;
    tracing::debug!("Loaded settings: {:?}", settings);
    Ok(settings)
}
