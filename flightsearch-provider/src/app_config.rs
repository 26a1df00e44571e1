use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use flightsearch_core::Credentials;
use flightsearch_shared::Masked;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub amadeus: AmadeusConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin allowed by CORS. Any origin when unset.
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origin: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AmadeusConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Masked<String>,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub expiry_margin_seconds: i64,
}

impl AmadeusConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }
}

fn default_port() -> u16 { 8080 }
fn default_base_url() -> String { "https://test.api.amadeus.com".to_string() }
fn default_timeout() -> u64 { 30 }

/// Upper bound for `amadeus.expiry_margin_seconds`.
pub const MAX_EXPIRY_MARGIN_SECONDS: i64 = 3_600;

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FLIGHTSEARCH__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("FLIGHTSEARCH").separator("__"))
            .set_override_option("amadeus.client_id", env::var("AMADEUS_CLIENT_ID").ok())?
            .set_override_option("amadeus.client_secret", env::var("AMADEUS_CLIENT_SECRET").ok())?;

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.amadeus.client_id.trim().is_empty() {
            return Err(ConfigError::Message("amadeus.client_id is not set".to_string()));
        }
        if self.amadeus.client_secret.expose().trim().is_empty() {
            return Err(ConfigError::Message("amadeus.client_secret is not set".to_string()));
        }
        if !(0..=MAX_EXPIRY_MARGIN_SECONDS).contains(&self.amadeus.expiry_margin_seconds) {
            return Err(ConfigError::Message(format!(
                "amadeus.expiry_margin_seconds must be between 0 and {}",
                MAX_EXPIRY_MARGIN_SECONDS
            )));
        }
        Ok(())
    }
}
