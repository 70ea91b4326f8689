use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AgentSettings {
    pub name: String,
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    pub vendor: String,
    /// Empty selects the vendor's default model
    pub model: String,
    pub timeout_secs: u64,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub agent: AgentSettings,
    pub provider: ProviderSettings,
}

impl Settings {
    /// Layer defaults, an optional TOML file and `LARK_` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Agent defaults
            .set_default("agent.name", default_name())?
            .set_default("agent.instructions", default_instructions())?
            // Provider defaults
            .set_default("provider.vendor", default_vendor())?
            .set_default("provider.model", "")?
            .set_default("provider.timeout_secs", default_timeout_secs())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("LARK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().inspect_err(|err| {
            tracing::debug!("Configuration error: {:?}", err);
        })
    }
}

fn default_name() -> String {
    "assistant".to_string()
}

fn default_instructions() -> String {
    "You are a helpful assistant.".to_string()
}

fn default_vendor() -> String {
    "qwen".to_string()
}

fn default_timeout_secs() -> u64 {
    lark::providers::factory::INIT_TIMEOUT.as_secs()
}
