use super::{
    ark::{ArkProvider, ARK_TEMPLATE},
    base::ChatModel,
    configs::{ProviderConfig, VendorTemplate},
    qwen::{QwenProvider, QWEN_TEMPLATE},
};
use crate::environment::{Environment, RealEnvironment};
use crate::errors::{AgentError, AgentResult};
use anyhow::{anyhow, Result};
use std::future::Future;
use std::time::Duration;
use strum_macros::{Display, EnumIter, EnumString};

/// Upper bound on how long a vendor constructor may take
pub const INIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(EnumIter, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Vendor {
    Qwen,
    Ark,
}

impl Vendor {
    pub fn template(&self) -> &'static VendorTemplate {
        match self {
            Vendor::Qwen => &QWEN_TEMPLATE,
            Vendor::Ark => &ARK_TEMPLATE,
        }
    }

    pub fn parse(name: &str) -> AgentResult<Self> {
        name.trim()
            .parse()
            .map_err(|_| AgentError::UnsupportedVendor(name.to_string()))
    }
}

pub async fn get_provider(config: ProviderConfig) -> Result<Box<dyn ChatModel>> {
    match config {
        ProviderConfig::Qwen(qwen_config) => Ok(Box::new(QwenProvider::new(qwen_config)?)),
        ProviderConfig::Ark(ark_config) => Ok(Box::new(ArkProvider::new(ark_config)?)),
    }
}

fn required_var(env: &dyn Environment, key: &str) -> AgentResult<String> {
    env.get_var(key).map_err(|_| AgentError::configuration(key))
}

/// Turn a vendor and model name into a vendor configuration using environment credentials
///
/// An empty model name selects the vendor's default model. Missing variables are
/// reported before the model name is checked.
pub fn resolve_config(
    vendor: Vendor,
    model_name: &str,
    env: &dyn Environment,
) -> AgentResult<ProviderConfig> {
    let template = vendor.template();
    let model = match model_name.trim() {
        "" => template.default_model.to_string(),
        name => name.to_string(),
    };

    let api_key = required_var(env, template.api_key_env)?;
    let base_url = template
        .base_url_env
        .map(|key| required_var(env, key))
        .transpose()?;

    if !template.accepts_model(&model) {
        return Err(AgentError::UnsupportedModel {
            vendor: vendor.to_string(),
            model,
        });
    }

    Ok(ProviderConfig::build(vendor, api_key, base_url, model))
}

async fn initialize<F>(vendor: Vendor, timeout: Duration, init: F) -> AgentResult<Box<dyn ChatModel>>
where
    F: Future<Output = Result<Box<dyn ChatModel>>>,
{
    match tokio::time::timeout(timeout, init).await {
        Ok(Ok(model)) => Ok(model),
        Ok(Err(source)) => Err(AgentError::Initialization {
            vendor: vendor.to_string(),
            source,
        }),
        Err(_) => Err(AgentError::Initialization {
            vendor: vendor.to_string(),
            source: anyhow!("timed out after {:?}", timeout),
        }),
    }
}

/// Resolve a chat model with an explicit environment and initialization deadline
pub async fn resolve_with(
    vendor: &str,
    model_name: &str,
    env: &dyn Environment,
    timeout: Duration,
) -> AgentResult<Box<dyn ChatModel>> {
    let result = async {
        let vendor = Vendor::parse(vendor)?;
        let config = resolve_config(vendor, model_name, env)?;
        tracing::debug!(%vendor, model = config.model(), "initializing chat model");
        initialize(vendor, timeout, get_provider(config)).await
    }
    .await;

    if let Err(e) = &result {
        tracing::error!(vendor, model = model_name, "error resolving chat model: {}", e);
    }
    result
}

/// Resolve a chat model from process environment variables
pub async fn resolve(vendor: &str, model_name: &str) -> AgentResult<Box<dyn ChatModel>> {
    resolve_with(vendor, model_name, &RealEnvironment, INIT_TIMEOUT).await
}
