use anyhow::Result;
use async_trait::async_trait;

use super::base::{ChatModel, FragmentStream};
use super::configs::{ArkProviderConfig, VendorTemplate};
use super::factory::Vendor;
use super::openai_compatible::ChatCompletionsClient;
use crate::models::message::Message;

pub const ARK_HOST: &str = "https://ark.cn-beijing.volces.com/api/v3";
pub const ARK_MODEL: &str = "doubao-1-5-pro-32k-250115";

pub const ARK_TEMPLATE: VendorTemplate = VendorTemplate {
    api_key_env: "ARK_API_KEY",
    base_url_env: None,
    default_host: Some(ARK_HOST),
    default_model: ARK_MODEL,
    // "ep-" covers inference endpoint ids created in the Ark console
    model_prefixes: &["doubao", "deepseek", "ep-"],
};

/// Doubao and hosted models on Volcengine Ark
pub struct ArkProvider {
    client: ChatCompletionsClient,
}

impl ArkProvider {
    pub fn new(config: ArkProviderConfig) -> Result<Self> {
        let client = ChatCompletionsClient::new(&config.host, &config.api_key, &config.model)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChatModel for ArkProvider {
    fn vendor(&self) -> Vendor {
        Vendor::Ark
    }

    fn model(&self) -> &str {
        self.client.model()
    }

    async fn generate(&self, messages: &[Message]) -> Result<Message> {
        self.client.generate(messages).await
    }

    async fn stream(&self, messages: &[Message]) -> Result<FragmentStream> {
        self.client.stream(messages).await
    }
}
