use anyhow::Result;
use async_trait::async_trait;

use super::base::{ChatModel, FragmentStream};
use super::configs::{QwenProviderConfig, VendorTemplate};
use super::factory::Vendor;
use super::openai_compatible::ChatCompletionsClient;
use crate::models::message::Message;

pub const QWEN_MODEL: &str = "qwen-plus";

pub const QWEN_TEMPLATE: VendorTemplate = VendorTemplate {
    api_key_env: "TONGYI_API_KEY",
    base_url_env: Some("TONGYI_BASE_URL"),
    default_host: None,
    default_model: QWEN_MODEL,
    model_prefixes: &["qwen", "qwq", "qvq"],
};

/// Tongyi Qwen models served through DashScope's OpenAI-compatible mode
pub struct QwenProvider {
    client: ChatCompletionsClient,
}

impl QwenProvider {
    pub fn new(config: QwenProviderConfig) -> Result<Self> {
        let client = ChatCompletionsClient::new(&config.host, &config.api_key, &config.model)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChatModel for QwenProvider {
    fn vendor(&self) -> Vendor {
        Vendor::Qwen
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
