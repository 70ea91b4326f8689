use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::sync::Mutex;

use crate::models::message::{Message, StreamFragment};
use crate::providers::base::{ChatModel, FragmentStream};
use crate::providers::factory::Vendor;

/// A scripted stream item; errors are kept as text so the script can be replayed
#[derive(Clone)]
pub enum MockChunk {
    Fragment(&'static str),
    Error(&'static str),
}

/// A mock provider that returns pre-configured responses for testing
#[derive(Clone, Default)]
pub struct MockProvider {
    response: Option<Message>,
    chunks: Vec<MockChunk>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
    releases: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a mock provider that answers `generate` with the given message
    pub fn new(response: Message) -> Self {
        Self {
            response: Some(response),
            ..Default::default()
        }
    }

    /// Create a mock provider that streams the given chunks
    pub fn streaming(chunks: Vec<MockChunk>) -> Self {
        Self {
            chunks,
            ..Default::default()
        }
    }

    /// Every message list this provider was called with, in order
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    /// How many times a stream resource was released
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    fn record(&self, messages: &[Message]) {
        self.requests.lock().unwrap().push(messages.to_vec());
    }
}

#[async_trait]
impl ChatModel for MockProvider {
    fn vendor(&self) -> Vendor {
        Vendor::Qwen
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, messages: &[Message]) -> Result<Message> {
        self.record(messages);
        self.response
            .clone()
            .ok_or_else(|| anyhow!("no response configured"))
    }

    async fn stream(&self, messages: &[Message]) -> Result<FragmentStream> {
        self.record(messages);
        let fragments = self
            .chunks
            .iter()
            .map(|chunk| match chunk {
                MockChunk::Fragment(text) => Ok(StreamFragment::new(*text)),
                MockChunk::Error(reason) => Err(anyhow!(*reason)),
            })
            .collect();
        let releases = self.releases.clone();
        Ok(FragmentStream::from_fragments(fragments).on_release(move || {
            releases.fetch_add(1, Ordering::SeqCst);
        }))
    }
}
