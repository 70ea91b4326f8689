//! Uniform generate/stream calls over any [`ChatModel`], with failures mapped to [`AgentError`]

use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::providers::base::{ChatModel, FragmentStream};

/// The outbound request for one turn: the instructions followed by the user input
pub fn request_messages(instructions: &str, input: &str) -> Vec<Message> {
    vec![Message::system(instructions), Message::user(input)]
}

/// Get the complete assistant response in one call
pub async fn generate(model: &dyn ChatModel, messages: &[Message]) -> AgentResult<Message> {
    model.generate(messages).await.map_err(|e| {
        tracing::error!(vendor = %model.vendor(), model = model.model(), "llm generate failed: {}", e);
        AgentError::Generation(e)
    })
}

/// Open a streamed response; the caller owns the returned stream
pub async fn stream(model: &dyn ChatModel, messages: &[Message]) -> AgentResult<FragmentStream> {
    model.stream(messages).await.map_err(|e| {
        tracing::error!(vendor = %model.vendor(), model = model.model(), "llm stream failed: {}", e);
        AgentError::Stream(e.context("failed to start streaming"))
    })
}
