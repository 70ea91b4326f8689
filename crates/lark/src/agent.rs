use crate::chat::request_messages;
use crate::errors::AgentResult;
use crate::models::message::Message;
use crate::providers::base::ChatModel;
use crate::providers::factory;

/// Agent binds a name and system instructions to a chat model
///
/// Agents are immutable once built.
pub struct Agent {
    name: String,
    instructions: String,
    model: Box<dyn ChatModel>,
}

impl Agent {
    /// Create a new Agent, resolving its chat model from the vendor's environment variables
    pub async fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        vendor: &str,
        model_name: &str,
    ) -> AgentResult<Self> {
        let model = factory::resolve(vendor, model_name).await?;
        Ok(Self::with_model(name, instructions, model))
    }

    /// Create a new Agent around an already resolved chat model
    pub fn with_model(
        name: impl Into<String>,
        instructions: impl Into<String>,
        model: Box<dyn ChatModel>,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn model(&self) -> &dyn ChatModel {
        self.model.as_ref()
    }

    /// The messages sent to the model for one user input
    pub fn messages(&self, input: &str) -> Vec<Message> {
        request_messages(&self.instructions, input)
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("instructions", &self.instructions)
            .field("vendor", &self.model.vendor())
            .field("model", &self.model.model())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AgentError;
    use crate::providers::mock::MockProvider;

    #[test]
    fn test_messages_wrap_instructions_and_input() {
        let agent = Agent::with_model(
            "translator",
            "Translate to German.",
            Box::new(MockProvider::default()),
        );

        assert_eq!(agent.name(), "translator");
        assert_eq!(
            agent.messages("good morning"),
            vec![
                Message::system("Translate to German."),
                Message::user("good morning"),
            ]
        );
    }

    #[tokio::test]
    async fn test_new_rejects_unknown_vendor() {
        let err = Agent::new("a", "b", "nope", "").await.unwrap_err();
        assert!(matches!(err, AgentError::UnsupportedVendor(_)));
    }
}
