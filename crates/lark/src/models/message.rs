use super::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A message to or from an LLM
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }

    /// Create a system message carrying agent instructions
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// One incremental piece of an assistant response
pub struct StreamFragment {
    pub content: String,
    /// Set on the chunk that carries the upstream finish reason
    pub terminal: bool,
}

impl StreamFragment {
    pub fn new<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            terminal: false,
        }
    }

    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("be brief").role, Role::System);
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("hello").content, "hello");
    }

    #[test]
    fn test_message_serializes_lowercase_role() -> anyhow::Result<()> {
        let value = serde_json::to_value(Message::user("hi"))?;
        assert_eq!(value, json!({"role": "user", "content": "hi"}));
        Ok(())
    }
}
