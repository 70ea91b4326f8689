use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The author of a message in a chat request
pub enum Role {
    System,
    User,
    Assistant,
}
