//! These models represent the objects passed between the agent and the chat model
//!
//! Vendors speak the OpenAI chat-completions format on the wire. We convert to and from
//! these internal structs at the provider boundary using the helpers in `providers::utils`.
pub mod message;
pub mod role;
