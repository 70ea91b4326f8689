//! Agents and runners over OpenAI-compatible chat model vendors.
//!
//! Resolve a chat model from environment credentials, bind it to an [`agent::Agent`]
//! together with system instructions, and drive a single generate or streaming call
//! with a [`runner::Runner`].
pub mod agent;
pub mod chat;
pub mod environment;
pub mod errors;
pub mod models;
pub mod providers;
pub mod runner;

pub use agent::Agent;
pub use errors::{AgentError, AgentResult};
pub use providers::factory::Vendor;
pub use runner::{RunState, Runner};
