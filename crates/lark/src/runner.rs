use anyhow::anyhow;
use futures::StreamExt;
use std::io::Write;

use crate::agent::Agent;
use crate::chat;
use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::providers::base::FragmentStream;

/// Progress of a streamed run
///
/// `Idle -> Streaming -> Done | Failed`; both end states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Streaming,
    Done,
    Failed,
}

/// Runner pairs an agent with one user input and drives a single model call
pub struct Runner {
    agent: Agent,
    input: String,
    state: RunState,
}

impl Runner {
    pub fn new(agent: Agent, input: impl Into<String>) -> Self {
        Self {
            agent,
            input: input.into(),
            state: RunState::Idle,
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Process the input in generate mode.
    ///
    /// When `want_generation` is false this is a no-op: nothing is sent to the model and
    /// `Ok(None)` is returned. Otherwise the complete reply is returned.
    pub async fn process(&self, want_generation: bool) -> AgentResult<Option<Message>> {
        if !want_generation {
            return Ok(None);
        }

        let messages = self.agent.messages(&self.input);
        chat::generate(self.agent.model(), &messages).await.map(Some)
    }

    /// Stream the reply to stdout
    pub async fn process_stream(&mut self) -> AgentResult<()> {
        let mut stdout = std::io::stdout();
        self.process_stream_to(&mut stdout).await
    }

    /// Stream the reply into `out`, one fragment at a time, followed by a newline
    pub async fn process_stream_to<W: Write>(&mut self, out: &mut W) -> AgentResult<()> {
        if self.state != RunState::Idle {
            return Err(AgentError::Stream(anyhow!(
                "runner for agent {} has already streamed ({:?})",
                self.agent.name(),
                self.state
            )));
        }

        self.state = RunState::Streaming;
        tracing::debug!(agent = self.agent.name(), "streaming started");

        let result = async {
            let messages = self.agent.messages(&self.input);
            let stream = chat::stream(self.agent.model(), &messages).await?;
            report_stream(stream, out).await
        }
        .await;

        self.state = match result {
            Ok(()) => RunState::Done,
            Err(_) => RunState::Failed,
        };
        tracing::debug!(agent = self.agent.name(), state = ?self.state, "streaming finished");
        result
    }
}

/// Write every fragment of `stream` to `out` as it arrives, then a single newline
///
/// The first stream error aborts the relay; output already written stays written.
/// The stream is released on every path.
pub async fn report_stream<W: Write>(mut stream: FragmentStream, out: &mut W) -> AgentResult<()> {
    while let Some(fragment) = stream.next().await {
        let fragment = fragment.map_err(|e| {
            tracing::error!("error receiving stream message: {}", e);
            AgentError::Stream(e.context("failed to receive stream message"))
        })?;
        tracing::trace!(
            bytes = fragment.content.len(),
            terminal = fragment.terminal,
            "fragment received"
        );

        out.write_all(fragment.content.as_bytes())?;
        out.flush()?;
    }

    writeln!(out)?;
    out.flush()?;
    Ok(())
}
