use anyhow::{anyhow, Result};
use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use serde_json::{json, Value};

use crate::models::message::{Message, StreamFragment};

const DONE_SIGNAL: &str = "[DONE]";

/// Convert internal Message format to the OpenAI chat-completions message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Surface an upstream `error` object as an error
fn check_openai_error(response: &Value) -> Result<()> {
    match response.get("error") {
        Some(error) if !error.is_null() => Err(anyhow!("API error: {}", error)),
        _ => Ok(()),
    }
}

/// Convert a non-streaming chat-completions response into an assistant message
pub fn openai_response_to_message(response: &Value) -> Result<Message> {
    check_openai_error(response)?;

    let message = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| anyhow!("No message in response: {}", response))?;

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .unwrap_or_default();

    Ok(Message::assistant(content))
}

/// Convert one streamed chunk into a fragment
///
/// Chunks without choices (e.g. trailing usage reports) produce `None`.
pub fn openai_chunk_to_fragment(chunk: &Value) -> Result<Option<StreamFragment>> {
    check_openai_error(chunk)?;

    let Some(choice) = chunk.get("choices").and_then(|choices| choices.get(0)) else {
        return Ok(None);
    };

    let content = choice
        .get("delta")
        .and_then(|delta| delta.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or_default();
    let terminal = choice
        .get("finish_reason")
        .is_some_and(|reason| !reason.is_null());

    Ok(Some(StreamFragment {
        content: content.to_string(),
        terminal,
    }))
}

#[derive(Debug, PartialEq)]
pub enum SseEvent {
    Data(Value),
    Done,
    Skip,
}

/// Parse one server-sent-events frame (the text between blank lines)
pub fn parse_sse_frame(frame: &str) -> Result<SseEvent> {
    let data: Vec<&str> = frame
        .lines()
        .filter(|line| !line.starts_with(':'))
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|payload| payload.strip_prefix(' ').unwrap_or(payload))
        .collect();

    if data.is_empty() {
        return Ok(SseEvent::Skip);
    }

    let payload = data.join("\n");
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(SseEvent::Skip);
    }
    if payload == DONE_SIGNAL {
        return Ok(SseEvent::Done);
    }

    let value = serde_json::from_str(payload)
        .map_err(|e| anyhow!("Invalid stream chunk {}: {}", payload, e))?;
    Ok(SseEvent::Data(value))
}

fn frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

/// Decode a chat-completions SSE body into response fragments
///
/// Frames are only decoded once complete, so multi-byte characters split across
/// network chunks are reassembled before UTF-8 validation.
pub fn sse_fragments<S, E>(body: S) -> impl Stream<Item = Result<StreamFragment>> + Send + 'static
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    async_stream::try_stream! {
        let mut body = Box::pin(body);
        let mut buffer: Vec<u8> = Vec::new();
        let mut exhausted = false;

        'frames: loop {
            while let Some(pos) = frame_end(&buffer) {
                let frame: Vec<u8> = buffer.drain(..pos + 2).collect();
                let frame = std::str::from_utf8(&frame[..pos])?;
                match parse_sse_frame(frame)? {
                    SseEvent::Done => break 'frames,
                    SseEvent::Skip => continue,
                    SseEvent::Data(chunk) => {
                        if let Some(fragment) = openai_chunk_to_fragment(&chunk)? {
                            yield fragment;
                        }
                    }
                }
            }

            if exhausted {
                // A final frame may arrive without its trailing blank line
                let rest = std::mem::take(&mut buffer);
                let rest = std::str::from_utf8(&rest)?;
                if let SseEvent::Data(chunk) = parse_sse_frame(rest)? {
                    if let Some(fragment) = openai_chunk_to_fragment(&chunk)? {
                        yield fragment;
                    }
                }
                break;
            }

            match body.next().await {
                Some(chunk) => {
                    let chunk = chunk?;
                    buffer.extend(chunk.iter().filter(|b| **b != b'\r'));
                }
                None => exhausted = true,
            }
        }
    }
}
