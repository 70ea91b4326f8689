use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

use super::factory::Vendor;
use crate::models::message::{Message, StreamFragment};

/// A chat model bound to one vendor, model and set of credentials
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// The vendor serving this model
    fn vendor(&self) -> Vendor;

    /// The model identifier sent with each request
    fn model(&self) -> &str;

    /// Produce the complete assistant response for the given messages
    async fn generate(&self, messages: &[Message]) -> Result<Message>;

    /// Start a streamed response for the given messages
    async fn stream(&self, messages: &[Message]) -> Result<FragmentStream>;
}

/// A lazy, single-consumption sequence of response fragments.
///
/// The stream owns whatever resource backs it (usually an HTTP response body) together
/// with a release hook. The resource is released exactly once: when the sequence ends,
/// when it yields its first error, on [`FragmentStream::close`], or when it is dropped.
/// Once released, the stream only reports end-of-sequence.
pub struct FragmentStream {
    inner: BoxStream<'static, Result<StreamFragment>>,
    release: Option<Box<dyn FnOnce() + Send>>,
    closed: bool,
}

impl FragmentStream {
    pub fn new<S>(inner: S) -> Self
    where
        S: Stream<Item = Result<StreamFragment>> + Send + 'static,
    {
        Self {
            inner: inner.boxed(),
            release: None,
            closed: false,
        }
    }

    /// Build a stream over fragments that are already in memory
    pub fn from_fragments(fragments: Vec<Result<StreamFragment>>) -> Self {
        Self::new(stream::iter(fragments))
    }

    /// Register the hook that runs when the underlying resource is released
    pub fn on_release<F>(mut self, release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.release = Some(Box::new(release));
        self
    }

    /// Release the underlying resource; later calls are no-ops
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // Drop the source first so the connection is gone before the hook observes it
        self.inner = stream::empty().boxed();
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Stream for FragmentStream {
    type Item = Result<StreamFragment>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.closed {
            return Poll::Ready(None);
        }

        match this.inner.poll_next_unpin(cx) {
            Poll::Ready(None) => {
                this.close();
                Poll::Ready(None)
            }
            Poll::Ready(Some(Err(e))) => {
                this.close();
                Poll::Ready(Some(Err(e)))
            }
            other => other,
        }
    }
}

impl Drop for FragmentStream {
    fn drop(&mut self) {
        self.close();
    }
}
