//! Core client trait and error types.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use nonempty::NonEmpty;
use thiserror::Error;

use crate::model::Message;

/// Errors that can occur during client operations.
///
/// Per-line issues inside the event stream (malformed frames, frames without
/// a text delta) are never errors; they are dropped by the parsing layer.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A stream of generated text fragments, in arrival order.
///
/// Each item is either the next fragment of model output or a fatal
/// transport error, after which the stream ends.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>;

/// Streaming chat trait for LLM providers.
///
/// Implement this trait to relay a conversation to a provider and consume
/// the generated answer incrementally.
///
/// # Example
/// ```rust,ignore
/// let client = OpenRouterClient::new(config);
/// let mut stream = client.chat_stream(messages).await?;
/// while let Some(fragment) = stream.next().await {
///     print!("{}", fragment?);
/// }
/// ```
#[async_trait]
pub trait StreamingClient: Send + Sync {
    /// Send one streaming chat request.
    ///
    /// Returns a stream of text fragments as the model generates the
    /// response. Fails fast on transport errors or a non-success status;
    /// the error for the latter carries the status code and any error body
    /// the API returned.
    async fn chat_stream(&self, messages: NonEmpty<Message>)
        -> Result<FragmentStream, ClientError>;
}
