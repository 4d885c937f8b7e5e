//! Server-Sent Events (SSE) stream processing utilities.
//!
//! This module turns an incremental byte stream into the sequence of SSE
//! data payloads it carries.
//!
//! SSE format:
//! ```text
//! data: {"key": "value"}
//!
//! data: {"another": "event"}
//!
//! data: [DONE]
//! ```
//!
//! Lines are recognized at the byte level: chunks accumulate in a
//! [`LineBuffer`] and only complete, `\n`-terminated lines are decoded as
//! text, so a multi-byte UTF-8 sequence split across two network reads is
//! reassembled before decoding. Anything that is not a `data:` line (blank
//! separators, `:` comments, named-event framing) is ignored, as are empty
//! payloads and the `[DONE]` end marker.

use bytes::{Bytes, BytesMut};
use futures::stream::{self, Stream, StreamExt};

use crate::client::ClientError;

/// Accumulates partial line data between successive reads.
///
/// Holds raw bytes; a line only leaves the buffer once its terminator has
/// arrived. Unterminated trailing bytes stay in the buffer (and are simply
/// dropped with it when the stream ends).
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: BytesMut,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of raw bytes.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Split off the next complete line, trimmed of trailing whitespace.
    ///
    /// Returns `None` until a `\n` is available.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let line = self.buf.split_to(pos + 1);
        Some(String::from_utf8_lossy(&line).trim_end().to_string())
    }
}

/// Extension trait for `reqwest::Response` to enable SSE streaming.
pub trait SseResponseExt {
    /// Convert the response body into a stream of SSE data payloads.
    ///
    /// Yields the content after the `data:` prefix for each event line,
    /// skipping empty payloads and the `[DONE]` marker.
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send;
}

impl SseResponseExt for reqwest::Response {
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send {
        data_payloads(self.bytes_stream())
    }
}

/// Fold a fallible byte stream into its SSE data payloads.
///
/// This is the read loop behind [`SseResponseExt::sse`], generic over the
/// byte source so the chunk-boundary behavior can be exercised directly.
pub fn data_payloads<S, E>(bytes: S) -> impl Stream<Item = Result<String, ClientError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send,
    E: Into<ClientError> + Send,
{
    stream::unfold(
        (Box::pin(bytes), LineBuffer::new(), false),
        |(mut bytes, mut buffer, mut ended)| async move {
            loop {
                // Drain complete lines before reading more data
                while let Some(line) = buffer.next_line() {
                    let Some(payload) = parse_data_line(&line) else {
                        continue;
                    };
                    if payload.is_empty() || is_done_marker(payload) {
                        continue;
                    }
                    return Some((Ok(payload.to_string()), (bytes, buffer, ended)));
                }

                // Anything left in the buffer here is an unterminated line;
                // it is discarded, not parsed.
                if ended {
                    return None;
                }

                match bytes.next().await {
                    Some(Ok(chunk)) => buffer.extend(&chunk),
                    Some(Err(e)) => {
                        return Some((Err(e.into()), (bytes, buffer, ended)));
                    }
                    None => ended = true,
                }
            }
        },
    )
}

/// Parse an SSE line to extract the data portion.
///
/// SSE lines are in the format: `data: <content>`
///
/// # Example
/// ```
/// use orask::sse::parse_data_line;
///
/// let line = "data: {\"key\": \"value\"}";
/// assert_eq!(parse_data_line(line), Some("{\"key\": \"value\"}"));
///
/// let line = "event: message";
/// assert_eq!(parse_data_line(line), None);
/// ```
pub fn parse_data_line(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim)
}

/// Check if an SSE data payload indicates the stream is done.
///
/// # Example
/// ```
/// use orask::sse::is_done_marker;
///
/// assert!(is_done_marker("[DONE]"));
/// assert!(!is_done_marker(""));
/// assert!(!is_done_marker("{\"data\": \"value\"}"));
/// ```
pub fn is_done_marker(payload: &str) -> bool {
    payload == "[DONE]"
}
