//! Wire-format types for the chat completions API.

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

/// Role of the message sender.
#[derive(Debug, Copy, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for a streaming chat completion.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub stream: bool,
    pub messages: NonEmpty<Message>,
}

/// One decoded frame of the streamed response.
///
/// Every field is optional: providers interleave frames that carry no text
/// delta (role announcements, usage accounting, keep-alives), and those must
/// decode rather than fault.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChunkChoice {
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

impl ChatChunk {
    /// Extract the text delta carried by this frame, if any.
    ///
    /// Walks `choices[0].delta.content`; any missing step yields `None`
    /// instead of an error, as does an empty delta.
    pub fn into_delta_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .filter(|content| !content.is_empty())
    }
}
