//! OpenRouter chat completions client implementation.
//!
//! OpenRouter exposes the OpenAI-compatible Chat Completions API; the same
//! client works against any compatible endpoint via the base URL override.
//! See: <https://openrouter.ai/docs/api-reference/chat-completion>

use async_trait::async_trait;
use futures::StreamExt;
use nonempty::NonEmpty;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::client::{ClientError, FragmentStream, StreamingClient};
use crate::config::Config;
use crate::model::{ChatChunk, ChatRequest, Message};
use crate::sse::SseResponseExt;

const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// OpenRouter client over HTTP.
pub struct OpenRouterClient {
    config: Config,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client from resolved configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn build_request(
        &self,
        messages: NonEmpty<Message>,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let api_base = self.config.base_url.as_deref().unwrap_or(DEFAULT_API_BASE);
        let url = format!("{}/chat/completions", api_base);

        let model = self
            .config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        debug!(%url, %model, "sending streaming chat completion request");

        let request_body = ChatRequest {
            model,
            stream: true,
            messages,
        };

        let http_client = reqwest::Client::builder().build()?;

        let mut req = http_client
            .post(&url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream");

        if let Some(headers) = &self.config.extra_headers {
            for (key, value) in headers {
                req = req.header(key, value);
            }
        }

        Ok(req.json(&request_body))
    }

    /// Map the SSE payload stream onto the text fragments it carries.
    fn process_stream(response: reqwest::Response) -> FragmentStream {
        Box::pin(response.sse().filter_map(|result| async move {
            match result {
                Ok(payload) => extract_fragment(&payload).map(Ok),
                Err(e) => Some(Err(e)),
            }
        }))
    }
}

/// Decode one data payload into a text fragment.
///
/// Payloads that are not valid JSON are dropped: the framing does not
/// guarantee every line is well-formed for this consumer. Well-formed
/// frames without a text delta yield nothing.
fn extract_fragment(payload: &str) -> Option<String> {
    let chunk = match serde_json::from_str::<ChatChunk>(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            debug!(error = %e, "dropping undecodable frame");
            return None;
        }
    };
    chunk.into_delta_content()
}

#[async_trait]
impl StreamingClient for OpenRouterClient {
    async fn chat_stream(
        &self,
        messages: NonEmpty<Message>,
    ) -> Result<FragmentStream, ClientError> {
        let response = self.build_request(messages)?.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status,
                body: body.trim().to_string(),
            });
        }

        Ok(Self::process_stream(response))
    }
}
