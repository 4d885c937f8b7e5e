//! # orask - Streaming Prompt Client for OpenRouter
//!
//! A small, pragmatic library behind the `orask` CLI: send one prompt to an
//! OpenRouter-compatible chat completions API and consume the answer as a
//! stream of text fragments, in arrival order, as they are generated.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Streaming via Server-Sent Events, relayed fragment by fragment
//! - Byte-accurate line buffering (multi-byte characters may be split
//!   across network reads)
//! - Immutable startup configuration resolved from the environment
//!
//! ## Example
//! ```no_run
//! use futures::StreamExt;
//! use nonempty::NonEmpty;
//! use orask::client::StreamingClient;
//! use orask::config::Config;
//! use orask::model::Message;
//! use orask::providers::OpenRouterClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // OPENROUTER_API_KEY must be set; OPENROUTER_MODEL is optional
//!     let config = Config::from_env()?;
//!     let client = OpenRouterClient::new(config);
//!
//!     let messages = NonEmpty::new(Message::user("Write a haiku about Rust."));
//!     let mut stream = client.chat_stream(messages).await?;
//!
//!     while let Some(fragment) = stream.next().await {
//!         print!("{}", fragment?);
//!     }
//!     println!();
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod sse;

// Re-exports for convenience
pub use client::{ClientError, FragmentStream, StreamingClient};
pub use config::Config;
pub use model::{ChatRequest, Message, Role};
pub use providers::OpenRouterClient;
