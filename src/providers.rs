//! LLM provider implementations.

pub mod openrouter;

// Re-export for convenience
pub use openrouter::OpenRouterClient;
