//! Process-wide configuration, resolved once at startup.

use std::collections::HashMap;
use std::env;

use crate::client::ClientError;

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Immutable configuration for one invocation.
///
/// Resolved from the environment once and handed to the client whole;
/// nothing reads ambient environment state after startup.
///
/// | Variable | Effect |
/// |---|---|
/// | `OPENROUTER_API_KEY` | bearer credential, required |
/// | `OPENROUTER_MODEL` | overrides the default model |
/// | `OPENROUTER_BASE_URL` | overrides the default API base URL |
/// | `OPENROUTER_SYSTEM` | optional system instructions |
/// | `OPENROUTER_HTTP_REFERER` | optional `HTTP-Referer` header |
/// | `OPENROUTER_APP_TITLE` | optional `X-Title` header |
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for bearer authentication.
    pub api_key: SecretString,

    /// Model identifier; the provider default applies when unset.
    pub model: Option<String>,

    /// Base URL for API endpoints; the provider default applies when unset.
    pub base_url: Option<String>,

    /// System instructions sent ahead of the user message.
    pub system: Option<String>,

    /// Additional HTTP headers to include in requests.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// All values are trimmed; a value that is empty after trimming counts
    /// as unset. A missing API key is a configuration error.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = env_trimmed("OPENROUTER_API_KEY")
            .ok_or_else(|| ClientError::Config("OPENROUTER_API_KEY is not set".to_string()))?;

        Ok(Self {
            api_key: SecretString::new(api_key),
            model: env_trimmed("OPENROUTER_MODEL"),
            base_url: env_trimmed("OPENROUTER_BASE_URL"),
            system: env_trimmed("OPENROUTER_SYSTEM"),
            extra_headers: attribution_headers(
                env_trimmed("OPENROUTER_HTTP_REFERER"),
                env_trimmed("OPENROUTER_APP_TITLE"),
            ),
        })
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Map the optional OpenRouter attribution values onto request headers.
fn attribution_headers(
    referer: Option<String>,
    title: Option<String>,
) -> Option<HashMap<String, String>> {
    let mut headers = HashMap::new();
    if let Some(referer) = referer {
        headers.insert("HTTP-Referer".to_string(), referer);
    }
    if let Some(title) = title {
        headers.insert("X-Title".to_string(), title);
    }
    (!headers.is_empty()).then_some(headers)
}
