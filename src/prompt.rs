//! Prompt acquisition: invocation arguments first, then piped stdin.

use std::io::IsTerminal;

use itertools::Itertools;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Join invocation arguments into a prompt.
///
/// Tokens are joined with a single space and the result is trimmed;
/// whitespace-only arguments resolve to `None`.
pub fn from_args<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let joined = args.into_iter().join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Read a reader to completion and trim the result.
pub async fn read_to_end<R>(mut reader: R) -> std::io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let mut text = String::new();
    reader.read_to_string(&mut text).await?;
    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Resolve the prompt for this invocation.
///
/// Arguments win; stdin is only consulted when no arguments were given and
/// stdin is not an interactive terminal. On a terminal with no arguments
/// this resolves to `None` immediately instead of blocking on input.
pub async fn resolve() -> std::io::Result<Option<String>> {
    if let Some(prompt) = from_args(std::env::args().skip(1)) {
        return Ok(Some(prompt));
    }
    if std::io::stdin().is_terminal() {
        return Ok(None);
    }
    read_to_end(tokio::io::stdin()).await
}
