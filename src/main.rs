//! orask: send one prompt to OpenRouter, stream the answer to stdout.

use std::io::Write;

use futures::StreamExt;
use nonempty::NonEmpty;
use tracing_subscriber::EnvFilter;

use orask::client::StreamingClient;
use orask::config::Config;
use orask::model::Message;
use orask::prompt;
use orask::providers::OpenRouterClient;

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr so stdout carries nothing but the response
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let Some(prompt) = prompt::resolve().await? else {
        return Err("no prompt provided; pass text as arguments or pipe it via stdin".into());
    };

    let messages = match &config.system {
        Some(system) => NonEmpty::from((
            Message::system(system.clone()),
            vec![Message::user(prompt)],
        )),
        None => NonEmpty::new(Message::user(prompt)),
    };

    let client = OpenRouterClient::new(config);
    let mut stream = client.chat_stream(messages).await?;

    let mut stdout = std::io::stdout();
    while let Some(fragment) = stream.next().await {
        write!(stdout, "{}", fragment?)?;
        stdout.flush()?;
    }
    writeln!(stdout)?;

    Ok(())
}
