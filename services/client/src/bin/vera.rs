//! services/client/src/bin/vera.rs

use client_lib::{
    adapters::HttpBackendAdapter,
    config::Config,
    console::{Command, ConsoleSession, Outcome},
    error::ClientError,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Backend at {}", config.api_base_url);

    // --- 2. Build the Backend Adapter & Session ---
    let backend = Arc::new(HttpBackendAdapter::new(
        config.api_base_url.clone(),
        config.request_timeout,
    )?);
    let session = ConsoleSession::new(backend, &config);

    println!("VERA legal assistant. Type /help for commands.");
    println!("{}", session.start().await);

    // --- 3. Prompt Loop ---
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let domain = session.chat().selected_domain().await;
        print!("[{}] > ", domain.value);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match session.handle(command).await {
            Ok(Outcome::Continue(text)) => {
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
            Ok(Outcome::Quit) => break,
            Err(e) => {
                error!("Command failed: {}", e);
                println!("Error: {}", e);
            }
        }
    }

    info!("Session ended.");
    Ok(())
}
