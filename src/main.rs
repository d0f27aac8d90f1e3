//! Sugar AI client - ask the Sugar Labs prompted LLM service from the terminal.
//!
//! Stores the API key in the activity data directory, prepares the Kokoro voice
//! cache and answers questions either one-shot or in an interactive loop.

mod config;
mod llm;
mod net;
mod tts;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use config::AppConfig;
use llm::{Answer, AskError, KeyStore, LlmClient};

/// Print the outcome of one question the way the activity shows it.
///
/// # Returns
/// `true` when a non-blank answer was printed.
fn report(result: &Result<Answer, AskError>) -> bool {
    match result {
        Ok(answer) if !answer.is_blank() => {
            println!("LLM ANS: {}", answer);
            true
        }
        Ok(_) => {
            println!("Error, LLM did not respond");
            false
        }
        Err(e) => {
            println!("Error, LLM did not respond");
            println!("{}", e.user_hint());
            false
        }
    }
}

/// Read questions from stdin until EOF, an empty line or `quit`.
fn run_interactive(client: &LlmClient) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter question to LLM: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let question = line?;
        let question = question.trim();

        if question.is_empty() || question.eq_ignore_ascii_case("quit") {
            break;
        }

        report(&client.ask(question, None));
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if config.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .with_writer(io::stderr)
        .init();

    info!("Sugar AI client v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }
    config.log_config();

    let root = config.activity_root();
    let key_store = KeyStore::open(root.clone());

    if let Some(ref new_key) = config.set_key {
        if let Err(e) = key_store.save(new_key) {
            anyhow::bail!("Could not save API key: {}", e);
        }
        if key_store.reload().is_none() {
            anyhow::bail!("API key was saved but could not be read back");
        }
        info!("API key updated");
        return Ok(());
    }

    match tts::resolve_voice_cache_dir(&root) {
        Some(dir) => info!("Voice cache: {}", dir.display()),
        None => warn!("Voice cache: downloader default"),
    }

    let client = LlmClient::new(&config, key_store.credential())?;

    if let Some(ref question) = config.question {
        if !report(&client.ask(question, None)) {
            std::process::exit(1);
        }
        return Ok(());
    }

    run_interactive(&client)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_report_blank_answer_is_no_response() {
        assert!(report(&Ok(Answer::Text("Paris".into()))));
        assert!(!report(&Ok(Answer::Text(String::new()))));
        assert!(!report(&Ok(Answer::Raw(json!(null)))));
        assert!(!report(&Err(AskError::NoConnection)));
    }
}
