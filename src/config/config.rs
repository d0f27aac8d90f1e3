//! Application configuration and CLI argument parsing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ActivityRoot;
use super::voices;
use crate::llm::{DEFAULT_API_URL, DEFAULT_PROMPT};
use crate::net::{DEFAULT_PROBE_ADDR, DEFAULT_PROBE_TIMEOUT};

/// Client configuration.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "sugar-ai-client")]
#[command(author, version, about = "Ask questions to the Sugar Labs AI service", long_about = None)]
pub struct AppConfig {
    /// List all known TTS voices and exit
    #[arg(long)]
    pub list_voices: bool,

    /// Show detailed information about a specific voice and exit
    #[arg(long)]
    pub voice_info: Option<String>,

    /// Activity root directory (provided by the Sugar shell)
    #[arg(long, env = "SUGAR_ACTIVITY_ROOT")]
    pub activity_root: Option<PathBuf>,

    /// Prompted LLM endpoint
    #[arg(long, short = 'u', env = "SUGAR_AI_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// System prompt sent along with every question
    #[arg(long, short = 'p', default_value = DEFAULT_PROMPT)]
    pub system_prompt: String,

    /// Maximum answer length requested from the model
    #[arg(long, default_value = "200")]
    pub max_length: u32,

    /// Seconds to wait for the model to answer (read timeout)
    #[arg(long, short = 't', default_value = "120")]
    pub request_timeout: u64,

    /// Address used for the connectivity preflight
    #[arg(long, default_value_t = DEFAULT_PROBE_ADDR)]
    pub probe_addr: SocketAddr,

    /// Seconds before the connectivity preflight gives up
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT.as_secs())]
    pub probe_timeout: u64,

    /// Store a new API key, reload it and exit
    #[arg(long, value_name = "KEY")]
    pub set_key: Option<String>,

    /// Ask a single question instead of starting the interactive loop
    #[arg(long, short = 'q')]
    pub question: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let config = Self::parse();

        if config.list_voices {
            voices::print_voices();
            std::process::exit(0);
        }

        if let Some(ref voice_name) = config.voice_info {
            match voices::print_voice_info(voice_name) {
                Ok(_) => std::process::exit(0),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        config
    }

    pub fn activity_root(&self) -> ActivityRoot {
        ActivityRoot::new(self.activity_root.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            anyhow::bail!("API URL must start with http:// or https://, got {}", self.api_url);
        }

        if self.request_timeout == 0 {
            anyhow::bail!("Request timeout must be positive");
        }

        if self.probe_timeout == 0 {
            anyhow::bail!("Probe timeout must be positive");
        }

        if self.max_length == 0 {
            anyhow::bail!("Max length must be positive");
        }

        if self.system_prompt.trim().is_empty() {
            anyhow::bail!("System prompt must not be empty");
        }

        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        match &self.activity_root {
            Some(root) => info!("  Activity root: {}", root.display()),
            None => info!("  Activity root: <unset>"),
        }
        info!("  API URL: {}", self.api_url);
        info!("  System prompt: {}...", &self.system_prompt.chars().take(50).collect::<String>());
        info!("  Max length: {}", self.max_length);
        info!("  Request timeout: {}s", self.request_timeout);
        info!("  Probe: {} ({}s)", self.probe_addr, self.probe_timeout);
    }
}
