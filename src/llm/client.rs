//! Client for the Sugar Labs prompted LLM service.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::error::AskError;
use super::keystore::CredentialCell;
use super::prompt::{PromptConfig, QueryRequest};
use super::transport::{HttpTransport, Transport, TransportError};
use crate::config::AppConfig;
use crate::net::{Probe, TcpProbe};

pub const DEFAULT_API_URL: &str = "https://ai.sugarlabs.org/ask-llm-prompted";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A successful reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// The `answer` field of the response.
    Text(String),
    /// Any other JSON the service returned, passed through unchanged.
    Raw(Value),
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Text(text) => f.write_str(text),
            Answer::Raw(value) => write!(f, "{}", value),
        }
    }
}

impl Answer {
    /// `true` for replies that carry nothing to show: empty text, `null`,
    /// `false`, zero, or an empty array/object.
    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Text(text) => text.is_empty(),
            Answer::Raw(Value::Null) => true,
            Answer::Raw(Value::Bool(b)) => !b,
            Answer::Raw(Value::Number(n)) => n.as_f64() == Some(0.0),
            Answer::Raw(Value::String(s)) => s.is_empty(),
            Answer::Raw(Value::Array(a)) => a.is_empty(),
            Answer::Raw(Value::Object(o)) => o.is_empty(),
        }
    }
}

/// Outcome of a single question. Always resolved, never panics.
pub type QueryResult = Result<Answer, AskError>;

/// Asks one question per call, blocking until answered or failed.
pub struct LlmClient<T = HttpTransport, P = TcpProbe> {
    api_url: String,
    credential: CredentialCell,
    transport: T,
    probe: P,
    prompt: PromptConfig,
    request_timeout: Duration,
}

impl LlmClient {
    /// Create a client from the application configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AppConfig, credential: CredentialCell) -> anyhow::Result<Self> {
        info!("Using AI service at {}", config.api_url);

        let transport = HttpTransport::new()?;
        let probe = TcpProbe::new(config.probe_addr, config.probe_timeout());
        let prompt = PromptConfig::default().with_system_prompt(config.system_prompt.clone()).with_max_length(config.max_length);

        Ok(Self::with_parts(&config.api_url, credential, transport, probe)
            .with_prompt(prompt)
            .with_request_timeout(config.request_timeout()))
    }
}

impl<T: Transport, P: Probe> LlmClient<T, P> {
    pub fn with_parts(api_url: &str, credential: CredentialCell, transport: T, probe: P) -> Self {
        Self {
            api_url: api_url.to_string(),
            credential,
            transport,
            probe,
            prompt: PromptConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_prompt(mut self, prompt: PromptConfig) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Ask with the client's prompt, optionally replacing the system prompt.
    ///
    /// # Arguments
    /// * `question` - The question to send
    /// * `custom_prompt` - System prompt to use instead of the configured one
    ///
    /// # Returns
    /// The answer, or the reason there is none.
    pub fn ask(&self, question: &str, custom_prompt: Option<&str>) -> QueryResult {
        let mut config = self.prompt.clone();
        if let Some(prompt) = custom_prompt {
            config.system_prompt = prompt.to_string();
        }
        self.ask_with(&QueryRequest::new(question, config), self.request_timeout)
    }

    /// Ask a fully specified request.
    ///
    /// # Arguments
    /// * `request` - Question plus prompt configuration
    /// * `read_timeout` - How long to wait for the server between reads
    ///
    /// # Returns
    /// The [`Answer`] extracted from a 2xx reply.
    ///
    /// # Errors
    /// Returns an [`AskError`] when no key is configured, the network is
    /// unreachable, the server fails or times out, or the reply is not JSON.
    /// Every failure is logged before it is returned.
    pub fn ask_with(&self, request: &QueryRequest, read_timeout: Duration) -> QueryResult {
        let result = self.query(request, read_timeout);
        if let Err(ref e) = result {
            error!("{}", e);
        }
        result
    }

    fn query(&self, request: &QueryRequest, read_timeout: Duration) -> QueryResult {
        let credential = self.credential.get().ok_or(AskError::Unconfigured)?;

        if !self.probe.is_connected() {
            return Err(AskError::NoConnection);
        }

        debug!("Question: {}", request.question);

        let reply = self
            .transport
            .post_json(&self.api_url, credential.as_str(), &request.payload(), read_timeout)
            .map_err(|e| match e {
                TransportError::Timeout => AskError::Timeout(read_timeout),
                other => AskError::Transport(other.to_string()),
            })?;

        if (500..600).contains(&reply.status) {
            return Err(AskError::ServerError(reply.status));
        }

        if !(200..300).contains(&reply.status) {
            return Err(AskError::Request { status: reply.status, body: reply.body });
        }

        let data: Value = serde_json::from_str(&reply.body).map_err(|e| AskError::InvalidBody(e.to_string()))?;
        Ok(interpret(data))
    }
}

fn interpret(mut data: Value) -> Answer {
    if let Value::Object(ref mut map) = data
        && let Some(answer) = map.remove("answer")
    {
        return match answer {
            Value::String(text) => Answer::Text(text),
            other => Answer::Raw(other),
        };
    }

    warn!("Response has no 'answer' field, returning it unchanged");
    Answer::Raw(data)
}
