//! HTTP transport for the prompted LLM endpoint.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::prompt::AskPayload;

/// Fixed connection setup limit, independent of the caller's read timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const API_KEY_HEADER: &str = "X-API-Key";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Raw HTTP reply; interpretation is up to the client.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("timed out waiting for the server")]
    Timeout,

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

/// One blocking JSON POST.
pub trait Transport {
    fn post_json(&self, url: &str, api_key: &str, payload: &AskPayload<'_>, read_timeout: Duration) -> Result<HttpReply, TransportError>;
}

/// `reqwest` transport driven on a private current-thread runtime.
///
/// `read_timeout` bounds each read (it resets whenever bytes arrive), so a slow
/// but steady answer is not cut off. Connection setup has its own limit,
/// [`CONNECT_TIMEOUT`].
pub struct HttpTransport {
    runtime: Runtime,
}

impl HttpTransport {
    /// Create the transport.
    ///
    /// # Errors
    /// Returns an error if the async runtime cannot be started.
    pub fn new() -> Result<Self, TransportError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TransportError::Other(format!("failed to start HTTP runtime: {e}")))?;
        Ok(Self { runtime })
    }

    fn client(read_timeout: Duration) -> Result<Client, TransportError> {
        Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(read_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, api_key: &str, payload: &AskPayload<'_>, read_timeout: Duration) -> Result<HttpReply, TransportError> {
        debug!("POST {} (read timeout {}s)", url, read_timeout.as_secs());

        let client = Self::client(read_timeout)?;

        self.runtime.block_on(async {
            let response = client
                .post(url)
                .header(API_KEY_HEADER, api_key)
                .header(CONTENT_TYPE, "application/json")
                .json(payload)
                .send()
                .await
                .map_err(classify)?;

            let status = response.status().as_u16();
            // A body that cannot be read is reported as empty; the status decides the outcome.
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) if e.is_timeout() => return Err(TransportError::Timeout),
                Err(e) => {
                    debug!("Failed to read response body: {}", e);
                    String::new()
                }
            };

            Ok(HttpReply { status, body })
        })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    // Connect timeouts count as connection failures, only read-phase timeouts are `Timeout`.
    if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Other(err.to_string())
    }
}
