//! Groq completion client (OpenAI-compatible chat completions over HTTPS)

use super::credential::CredentialSource;
use super::protocol::{ChatCompletionRequest, error_detail, parse_completion_response};
use askline_application::{CompletionError, CompletionGateway};
use askline_domain::CompletionSettings;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// [`CompletionGateway`] implementation backed by `reqwest`
pub struct GroqCompletionClient {
    http: reqwest::Client,
    settings: CompletionSettings,
    credentials: CredentialSource,
}

impl GroqCompletionClient {
    /// Build a client for the given endpoint settings.
    ///
    /// The credential is not checked here; a missing key surfaces on the
    /// first request as [`CompletionError::Configuration`].
    pub fn new(
        settings: CompletionSettings,
        credentials: CredentialSource,
    ) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(settings.timeout))
            .build()
            .map_err(|e| CompletionError::Configuration(format!("HTTP client: {e}")))?;

        info!(
            "GroqCompletionClient initialized (model: {}, endpoint: {})",
            settings.model,
            settings.endpoint()
        );

        Ok(Self {
            http,
            settings,
            credentials,
        })
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    fn transport_error(&self, error: reqwest::Error) -> CompletionError {
        if error.is_timeout() {
            CompletionError::Timeout(self.settings.timeout)
        } else {
            CompletionError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl CompletionGateway for GroqCompletionClient {
    async fn ask(&self, message: &str) -> Result<String, CompletionError> {
        let key = self.credentials.resolve()?;
        let body = ChatCompletionRequest::single_user_message(
            &self.settings.model,
            message,
            self.settings.max_tokens,
        );

        let response = self
            .http
            .post(self.settings.endpoint())
            .bearer_auth(key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        debug!("Completion response: HTTP {} ({} bytes)", status.as_u16(), text.len());

        if !status.is_success() {
            return Err(CompletionError::Network(format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                error_detail(&text)
            )));
        }

        parse_completion_response(&text)
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}
