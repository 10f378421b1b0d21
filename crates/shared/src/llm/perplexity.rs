use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::gateway::{
    ApiResponse, Citation, CompletionGateway, CompletionRequest, GatewayError, GatewayFuture,
};
use crate::catalog::{PERPLEXITY_API_URL, PERPLEXITY_MODEL};
use crate::session::Credential;

const MAX_ERROR_MESSAGE_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct PerplexityGatewayConfig {
    pub chat_completions_url: String,
    pub model: String,
    /// `None` keeps the transport default.
    pub timeout_ms: Option<u64>,
}

impl Default for PerplexityGatewayConfig {
    fn default() -> Self {
        Self {
            chat_completions_url: PERPLEXITY_API_URL.to_string(),
            model: PERPLEXITY_MODEL.to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum PerplexityConfigError {
    #[error("failed to build Perplexity http client: {0}")]
    HttpClient(String),
}

#[derive(Clone)]
pub struct PerplexityGateway {
    client: reqwest::Client,
    config: PerplexityGatewayConfig,
}

impl PerplexityGateway {
    pub fn new(config: PerplexityGatewayConfig) -> Result<Self, PerplexityConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|err| PerplexityConfigError::HttpClient(err.to_string()))?;

        Ok(Self { client, config })
    }

    async fn send(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<ApiResponse, GatewayError> {
        let started_at = Instant::now();
        let response = self
            .client
            .post(&self.config.chat_completions_url)
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        let header_request_id = header_request_id(response.headers());
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::Transport(format!("failed to read response body: {err}")))?;
        let latency_ms = started_at.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                latency_ms,
                provider_request_id = header_request_id.as_deref().unwrap_or("none"),
                "completions endpoint rejected request"
            );
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                message: parse_provider_error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
            });
        }

        let parsed: PerplexitySuccessResponse = serde_json::from_str(&body)
            .map_err(|err| GatewayError::InvalidPayload(format!("response_json_parse_failed: {err}")))?;

        debug!(
            status = status.as_u16(),
            latency_ms,
            has_choices = parsed.choices.as_ref().is_some_and(|choices| !choices.is_empty()),
            "completions endpoint answered"
        );

        Ok(ApiResponse {
            status: status.as_u16(),
            model: parsed.model,
            provider_request_id: header_request_id.or(parsed.id),
            content: parsed
                .choices
                .and_then(|choices| choices.into_iter().next())
                .and_then(|choice| choice.message)
                .and_then(|message| message.content),
            citations: parse_citations(parsed.citations.unwrap_or_default()),
        })
    }
}

impl CompletionGateway for PerplexityGateway {
    fn model(&self) -> &str {
        &self.config.model
    }

    fn complete<'a>(
        &'a self,
        credential: &'a Credential,
        request: &'a CompletionRequest,
    ) -> GatewayFuture<'a> {
        Box::pin(self.send(credential, request))
    }
}

#[derive(Debug, Deserialize)]
struct PerplexitySuccessResponse {
    id: Option<String>,
    model: Option<String>,
    choices: Option<Vec<PerplexityChoice>>,
    citations: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct PerplexityChoice {
    message: Option<PerplexityMessage>,
}

#[derive(Debug, Deserialize)]
struct PerplexityMessage {
    content: Option<String>,
}

/// The provider has shipped citations both as bare URLs and as objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PerplexityCitation {
    Url(String),
    Detailed {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<PerplexityCitation> for Citation {
    fn from(value: PerplexityCitation) -> Self {
        match value {
            PerplexityCitation::Url(url) => Citation {
                title: None,
                url: Some(url),
            },
            PerplexityCitation::Detailed { title, url } => Citation { title, url },
        }
    }
}

/// Entries in neither known shape are skipped so the answer survives.
fn parse_citations(raw: Vec<Value>) -> Vec<Citation> {
    let total = raw.len();
    let citations = raw
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<PerplexityCitation>(entry).ok())
        .map(Citation::from)
        .collect::<Vec<_>>();
    if citations.len() < total {
        warn!(
            skipped = total - citations.len(),
            "ignoring malformed citation entries"
        );
    }
    citations
}

fn header_request_id(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

fn parse_provider_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ProviderErrorEnvelope {
        error: Option<ProviderErrorDetails>,
        detail: Option<Value>,
    }

    #[derive(Deserialize)]
    struct ProviderErrorDetails {
        message: Option<String>,
        code: Option<Value>,
    }

    let envelope = serde_json::from_str::<ProviderErrorEnvelope>(body).ok()?;
    let message = match (envelope.error, envelope.detail) {
        (Some(details), _) => match (details.message, details.code) {
            (Some(message), _) => message,
            (None, Some(Value::String(code))) => code,
            (None, Some(Value::Number(code))) => code.to_string(),
            _ => return None,
        },
        (None, Some(Value::String(detail))) => detail,
        _ => return None,
    };

    Some(message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect())
}
