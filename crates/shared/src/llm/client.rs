use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::gateway::{
    ApiResponse, ChatMessage, ChatRole, CompletionGateway, CompletionRequest, GatewayError,
};
use super::prompts::SYSTEM_PROMPT;
use crate::session::{Credential, QueryCounter};

pub const TEMPERATURE: f32 = 0.2;
pub const MAX_TOKENS: u32 = 1500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("missing credential")]
    MissingCredential,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Dispatches built prompts to the completions gateway on behalf of a session.
#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<dyn CompletionGateway>,
}

impl ApiClient {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    pub fn build_request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.gateway.model().to_string(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    /// Sends one request. A missing or blank credential fails before any
    /// network activity and is not counted; every other call counts once.
    pub async fn dispatch(
        &self,
        credential: Option<&Credential>,
        prompt: &str,
        queries: &QueryCounter,
    ) -> Result<ApiResponse, ApiError> {
        let credential = credential
            .filter(|credential| credential.is_present())
            .ok_or(ApiError::MissingCredential)?;

        let request = self.build_request(prompt);
        let attempt = queries.record_attempt();
        debug!(
            model = %request.model,
            prompt_chars = prompt.chars().count(),
            attempt,
            "dispatching completions request"
        );

        self.gateway
            .complete(credential, &request)
            .await
            .map_err(|err| {
                warn!(error = %err, attempt, "completions request failed");
                ApiError::Gateway(err)
            })
    }
}
