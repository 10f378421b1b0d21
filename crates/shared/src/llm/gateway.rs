use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::Credential;

pub type GatewayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ApiResponse, GatewayError>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Chat-style request body, serialized as-is onto the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub model: Option<String>,
    pub provider_request_id: Option<String>,
    /// `None` when the provider answered without any `choices`.
    pub content: Option<String>,
    pub citations: Vec<Citation>,
}

impl ApiResponse {
    pub fn has_content(&self) -> bool {
        self.content
            .as_deref()
            .is_some_and(|content| !content.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("completions request timed out")]
    Timeout,
    #[error("completions request failed: {0}")]
    Transport(String),
    #[error("completions endpoint returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("completions endpoint returned an invalid payload: {0}")]
    InvalidPayload(String),
}

pub trait CompletionGateway: Send + Sync {
    fn model(&self) -> &str;

    fn complete<'a>(
        &'a self,
        credential: &'a Credential,
        request: &'a CompletionRequest,
    ) -> GatewayFuture<'a>;
}
