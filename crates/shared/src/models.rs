use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pages::{DispatchOutcome, ShellView};
use crate::session::Page;

#[derive(Debug, Clone, Deserialize)]
pub struct SetCredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub shell: ShellView,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub outcome: DispatchOutcome,
    pub shell: ShellView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
