pub mod client;
pub mod gateway;
pub mod perplexity;
pub mod prompts;
pub mod validation;

pub use client::{ApiClient, ApiError, MAX_TOKENS, TEMPERATURE};
pub use gateway::{
    ApiResponse, ChatMessage, ChatRole, Citation, CompletionGateway, CompletionRequest,
    GatewayError, GatewayFuture,
};
pub use perplexity::{PerplexityConfigError, PerplexityGateway, PerplexityGatewayConfig};
pub use prompts::{
    AgeGroup, CITATION_DISCLAIMER, Feature, QueryFields, QueryRequest, SYSTEM_PROMPT, Severity,
    SymptomDuration, build_prompt,
};
pub use validation::{InteractionForm, SymptomForm, TranslatorForm, ValidationError};
