use crate::error::Result;
use async_trait::async_trait;
use repo_brain_protocol::{ExplanationResponse, ReasoningContext};

#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    /// Explain `context.query` using the ranked evidence
    async fn explain(&self, context: &ReasoningContext) -> Result<ExplanationResponse>;

    /// Answer a free-form question about the codebase
    async fn ask(&self, question: &str, context: &ReasoningContext) -> Result<String>;
}
