use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use textcraft_core::Backend;

/// Result type for provider internals. The API layer collapses any failure
/// into the generic generation error; providers keep full detail for logs.
pub type LlmResult<T> = anyhow::Result<T>;

/// Sampling parameters passed to generation backends that accept them.
/// Gemini ignores these (the service relies on model defaults there).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_new_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 250,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// A text-generation backend.
///
/// One prompt in, one completion out: a single external call with no
/// internal retry, backoff, caching or coalescing. Concurrent calls are
/// fully independent.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Submit the prompt and return the completion text.
    async fn generate(&self, prompt: &str) -> LlmResult<String>;

    /// Which backend this provider records on transformations.
    fn backend(&self) -> Backend;

    fn model_name(&self) -> &str;
}
