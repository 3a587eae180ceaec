use crate::gemini_provider::{GeminiConfig, GeminiProvider};
use crate::huggingface_provider::{HuggingFaceConfig, HuggingFaceProvider};
use crate::llm_provider::LlmProvider;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use textcraft_core::LlmConfig;

/// Factory for creating generation providers based on configuration
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider from configuration
    pub fn create_from_config(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
        let provider_name = config.provider.to_lowercase();

        match provider_name.as_str() {
            "gemini" => {
                let provider = GeminiProvider::new(GeminiConfig::from_llm_config(config))?;
                Ok(Arc::new(provider))
            }
            "huggingface" => {
                let provider =
                    HuggingFaceProvider::new(HuggingFaceConfig::from_llm_config(config))?;
                Ok(Arc::new(provider))
            }
            _ => Err(anyhow!(
                "Unsupported LLM provider: {}. Available providers: gemini, huggingface",
                provider_name
            )),
        }
    }
}
