use std::sync::Arc;
use textcraft_ai::{LlmProvider, ProviderFactory};
use textcraft_core::{Result, TextCraftConfig, TextCraftError, TransformationStore};
use textcraft_store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransformationStore>,
    pub llm: Arc<dyn LlmProvider>,
    pub config: Arc<TextCraftConfig>,
}

impl AppState {
    pub fn new(config: Arc<TextCraftConfig>) -> Result<Self> {
        let llm = ProviderFactory::create_from_config(&config.llm)
            .map_err(|e| TextCraftError::Config(e.to_string()))?;

        Ok(Self {
            store: Arc::new(MemoryStore::new()),
            llm,
            config,
        })
    }

    /// Assemble a state from explicit parts. Integration tests use this to
    /// swap in a stub provider.
    pub fn with_parts(
        store: Arc<dyn TransformationStore>,
        llm: Arc<dyn LlmProvider>,
        config: Arc<TextCraftConfig>,
    ) -> Self {
        Self { store, llm, config }
    }
}
