use crate::llm_provider::*;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use textcraft_core::{Backend, LlmConfig};

lazy_static! {
    static ref INSTRUCTION_MARKERS: Regex = Regex::new(r"<s>|\[INST\]|\[/INST\]|</s>").unwrap();
    static ref BOILERPLATE_LEAD_INS: Regex =
        Regex::new(r"(?i)Here('s| is) the transformed text:?|Transformed text:?").unwrap();
}

const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// Configuration for the Hugging Face Inference API provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    pub api_key: String,
    /// Model repository id (e.g., "mistralai/Mistral-7B-Instruct-v0.2")
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
    pub params: GenerationParams,
}

impl HuggingFaceConfig {
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        Self {
            api_key: config.huggingface_api_key.clone().unwrap_or_default(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: config.huggingface_api_base.clone(),
            timeout_secs: config.timeout_secs,
            params: GenerationParams {
                max_new_tokens: config.max_new_tokens,
                temperature: config.temperature,
                top_p: config.top_p,
            },
        }
    }
}

/// Hugging Face Inference API backend. Instruction-tuned models echo the
/// prompt back, so completions are cleaned before they leave this module.
pub struct HuggingFaceProvider {
    config: HuggingFaceConfig,
    client: Client,
}

impl HuggingFaceProvider {
    pub fn new(config: HuggingFaceConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(anyhow!(
                "Hugging Face API key is required. Set HUGGINGFACE_API_KEY environment variable."
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    async fn request(&self, prompt: &str) -> Result<String> {
        let request = InferenceRequest {
            inputs: prompt.to_string(),
            parameters: InferenceParameters {
                max_new_tokens: self.config.params.max_new_tokens,
                temperature: self.config.params.temperature,
                top_p: self.config.params.top_p,
                do_sample: true,
            },
        };

        let url = format!(
            "{}/models/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Hugging Face API")?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(anyhow!("Hugging Face API error ({}): {}", status, error_text));
        }

        let body: InferenceResponse = response
            .json()
            .await
            .context("Failed to parse Hugging Face API response")?;

        let generated = match body {
            InferenceResponse::Many(outputs) => outputs
                .into_iter()
                .next()
                .map(|o| o.generated_text)
                .ok_or_else(|| anyhow!("Hugging Face response contained no outputs"))?,
            InferenceResponse::One(output) => output.generated_text,
        };

        Ok(generated)
    }
}

#[async_trait]
impl LlmProvider for HuggingFaceProvider {
    async fn generate(&self, prompt: &str) -> LlmResult<String> {
        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "submitting generation request");
        let wrapped = wrap_instruction(prompt);
        let generated = self.request(&wrapped).await?;
        Ok(cleanup_response(&generated, &wrapped))
    }

    fn backend(&self) -> Backend {
        Backend::Huggingface
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Wrap a prompt in Mistral instruction markers.
pub fn wrap_instruction(prompt: &str) -> String {
    format!("<s>[INST] {} [/INST]</s>", prompt)
}

/// Strip the echoed prompt, instruction markers and boilerplate lead-ins
/// from an instruction-model completion.
pub fn cleanup_response(response: &str, prompt: &str) -> String {
    let without_prompt = response.replacen(prompt, "", 1);
    let cleaned = INSTRUCTION_MARKERS.replace_all(&without_prompt, "");
    let cleaned = BOILERPLATE_LEAD_INS.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

// Inference API request/response types

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: usize,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<InferenceOutput>),
    One(InferenceOutput),
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
    generated_text: String,
}
