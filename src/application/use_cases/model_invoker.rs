use crate::domain::app_config::ModelSettings;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, ModelTier};
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;

const JSON_MIME_TYPE: &str = "application/json";

/// Selects a model tier and forwards a rendered prompt to the LLM client.
pub struct ModelInvoker {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    settings: ModelSettings,
}

impl ModelInvoker {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, settings: ModelSettings) -> Self {
        Self {
            llm_client,
            settings,
        }
    }

    pub fn config_for(&self, tier: ModelTier) -> Result<LLMConfig> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AppError::ConfigurationError("GEMINI_API_KEY is not configured.".to_string())
            })?;

        let tier_settings = self.settings.tier(tier);
        Ok(LLMConfig {
            base_url: self.settings.base_url.clone(),
            model: tier_settings.model.clone(),
            api_key: api_key.to_string(),
            temperature: tier_settings.temperature,
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
        })
    }

    pub async fn invoke(&self, prompt: &str, deep_analysis: bool) -> Result<String> {
        let tier = ModelTier::for_request(deep_analysis);
        let config = self.config_for(tier)?;
        tracing::info!("Invoking {} model {}", tier, config.model);

        self.llm_client.generate(&config, prompt).await
    }
}
