use crate::config::OpenAIConfig;
use crate::error::ApiError;
use prd_llm_sdk::client::LlmClient;
use prd_llm_sdk::error::LlmError;
use prd_llm_sdk::openai::OpenAIClient;
use std::sync::Arc;
use std::time::Duration;

/// Builds a provider client bound to one credential.
///
/// The credential can differ per request, so handlers hold a factory rather
/// than a ready client.
pub trait ProviderFactory: Send + Sync {
    fn client_for(&self, api_key: &str) -> Result<Arc<dyn LlmClient>, LlmError>;
}

pub struct OpenAIProviderFactory {
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAIProviderFactory {
    pub fn from_config(config: &OpenAIConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl ProviderFactory for OpenAIProviderFactory {
    fn client_for(&self, api_key: &str) -> Result<Arc<dyn LlmClient>, LlmError> {
        let client = OpenAIClient::new(api_key)?
            .with_base_url(self.base_url.clone())
            .with_model(self.model.clone())
            .with_timeout(self.timeout)?;
        Ok(Arc::new(client))
    }
}

/// Request credential first, then the process default. Blank values count as absent.
pub fn resolve_api_key(
    request_key: Option<&str>,
    default_key: Option<&str>,
) -> Result<String, ApiError> {
    fn usable(key: Option<&str>) -> Option<&str> {
        key.map(str::trim).filter(|key| !key.is_empty())
    }

    usable(request_key)
        .or_else(|| usable(default_key))
        .map(str::to_string)
        .ok_or_else(ApiError::missing_credential)
}
