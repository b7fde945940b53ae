//! Market research and status check operations, independent of HTTP.

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::helpers::llm::{resolve_api_key, ProviderFactory};
use crate::models::{MarketResearchRequest, MarketResearchResponse, ProductIdea, StatusCheck};
use crate::prompts::{market_research_user_prompt, MARKET_RESEARCH_SYSTEM_PROMPT};
use crate::storage::{
    find_records, insert_record, DocumentStore, FindOptions, SortSpec,
    MARKET_RESEARCH_COLLECTION, STATUS_CHECKS_COLLECTION,
};
use prd_llm_sdk::types::{CompletionRequest, Message};
use tracing::info;

pub const HISTORY_LIMIT: usize = 50;
pub const STATUS_CHECK_LIMIT: usize = 1000;

const SUBMIT_CONTEXT: &str = "Error performing market research";
const HISTORY_CONTEXT: &str = "Error retrieving history";
const STATUS_CREATE_CONTEXT: &str = "Error creating status check";
const STATUS_LIST_CONTEXT: &str = "Error retrieving status checks";

/// Per-process settings shared by every request
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub default_api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub expose_error_details: bool,
}

impl ServiceSettings {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            default_api_key: config.openai.api_key.clone(),
            model: config.openai.model.clone(),
            temperature: config.openai.temperature,
            max_tokens: config.openai.max_tokens,
            expose_error_details: config.server.expose_error_details,
        }
    }
}

pub fn build_completion_request(idea: &ProductIdea, settings: &ServiceSettings) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            Message::system(MARKET_RESEARCH_SYSTEM_PROMPT),
            Message::user(market_research_user_prompt(idea)),
        ],
        max_tokens: settings.max_tokens,
        model: settings.model.clone(),
        temperature: Some(settings.temperature),
        top_p: None,
        stop_sequences: None,
    }
}

/// Validate, resolve the credential, call the provider once, persist, return.
///
/// Nothing is stored unless the provider call succeeds.
pub async fn submit_market_research(
    store: &dyn DocumentStore,
    providers: &dyn ProviderFactory,
    settings: &ServiceSettings,
    request: MarketResearchRequest,
) -> ApiResult<MarketResearchResponse> {
    request.product_idea.validate()?;

    let api_key = resolve_api_key(
        request.openai_api_key.as_deref(),
        settings.default_api_key.as_deref(),
    )?;

    let client = providers
        .client_for(&api_key)
        .map_err(|e| ApiError::upstream(SUBMIT_CONTEXT, e, settings.expose_error_details))?;

    info!(
        title = %request.product_idea.title,
        provider = client.provider_name(),
        model = %settings.model,
        "Requesting market research"
    );

    let completion = client
        .complete(build_completion_request(&request.product_idea, settings))
        .await
        .map_err(|e| ApiError::upstream(SUBMIT_CONTEXT, e, settings.expose_error_details))?;

    let record = MarketResearchResponse::new(request.product_idea, completion.text());

    insert_record(store, MARKET_RESEARCH_COLLECTION, &record)
        .await
        .map_err(|e| ApiError::storage(SUBMIT_CONTEXT, e, settings.expose_error_details))?;

    info!(
        record_id = %record.id,
        output_tokens = completion.usage.output_tokens,
        "Market research stored"
    );

    Ok(record)
}

/// Newest first, at most [`HISTORY_LIMIT`] records
pub async fn market_research_history(
    store: &dyn DocumentStore,
    settings: &ServiceSettings,
) -> ApiResult<Vec<MarketResearchResponse>> {
    find_records(
        store,
        MARKET_RESEARCH_COLLECTION,
        FindOptions::limit(HISTORY_LIMIT).sorted(SortSpec::descending("timestamp")),
    )
    .await
    .map_err(|e| ApiError::storage(HISTORY_CONTEXT, e, settings.expose_error_details))
}

pub async fn create_status_check(
    store: &dyn DocumentStore,
    settings: &ServiceSettings,
    client_name: String,
) -> ApiResult<StatusCheck> {
    let record = StatusCheck::new(client_name);
    insert_record(store, STATUS_CHECKS_COLLECTION, &record)
        .await
        .map_err(|e| ApiError::storage(STATUS_CREATE_CONTEXT, e, settings.expose_error_details))?;
    Ok(record)
}

/// Store-native order, at most [`STATUS_CHECK_LIMIT`] records
pub async fn list_status_checks(
    store: &dyn DocumentStore,
    settings: &ServiceSettings,
) -> ApiResult<Vec<StatusCheck>> {
    find_records(
        store,
        STATUS_CHECKS_COLLECTION,
        FindOptions::limit(STATUS_CHECK_LIMIT),
    )
    .await
    .map_err(|e| ApiError::storage(STATUS_LIST_CONTEXT, e, settings.expose_error_details))
}
