#![allow(dead_code)]

use actix_web::{test, web, App};
use prd_api::handlers;
use prd_api::helpers::llm::ProviderFactory;
use prd_api::research::ServiceSettings;
use prd_api::storage::{DocumentStore, FindOptions, MemoryDocumentStore, StoreError};
use prd_llm_sdk::client::LlmClient;
use prd_llm_sdk::error::LlmError;
use prd_llm_sdk::types::{CompletionRequest, CompletionResponse, ContentBlock, Role, Usage};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const SAMPLE_MARKDOWN: &str = "🧾 **User's Idea (Input):**\nAsync feedback\n\n📊 **Competitive Landscape Table:**\n| Product | Core Features |\n|---|---|\n| Culture Amp | surveys |\n";

pub struct TestApp<S, D = MemoryDocumentStore> {
    pub store: Arc<D>,
    pub mock_llm_client: Arc<MockLlmClient>,
    pub providers: Arc<MockProviderFactory>,
    pub app: S,
}

pub enum MockBehavior {
    Reply(String),
    Fail(fn() -> LlmError),
}

pub struct MockLlmClient {
    pub behavior: Mutex<MockBehavior>,
    pub call_count: Arc<Mutex<usize>>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        MockLlmClient {
            behavior: Mutex::new(MockBehavior::Reply(SAMPLE_MARKDOWN.to_string())),
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        *self.call_count.lock().unwrap() += 1;
        self.requests.lock().unwrap().push(request);

        match &*self.behavior.lock().unwrap() {
            MockBehavior::Reply(text) => Ok(CompletionResponse {
                content: vec![ContentBlock::Text { text: text.clone() }],
                role: Role::Assistant,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
                stop_reason: Some("stop".to_string()),
            }),
            MockBehavior::Fail(make_error) => Err(make_error()),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Memory store whose inserts or reads can be made to fail
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryDocumentStore,
    pub insert_error: Option<&'static str>,
    pub find_error: Option<&'static str>,
}

#[async_trait::async_trait]
impl DocumentStore for FailingStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        match self.insert_error {
            Some(reason) => Err(StoreError::Unavailable(reason.to_string())),
            None => self.inner.insert(collection, document).await,
        }
    }

    async fn find(&self, collection: &str, options: FindOptions) -> Result<Vec<Value>, StoreError> {
        match self.find_error {
            Some(reason) => Err(StoreError::Unavailable(reason.to_string())),
            None => self.inner.find(collection, options).await,
        }
    }

    async fn close(&self) {}
}

/// Hands out the shared mock client and records which key each request resolved to
pub struct MockProviderFactory {
    pub client: Arc<MockLlmClient>,
    pub keys: Mutex<Vec<String>>,
}

impl ProviderFactory for MockProviderFactory {
    fn client_for(&self, api_key: &str) -> Result<Arc<dyn LlmClient>, LlmError> {
        self.keys.lock().unwrap().push(api_key.to_string());
        Ok(self.client.clone() as Arc<dyn LlmClient>)
    }
}

impl MockProviderFactory {
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

pub fn test_settings(default_api_key: Option<&str>) -> ServiceSettings {
    ServiceSettings {
        default_api_key: default_api_key.map(str::to_string),
        model: "gpt-4o".to_string(),
        temperature: 0.7,
        max_tokens: 2048,
        expose_error_details: true,
    }
}

pub async fn setup_test_app() -> TestApp<
    impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
> {
    setup_test_app_with(test_settings(None)).await
}

pub async fn setup_test_app_with(
    settings: ServiceSettings,
) -> TestApp<
    impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
> {
    setup_test_app_with_store(Arc::new(MemoryDocumentStore::new()), settings).await
}

pub async fn setup_test_app_with_store<D: DocumentStore + 'static>(
    store: Arc<D>,
    settings: ServiceSettings,
) -> TestApp<
    impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    D,
> {
    let mock_llm_client = Arc::new(MockLlmClient::new());
    let providers = Arc::new(MockProviderFactory {
        client: mock_llm_client.clone(),
        keys: Mutex::new(Vec::new()),
    });

    let store_handle = store.clone() as Arc<dyn DocumentStore>;
    let provider_handle = providers.clone() as Arc<dyn ProviderFactory>;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(store_handle))
            .app_data(web::Data::new(provider_handle))
            .app_data(web::Data::new(settings))
            .configure(handlers::configure),
    )
    .await;

    TestApp {
        store,
        mock_llm_client,
        providers,
        app,
    }
}

pub fn sample_request_body() -> serde_json::Value {
    serde_json::json!({
        "product_idea": {
            "title": "Async feedback platform for remote teams",
            "target_user": "PeopleOps teams in startups",
            "core_features": ["anonymous feedback", "pulse surveys", "Slack integration"]
        }
    })
}
