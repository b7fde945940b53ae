//! # PRD LLM SDK
//!
//! Minimal generative-text client used by the PRD Expert service. It ships an
//! OpenAI Chat Completions client and a provider-agnostic [`client::LlmClient`]
//! trait so callers can swap the provider (or a test double) at runtime.
//!
//! ## Example
//!
//! ```rust,no_run
//! use prd_llm_sdk::client::LlmClient;
//! use prd_llm_sdk::openai::OpenAIClient;
//! use prd_llm_sdk::types::{CompletionRequest, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAIClient::new("your-api-key")?.with_model("gpt-4o");
//!     let response = client
//!         .complete(CompletionRequest {
//!             messages: vec![
//!                 Message::system("You are a product strategist."),
//!                 Message::user("Who competes with Slack?"),
//!             ],
//!             max_tokens: 1024,
//!             model: String::new(),
//!             temperature: Some(0.7),
//!             top_p: None,
//!             stop_sequences: None,
//!         })
//!         .await?;
//!
//!     println!("Response: {}", response.text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod openai;
pub mod providers;
pub mod types;
