//! Model constants for supported LLM providers
//!
//! Model IDs are sourced from official provider documentation.

/// OpenAI model constants
pub mod openai {
    /// GPT-4o - flagship multimodal chat model
    pub const GPT_4O_ID: &str = "gpt-4o";
    pub const GPT_4O_NAME: &str = "GPT-4o";

    /// GPT-4o mini - cheaper, faster variant
    pub const GPT_4O_MINI_ID: &str = "gpt-4o-mini";
    pub const GPT_4O_MINI_NAME: &str = "GPT-4o mini";

    pub const GPT_4O: &str = GPT_4O_ID;
    pub const GPT_4O_MINI: &str = GPT_4O_MINI_ID;
}
