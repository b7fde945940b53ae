//! Provider name constants
//!
//! Canonical provider names used throughout the SDK

/// OpenAI provider
pub const OPENAI: &str = "openai";
