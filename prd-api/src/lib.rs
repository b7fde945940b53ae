pub mod config;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod prompts;
pub mod research;
pub mod storage;

pub use error::{ApiError, ApiResult};
