use crate::models::ErrorResponse;
use crate::storage::StoreError;
use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use prd_llm_sdk::error::LlmError;
use thiserror::Error;

/// Every failure a request can end in.
///
/// `Upstream` and `Storage` carry the underlying error as their source so it can be
/// logged in full, while `detail` is what the caller sees.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or incomplete request body
    #[error("{0}")]
    Validation(String),

    /// No usable provider credential
    #[error("{0}")]
    Configuration(String),

    /// The generative text provider rejected the call or was unreachable
    #[error("{detail}")]
    Upstream {
        detail: String,
        #[source]
        source: LlmError,
    },

    /// Persistence or retrieval failed
    #[error("{detail}")]
    Storage {
        detail: String,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn upstream(context: &str, source: LlmError, expose_details: bool) -> Self {
        Self::Upstream {
            detail: render_detail(context, &source, expose_details),
            source,
        }
    }

    pub fn storage(context: &str, source: StoreError, expose_details: bool) -> Self {
        Self::Storage {
            detail: render_detail(context, &source, expose_details),
            source,
        }
    }

    pub fn missing_credential() -> Self {
        Self::Configuration("OpenAI API key is required".to_string())
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::Configuration(_) => "configuration_error",
            ApiError::Upstream { .. } => "upstream_error",
            ApiError::Storage { .. } => "storage_error",
        }
    }
}

fn render_detail(context: &str, source: &dyn std::fmt::Display, expose_details: bool) -> String {
    if expose_details {
        format!("{}: {}", context, source)
    } else {
        context.to_string()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Configuration(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } | ApiError::Storage { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}

/// Routes JSON extractor failures (missing fields, wrong types, bad syntax)
/// into the validation kind so they render as 422.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, path = %req.path(), "Rejected request body");
    let detail = match &err {
        JsonPayloadError::Deserialize(e) => e.to_string(),
        other => other.to_string(),
    };
    ApiError::Validation(detail).into()
}

/// Log an error with its kind and full cause chain
pub fn log_error(err: &ApiError, operation: &str) {
    match err {
        ApiError::Upstream { source, .. } => {
            tracing::error!(error = %source, kind = err.error_type(), operation, "Provider call failed")
        }
        ApiError::Storage { source, .. } => {
            tracing::error!(error = %source, kind = err.error_type(), operation, "Document store failed")
        }
        ApiError::Validation(msg) | ApiError::Configuration(msg) => {
            tracing::warn!(error = %msg, kind = err.error_type(), operation, "Request rejected")
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
