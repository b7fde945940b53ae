use crate::models::{HealthResponse, RootResponse, VersionResponse};
use actix_web::{HttpResponse, Result};
use chrono::Utc;

pub const SERVICE_NAME: &str = "prd-api";

/// Liveness probe; always 200
pub async fn root() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(RootResponse {
        message: "PRD Expert Agent API".to_string(),
    }))
}

pub async fn health_check() -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    Ok(HttpResponse::Ok().json(response))
}

pub async fn version_info() -> Result<HttpResponse> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: SERVICE_NAME.to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}
