use crate::error::{log_error, ApiError};
use crate::helpers::llm::ProviderFactory;
use crate::models::MarketResearchRequest;
use crate::research::{self, ServiceSettings};
use crate::storage::DocumentStore;
use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

#[post("/market-research")]
pub async fn submit_market_research(
    req: web::Json<MarketResearchRequest>,
    store: web::Data<Arc<dyn DocumentStore>>,
    providers: web::Data<Arc<dyn ProviderFactory>>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse, ApiError> {
    info!(
        title = %req.product_idea.title,
        feature_count = req.product_idea.core_features.len(),
        "Market research requested"
    );

    let record = research::submit_market_research(
        store.get_ref().as_ref(),
        providers.get_ref().as_ref(),
        settings.get_ref(),
        req.into_inner(),
    )
    .await
    .inspect_err(|e| log_error(e, "submit_market_research"))?;

    Ok(HttpResponse::Ok().json(record))
}

#[get("/market-research")]
pub async fn list_market_research(
    store: web::Data<Arc<dyn DocumentStore>>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse, ApiError> {
    let history = research::market_research_history(store.get_ref().as_ref(), settings.get_ref())
        .await
        .inspect_err(|e| log_error(e, "list_market_research"))?;

    info!(count = history.len(), "Retrieved market research history");
    Ok(HttpResponse::Ok().json(history))
}
