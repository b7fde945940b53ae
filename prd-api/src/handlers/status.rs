use crate::error::{log_error, ApiError};
use crate::models::StatusCheckCreate;
use crate::research::{self, ServiceSettings};
use crate::storage::DocumentStore;
use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;

#[post("/status")]
pub async fn create_status_check(
    req: web::Json<StatusCheckCreate>,
    store: web::Data<Arc<dyn DocumentStore>>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse, ApiError> {
    let check = research::create_status_check(
        store.get_ref().as_ref(),
        settings.get_ref(),
        req.into_inner().client_name,
    )
    .await
    .inspect_err(|e| log_error(e, "create_status_check"))?;

    Ok(HttpResponse::Ok().json(check))
}

#[get("/status")]
pub async fn list_status_checks(
    store: web::Data<Arc<dyn DocumentStore>>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse, ApiError> {
    let checks = research::list_status_checks(store.get_ref().as_ref(), settings.get_ref())
        .await
        .inspect_err(|e| log_error(e, "list_status_checks"))?;

    Ok(HttpResponse::Ok().json(checks))
}
