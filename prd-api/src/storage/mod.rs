//! Schema-less document persistence.
//!
//! Records are stored as JSON documents grouped by collection. The store never
//! looks inside a document except to read the sort field, so any shape
//! round-trips verbatim.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

mod memory;
mod sqlite;

pub use memory::MemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

use crate::config::DatabaseConfig;

pub const MARKET_RESEARCH_COLLECTION: &str = "market_research";
pub const STATUS_CHECKS_COLLECTION: &str = "status_checks";

/// `database.url` value selecting the in-process store
pub const MEMORY_URL: &str = "memory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Top-level document field to order by
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Without a sort, documents come back in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: Option<SortSpec>,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn limit(limit: usize) -> Self {
        Self {
            sort: None,
            limit: Some(limit),
        }
    }

    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError>;

    async fn find(&self, collection: &str, options: FindOptions) -> Result<Vec<Value>, StoreError>;

    /// Release pooled connections. Called once at shutdown.
    async fn close(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub async fn insert_record<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> Result<(), StoreError> {
    let document = serde_json::to_value(record)?;
    store.insert(collection, document).await
}

pub async fn find_records<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    options: FindOptions,
) -> Result<Vec<T>, StoreError> {
    store
        .find(collection, options)
        .await?
        .into_iter()
        .map(|document| serde_json::from_value(document).map_err(StoreError::from))
        .collect()
}

/// Open the store named by `database.url`.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    if config.url == MEMORY_URL {
        tracing::warn!("Using in-memory document store; records are lost on shutdown");
        return Ok(Arc::new(MemoryDocumentStore::new()));
    }

    let store = SqliteDocumentStore::connect(&config.url, config.max_connections).await?;
    store.init().await?;
    Ok(Arc::new(store))
}

fn validate_sort_field(field: &str) -> Result<(), StoreError> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidSortField(field.to_string()))
    }
}
