use super::{validate_sort_field, DocumentStore, FindOptions, SortDirection, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Process-local store used by tests and by `database.url = "memory"`.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Vec<Value>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|collections| collections.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Lock error: {}", e)))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find(&self, collection: &str, options: FindOptions) -> Result<Vec<Value>, StoreError> {
        let mut documents = {
            let collections = self
                .collections
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("Lock error: {}", e)))?;
            collections.get(collection).cloned().unwrap_or_default()
        };

        if let Some(sort) = &options.sort {
            validate_sort_field(&sort.field)?;
            match sort.direction {
                SortDirection::Ascending => {
                    documents.sort_by(|a, b| compare_field(a, b, &sort.field));
                }
                SortDirection::Descending => {
                    // Newest insertion first among equal keys
                    documents.reverse();
                    documents.sort_by(|a, b| compare_field(b, a, &sort.field));
                }
            }
        }

        if let Some(limit) = options.limit {
            documents.truncate(limit);
        }

        Ok(documents)
    }

    async fn close(&self) {}
}

fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        // Missing values sort first, as in SQLite where NULL is smallest
        (None, Some(_)) | (Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), None) | (Some(_), Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SortSpec;
    use serde_json::json;

    #[tokio::test]
    async fn test_unsorted_find_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        for name in ["a", "b", "c"] {
            store.insert("status_checks", json!({ "client_name": name })).await.unwrap();
        }

        let docs = store.find("status_checks", FindOptions::default()).await.unwrap();
        let names: Vec<_> = docs.iter().map(|d| d["client_name"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[tokio::test]
    async fn test_descending_sort_and_limit() {
        let store = MemoryDocumentStore::new();
        for ts in ["2024-01-02", "2024-01-05", "2024-01-01", "2024-01-04", "2024-01-03"] {
            store.insert("market_research", json!({ "timestamp": ts })).await.unwrap();
        }

        let docs = store
            .find(
                "market_research",
                FindOptions::limit(3).sorted(SortSpec::descending("timestamp")),
            )
            .await
            .unwrap();

        let stamps: Vec<_> = docs.iter().map(|d| d["timestamp"].as_str().unwrap()).collect();
        assert_eq!(stamps, vec!["2024-01-05", "2024-01-04", "2024-01-03"]);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store.insert("a", json!({ "x": 1 })).await.unwrap();

        assert_eq!(store.count("a"), 1);
        assert!(store.find("b", FindOptions::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_unsafe_sort_field() {
        let store = MemoryDocumentStore::new();
        let result = store
            .find("a", FindOptions::default().sorted(SortSpec::ascending("x'); DROP")))
            .await;
        assert!(matches!(result, Err(StoreError::InvalidSortField(_))));
    }
}
