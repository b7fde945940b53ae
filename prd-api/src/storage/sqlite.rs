use super::{validate_sort_field, DocumentStore, FindOptions, SortDirection, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// SQLite-backed document store. Documents live in a single table keyed by
/// collection, with the JSON body stored as text.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let in_memory = is_memory_url(database_url);

        // For file databases the directory must exist before SQLite can create the file
        if !in_memory {
            if let Some(parent) = file_path(database_url).and_then(|p| p.parent()) {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to ":memory:" is a fresh database, so pin a single one
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!(url = %database_url, "Connected to document store");
        Ok(Self { pool })
    }

    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                body TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        let body = serde_json::to_string(&document)?;
        sqlx::query("INSERT INTO documents (collection, body) VALUES (?1, ?2)")
            .bind(collection)
            .bind(body)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, collection: &str, options: FindOptions) -> Result<Vec<Value>, StoreError> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = options
            .limit
            .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
            .unwrap_or(-1);

        let rows: Vec<String> = match &options.sort {
            Some(sort) => {
                validate_sort_field(&sort.field)?;
                let direction = match sort.direction {
                    SortDirection::Ascending => "ASC",
                    SortDirection::Descending => "DESC",
                };
                let sql = format!(
                    "SELECT body FROM documents WHERE collection = ?1 \
                     ORDER BY json_extract(body, ?2) {direction}, seq {direction} LIMIT ?3"
                );
                sqlx::query_scalar(&sql)
                    .bind(collection)
                    .bind(format!("$.{}", sort.field))
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT body FROM documents WHERE collection = ?1 ORDER BY seq ASC LIMIT ?2",
                )
                .bind(collection)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter()
            .map(|body| serde_json::from_str(body).map_err(StoreError::from))
            .collect()
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Document store closed");
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn file_path(url: &str) -> Option<&Path> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next()?;
    if path.is_empty() {
        None
    } else {
        Some(Path::new(path))
    }
}
