// src/api/database.rs
//! Resilient child-database row client.
//!
//! Database queries are the most failure-prone call the engine makes,
//! so this is the one call site wrapped in the retry policy. Each
//! attempt restarts pagination from the beginning — no cursor carries
//! across attempts, trading redundant work for correctness.

use super::pagination::fetch_all_pages;
use super::NotionSource;
use crate::error::AppError;
use crate::model::DatabaseRow;
use crate::retry::RetryPolicy;
use crate::types::NotionId;
use std::sync::Arc;

/// Queries all rows of an embedded database with bounded retries.
pub struct DatabaseRowClient {
    source: Arc<dyn NotionSource>,
    policy: RetryPolicy,
}

impl DatabaseRowClient {
    pub fn new(source: Arc<dyn NotionSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetches the complete ordered row set for a database.
    ///
    /// An attempt only succeeds once every page has been fetched;
    /// retryable failures restart the whole pagination, terminal
    /// failures propagate immediately.
    pub async fn query(&self, database: &NotionId) -> Result<Vec<DatabaseRow>, AppError> {
        self.policy
            .run(|| {
                let source = Arc::clone(&self.source);
                let database = database.clone();
                async move {
                    fetch_all_pages(|cursor| source.query_database(&database, cursor)).await
                }
            })
            .await
    }
}
