// src/pipeline.rs
//! End-to-end extraction: page metadata → block tree → simplified units.

use crate::api::{BlockTreeFetcher, NotionSource};
use crate::constants::default_concurrency;
use crate::error::AppError;
use crate::model::Block;
use crate::retry::RetryPolicy;
use crate::simplify::{ContentBlock, Simplifier};
use crate::types::NotionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// The final artifact delivered to callers: page identity plus the
/// ordered simplified content. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedContent {
    pub title: String,
    pub url: String,
    /// For document version tracking downstream.
    pub last_edited_time: DateTime<Utc>,
    pub contents: Vec<ContentBlock>,
}

/// Tuning knobs for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Depth ceiling for the block-tree fetch.
    pub depth: u8,
    /// Fan-out width for sibling subtree fetches.
    pub concurrency: usize,
    /// Overall deadline for the run, when set.
    pub timeout: Option<Duration>,
    /// Retry policy for child-database queries.
    pub retry: RetryPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            depth: crate::constants::DEFAULT_FETCH_DEPTH,
            concurrency: default_concurrency(),
            timeout: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Orchestrates one extraction against a content source.
pub struct Extractor {
    source: Arc<dyn NotionSource>,
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(source: Arc<dyn NotionSource>, options: ExtractOptions) -> Self {
        Self { source, options }
    }

    /// Fetches and simplifies the page rooted at `id`.
    ///
    /// Root metadata failure is the only hard failure besides terminal
    /// API errors; subtree and database problems degrade into the
    /// output per the engine's availability-over-completeness policy.
    /// When a deadline is configured, exceeding it abandons all
    /// in-flight fetches.
    pub async fn extract(&self, id: &NotionId) -> Result<SimplifiedContent, AppError> {
        match self.options.timeout {
            Some(deadline) => tokio::time::timeout(deadline, self.run(id))
                .await
                .map_err(|_| AppError::DeadlineExceeded(deadline))?,
            None => self.run(id).await,
        }
    }

    /// Fetches the raw tree without simplifying, for callers that want
    /// to retain the block structure.
    pub async fn fetch_tree(&self, id: &NotionId) -> Result<Vec<Block>, AppError> {
        let fetcher = BlockTreeFetcher::new(
            Arc::clone(&self.source),
            self.options.depth,
            self.options.concurrency,
        );
        fetcher.fetch(id).await
    }

    async fn run(&self, id: &NotionId) -> Result<SimplifiedContent, AppError> {
        let page = self.source.retrieve_page(id).await?;
        log::info!("Extracting '{}' ({})", page.title, page.id.as_str());

        let tree = self.fetch_tree(id).await?;

        let simplifier = Simplifier::new(Arc::clone(&self.source), self.options.retry.clone());
        let contents = simplifier.simplify(&tree).await;

        log::info!(
            "Simplified '{}': {} top-level blocks → {} content units",
            page.title,
            tree.len(),
            contents.len()
        );

        Ok(SimplifiedContent {
            title: page.title,
            url: page.url,
            last_edited_time: page.last_edited_time,
            contents,
        })
    }
}
