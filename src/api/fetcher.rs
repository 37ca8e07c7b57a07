// src/api/fetcher.rs
//! Recursive block-tree construction with bounded depth and parallel
//! sibling fan-out.
//!
//! Each recursion level lists a node's children, then expands every
//! child that reports children of its own — concurrently across
//! siblings, bounded by a semaphore, with results reattached by source
//! index so concurrency never reorders the tree. A failed subtree
//! resolves to an empty child list instead of aborting the traversal;
//! partial results beat total failure for document extraction.

use super::pagination::fetch_all_pages;
use super::NotionSource;
use crate::constants::{MAX_CONCURRENT_FETCHES, MAX_FETCH_DEPTH};
use crate::error::AppError;
use crate::model::Block;
use crate::types::NotionId;
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Fetches a complete block tree below a root node.
pub struct BlockTreeFetcher {
    source: Arc<dyn NotionSource>,
    semaphore: Arc<Semaphore>,
    max_depth: u8,
}

impl BlockTreeFetcher {
    /// Creates a fetcher with the given depth ceiling and fan-out width.
    ///
    /// Depth requests above [`MAX_FETCH_DEPTH`] are clamped: the ceiling
    /// is the traversal's only termination guarantee, so it is enforced
    /// even for callers asking for "unlimited".
    pub fn new(source: Arc<dyn NotionSource>, max_depth: u8, concurrency: usize) -> Self {
        let depth = max_depth.min(MAX_FETCH_DEPTH);
        if max_depth > depth {
            log::warn!(
                "Requested fetch depth {} exceeds ceiling {}, clamping",
                max_depth,
                depth
            );
        }

        Self {
            source,
            semaphore: Arc::new(Semaphore::new(concurrency.clamp(1, MAX_CONCURRENT_FETCHES))),
            max_depth: depth,
        }
    }

    /// Fetches the root's children and expands the tree to the depth
    /// ceiling. Returns the ordered top-level siblings.
    ///
    /// A node whose subtree could not be expanded keeps
    /// `has_children = true` with an empty child list, making the
    /// truncation observable rather than silent.
    pub async fn fetch(&self, root: &NotionId) -> Result<Vec<Block>, AppError> {
        if self.max_depth == 0 {
            return Ok(Vec::new());
        }
        log::info!(
            "Fetching block tree for {} (depth ceiling {})",
            root.as_str(),
            self.max_depth
        );
        self.fetch_level(root.clone(), self.max_depth).await
    }

    /// Fetches one node's children and recurses with `remaining - 1`
    /// levels of budget. Boxed because async recursion needs an
    /// indirection point.
    fn fetch_level(
        &self,
        parent: NotionId,
        remaining: u8,
    ) -> BoxFuture<'_, Result<Vec<Block>, AppError>> {
        async move {
            let mut blocks = {
                // The permit covers only this level's pagination, never a
                // whole subtree, so recursion cannot exhaust the pool.
                let _permit = self
                    .semaphore
                    .acquire()
                    .await
                    .map_err(|_| AppError::Internal {
                        message: "fetch semaphore closed".to_string(),
                    })?;
                fetch_all_pages(|cursor| self.source.list_children(&parent, cursor)).await?
            };

            if remaining <= 1 {
                // Depth ceiling reached: children stay unexpanded but the
                // has_children flag still records that they exist.
                return Ok(blocks);
            }

            // Fix each subtree's slot before dispatching, then fan out in
            // parallel and reassemble by index, not completion order.
            let pending: Vec<(usize, NotionId)> = blocks
                .iter()
                .enumerate()
                .filter(|(_, block)| block.has_children)
                .map(|(index, block)| (index, block.id.clone()))
                .collect();

            let fetches = pending.into_iter().map(|(index, id)| async move {
                (index, self.fetch_level(id, remaining - 1).await)
            });

            for (index, result) in join_all(fetches).await {
                match result {
                    Ok(children) => blocks[index].children = children,
                    Err(e) => {
                        log::warn!(
                            "Subtree fetch for {} failed, substituting empty children: {}",
                            blocks[index].id.as_str(),
                            e
                        );
                    }
                }
            }

            Ok(blocks)
        }
        .boxed()
    }
}
