// src/api/mod.rs
//! Notion API interaction — retrieving pages, block trees, and rows.
//!
//! The [`NotionSource`] trait is the engine's only seam to the remote
//! service: the tree fetcher, database client, and simplifier depend on
//! it, never on HTTP details, which keeps all of them testable against
//! in-memory sources.

pub mod client;
pub mod database;
pub mod fetcher;
pub mod pagination;
pub mod parse;

use crate::error::AppError;
use crate::model::{Block, DatabaseRow, PageInfo};
use crate::types::NotionId;
use pagination::PaginatedResponse;

/// The ability to read content from a Notion workspace.
///
/// The three operations mirror the service's surface: page metadata by
/// id, child blocks of a node by cursor, and rows of a database by
/// cursor. Implementations return decoded domain values; wire-format
/// leniency lives behind this boundary.
#[async_trait::async_trait]
pub trait NotionSource: Send + Sync {
    /// Retrieves root metadata for a page. Failure here is fatal to the
    /// whole extraction — there is no partial result without a root.
    async fn retrieve_page(&self, id: &NotionId) -> Result<PageInfo, AppError>;

    /// Lists one page of a node's direct children.
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError>;

    /// Lists one page of a database's rows.
    async fn query_database(
        &self,
        database: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<DatabaseRow>, AppError>;
}

pub use client::NotionHttpClient;
pub use database::DatabaseRowClient;
pub use fetcher::BlockTreeFetcher;
pub use pagination::fetch_all_pages;
