// src/lib.rs
//! notion-simplify library — fetches Notion page trees and flattens them
//! into simplified content blocks for AI prompting.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `NotionErrorCode`
//! - **Configuration** — `CommandLineInput`, `ExtractorConfig`
//! - **Domain model** — `Block`, `BlockPayload`, `PageInfo`, `DatabaseRow`
//! - **API client** — `NotionSource`, `NotionHttpClient`, `BlockTreeFetcher`
//! - **Simplification** — `Simplifier`, `ContentBlock`, `SimplifiedContent`

mod api;
mod config;
mod constants;
mod error;
mod model;
mod pipeline;
mod retry;
mod simplify;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, Result};

// --- Configuration ---
pub use crate::config::{CommandLineInput, ExtractorConfig};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockPayload, ChildDatabasePayload, CodePayload, DatabaseRow, DateValue, ExternalFile,
    FileObject, FormulaResult, NotionFile, PageInfo, PropertyValue, RollupResult, SelectOption,
    TablePayload, TableRowPayload, TextPayload, ToDoPayload,
};

// --- Domain Types ---
pub use crate::types::{plain_text, ApiKey, NotionId, RichTextItem};

// --- API Client ---
pub use crate::api::{
    fetch_all_pages, pagination::PaginatedResponse, BlockTreeFetcher, DatabaseRowClient,
    NotionHttpClient, NotionSource,
};

// --- Retry Policy ---
pub use crate::retry::RetryPolicy;

// --- Simplification ---
pub use crate::pipeline::{ExtractOptions, Extractor, SimplifiedContent};
pub use crate::simplify::{BlockType, ContentBlock, Simplifier};

// --- Constants ---
pub use crate::constants::{
    DATABASE_QUERY_MAX_ATTEMPTS, DEFAULT_FETCH_DEPTH, MAX_FETCH_DEPTH, NOTION_API_PAGE_SIZE,
};
