// src/constants.rs
//! Domain constants that define the operational boundaries of the engine.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! them should tell the story of how a fetch behaves: how much arrives
//! per round-trip, how deep the tree walk goes, how stubbornly a flaky
//! database query is retried.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The API maximum is 100. We always request the maximum to minimize
/// round-trips while paginating block children and database rows.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Default recursion depth when fetching a block tree.
///
/// 99 is the conventional "effectively unlimited" value: no real Notion
/// page nests anywhere near that deep, but keeping the ceiling finite
/// guarantees termination even against pathological or mocked input.
pub const DEFAULT_FETCH_DEPTH: u8 = 99;

/// Hard ceiling on recursion depth. Requests above this are clamped.
pub const MAX_FETCH_DEPTH: u8 = 99;

// ---------------------------------------------------------------------------
// Database query retry policy
// ---------------------------------------------------------------------------

/// Maximum attempts for a child-database row query.
///
/// Database queries are the most failure-prone call we make; block and
/// page retrievals are not retried at all.
pub const DATABASE_QUERY_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first database-query retry. Doubles on each
/// subsequent retryable failure.
pub const DATABASE_QUERY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on the backoff delay between database-query attempts.
pub const DATABASE_QUERY_MAX_DELAY: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Concurrency boundaries
// ---------------------------------------------------------------------------

/// Hard cap on concurrent child-fetch requests against the API.
pub const MAX_CONCURRENT_FETCHES: usize = 32;

/// Returns the default fan-out width for sibling subtree fetches.
///
/// Fetch tasks wait on network I/O rather than the CPU, so running more
/// of them than there are cores is safe and shortens wide trees.
pub fn default_concurrency() -> usize {
    num_cpus::get().clamp(4, 24)
}

/// Text emitted for divider blocks in simplified output.
pub const DIVIDER_TEXT: &str = "---";

/// Marker appended to a child database's content when its rows could not
/// be loaded after exhausting all retries.
pub const LOAD_FAILED_MARKER: &str = "(load failed)";

/// Sentinel title for pages with no usable title property.
pub const UNTITLED_SENTINEL: &str = "Untitled";
