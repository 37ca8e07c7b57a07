// tests/common/mod.rs
//! Shared test infrastructure: an in-memory `NotionSource` with
//! scriptable pagination and failure injection, plus block fixtures.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use notion_simplify::{
    AppError, Block, BlockPayload, ChildDatabasePayload, CodePayload, DatabaseRow, ExternalFile,
    FileObject, NotionErrorCode, NotionId, NotionSource, PageInfo, PaginatedResponse, TablePayload,
    TableRowPayload, TextPayload, ToDoPayload,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn transient_error() -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::RateLimited,
        message: "rate limited".to_string(),
    }
}

pub fn terminal_error() -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::RestrictedResource,
        message: "no access".to_string(),
    }
}

/// Scriptable in-memory content source.
///
/// Children and rows are stored pre-split into pages; cursors are page
/// indices. Failure injection covers whole-listing failures, transient
/// database failures for the first N attempts, mid-pagination database
/// failures, and terminal database failures.
#[derive(Default)]
pub struct MockSource {
    page: Option<PageInfo>,
    children: HashMap<NotionId, Vec<Vec<Block>>>,
    rows: HashMap<NotionId, Vec<Vec<DatabaseRow>>>,
    failing_children: HashSet<NotionId>,
    database_transient_failures: HashMap<NotionId, u32>,
    database_mid_pagination_failures: HashMap<NotionId, u32>,
    database_terminal: HashSet<NotionId>,
    pub children_calls: AtomicUsize,
    database_attempts: Mutex<HashMap<NotionId, u32>>,
    database_attempt_starts: Mutex<HashMap<NotionId, Vec<tokio::time::Instant>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    /// Registers a parent's children as a single page of results.
    pub fn with_children(mut self, parent: &NotionId, children: Vec<Block>) -> Self {
        self.children.insert(parent.clone(), vec![children]);
        self
    }

    /// Registers a parent's children pre-split into pages.
    pub fn with_paged_children(mut self, parent: &NotionId, pages: Vec<Vec<Block>>) -> Self {
        self.children.insert(parent.clone(), pages);
        self
    }

    /// Every children listing for this parent fails.
    pub fn with_failing_children(mut self, parent: &NotionId) -> Self {
        self.failing_children.insert(parent.clone());
        self
    }

    pub fn with_rows(mut self, database: &NotionId, rows: Vec<DatabaseRow>) -> Self {
        self.rows.insert(database.clone(), vec![rows]);
        self
    }

    pub fn with_paged_rows(mut self, database: &NotionId, pages: Vec<Vec<DatabaseRow>>) -> Self {
        self.rows.insert(database.clone(), pages);
        self
    }

    /// The first `attempts` query attempts fail with a retryable error.
    pub fn with_database_transient_failures(mut self, database: &NotionId, attempts: u32) -> Self {
        self.database_transient_failures
            .insert(database.clone(), attempts);
        self
    }

    /// The first `attempts` query attempts fail with a retryable error
    /// partway through pagination (on the second page request).
    pub fn with_database_mid_pagination_failures(
        mut self,
        database: &NotionId,
        attempts: u32,
    ) -> Self {
        self.database_mid_pagination_failures
            .insert(database.clone(), attempts);
        self
    }

    /// Every query attempt for this database fails terminally.
    pub fn with_database_terminal_failure(mut self, database: &NotionId) -> Self {
        self.database_terminal.insert(database.clone());
        self
    }

    /// How many query attempts (pagination restarts) a database has seen.
    pub fn database_attempts(&self, database: &NotionId) -> u32 {
        *self
            .database_attempts
            .lock()
            .unwrap()
            .get(database)
            .unwrap_or(&0)
    }

    /// The delay between consecutive query-attempt starts.
    pub fn database_attempt_gaps(&self, database: &NotionId) -> Vec<std::time::Duration> {
        let starts = self.database_attempt_starts.lock().unwrap();
        let starts = starts.get(database).map(Vec::as_slice).unwrap_or(&[]);
        starts.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }

    fn page_of<T: Clone>(pages: &[Vec<T>], cursor: Option<String>) -> PaginatedResponse<T> {
        let index: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
        let results = pages.get(index).cloned().unwrap_or_default();
        let has_more = index + 1 < pages.len();
        PaginatedResponse {
            results,
            next_cursor: has_more.then(|| (index + 1).to_string()),
            has_more,
        }
    }
}

#[async_trait::async_trait]
impl NotionSource for MockSource {
    async fn retrieve_page(&self, _id: &NotionId) -> Result<PageInfo, AppError> {
        self.page.clone().ok_or_else(terminal_error)
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_children.contains(parent) {
            return Err(transient_error());
        }
        let pages = self.children.get(parent).cloned().unwrap_or_default();
        Ok(Self::page_of(&pages, cursor))
    }

    async fn query_database(
        &self,
        database: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<DatabaseRow>, AppError> {
        if self.database_terminal.contains(database) {
            return Err(terminal_error());
        }

        // A fresh pagination (no cursor) starts a new attempt.
        let attempt = {
            let mut attempts = self.database_attempts.lock().unwrap();
            let entry = attempts.entry(database.clone()).or_insert(0);
            if cursor.is_none() {
                *entry += 1;
                self.database_attempt_starts
                    .lock()
                    .unwrap()
                    .entry(database.clone())
                    .or_default()
                    .push(tokio::time::Instant::now());
            }
            *entry
        };

        if let Some(failures) = self.database_transient_failures.get(database) {
            if attempt <= *failures {
                return Err(transient_error());
            }
        }
        if let Some(failures) = self.database_mid_pagination_failures.get(database) {
            if attempt <= *failures && cursor.is_some() {
                return Err(transient_error());
            }
        }

        let pages = self.rows.get(database).cloned().unwrap_or_default();
        Ok(Self::page_of(&pages, cursor))
    }
}

// --- Block fixtures -------------------------------------------------------

pub fn page_info(id: &NotionId, title: &str) -> PageInfo {
    PageInfo {
        id: id.clone(),
        title: title.to_string(),
        url: format!("https://www.notion.so/{}", id.as_str()),
        created_time: Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
        last_edited_time: Utc.with_ymd_and_hms(2026, 1, 6, 0, 0, 0).unwrap(),
        icon: None,
        cover: None,
    }
}

pub fn paragraph(text: &str) -> Block {
    Block::new(BlockPayload::Paragraph {
        paragraph: TextPayload::from_text(text),
    })
}

pub fn heading1(text: &str) -> Block {
    Block::new(BlockPayload::Heading1 {
        heading_1: TextPayload::from_text(text),
    })
}

pub fn bullet(text: &str) -> Block {
    Block::new(BlockPayload::BulletedListItem {
        bulleted_list_item: TextPayload::from_text(text),
    })
}

pub fn todo(text: &str, checked: bool) -> Block {
    Block::new(BlockPayload::ToDo {
        to_do: ToDoPayload {
            rich_text: TextPayload::from_text(text).rich_text,
            checked,
        },
    })
}

pub fn toggle(text: &str) -> Block {
    Block::new(BlockPayload::Toggle {
        toggle: TextPayload::from_text(text),
    })
}

pub fn code(text: &str, language: &str) -> Block {
    Block::new(BlockPayload::Code {
        code: CodePayload {
            rich_text: TextPayload::from_text(text).rich_text,
            language: language.to_string(),
        },
    })
}

pub fn divider() -> Block {
    Block::new(BlockPayload::Divider)
}

pub fn image(url: &str) -> Block {
    Block::new(BlockPayload::Image {
        image: FileObject::External {
            external: ExternalFile {
                url: url.to_string(),
            },
        },
    })
}

pub fn table_row(cells: &[&str]) -> Block {
    Block::new(BlockPayload::TableRow {
        table_row: TableRowPayload {
            cells: cells
                .iter()
                .map(|cell| TextPayload::from_text(*cell).rich_text)
                .collect(),
        },
    })
}

pub fn table(rows: Vec<Block>) -> Block {
    Block::new(BlockPayload::Table {
        table: TablePayload {
            table_width: rows.len(),
            has_column_header: false,
            has_row_header: false,
        },
    })
    .with_children(rows)
}

pub fn child_database(id: &NotionId, title: &str) -> Block {
    let mut block = Block::new(BlockPayload::ChildDatabase {
        child_database: ChildDatabasePayload {
            title: title.to_string(),
        },
    });
    block.id = id.clone();
    block
}

pub fn database_row(title: &str, properties: &[(&str, &str)]) -> DatabaseRow {
    // Derive the id from the title so building the same fixture twice
    // yields identical rows (required by the determinism scenario).
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    std::hash::Hash::hash(title, &mut hasher);
    let h = std::hash::Hasher::finish(&hasher);
    let id = NotionId::parse(&format!("{:016x}{:016x}", h, h.rotate_left(32)))
        .expect("derived 32-hex id is valid");
    DatabaseRow {
        url: format!("https://www.notion.so/{}", id.as_str()),
        id,
        title: title.to_string(),
        properties: properties
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<IndexMap<_, _>>(),
    }
}

/// Marks a block as having children on the service side without
/// attaching them locally; the fetcher is expected to resolve them.
pub fn flag_children(mut block: Block) -> Block {
    block.has_children = true;
    block
}
