// src/simplify/simplifier.rs
//! The flattening walk from a raw block tree to simplified units.
//!
//! Depth-first, pre-order, deterministic: the same tree always yields
//! the same sequence. The walk is synchronous tree projection except
//! where a child database forces a row query, resolved lazily through
//! the resilient database client.

use crate::api::{DatabaseRowClient, NotionSource};
use crate::constants::{DIVIDER_TEXT, LOAD_FAILED_MARKER};
use crate::model::{Block, BlockPayload};
use crate::retry::RetryPolicy;
use crate::types::{plain_text, NotionId};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;

use super::{BlockType, ContentBlock};

/// Flattens a fetched block tree into ordered [`ContentBlock`] units.
pub struct Simplifier {
    rows: DatabaseRowClient,
}

impl Simplifier {
    pub fn new(source: Arc<dyn NotionSource>, policy: RetryPolicy) -> Self {
        Self {
            rows: DatabaseRowClient::new(source, policy),
        }
    }

    /// Simplifies the ordered top-level blocks of a page.
    ///
    /// Drop rule: a unit with empty derived text is omitted — along with
    /// its subtree — unless its kind carries meaning without inline text
    /// (table, image, child database). Dividers always emit their fixed
    /// unit.
    pub async fn simplify(&self, blocks: &[Block]) -> Vec<ContentBlock> {
        let mut units = Vec::new();
        self.walk(blocks, 0, &mut units).await;
        units
    }

    fn walk<'a>(
        &'a self,
        blocks: &'a [Block],
        indent: usize,
        out: &'a mut Vec<ContentBlock>,
    ) -> BoxFuture<'a, ()> {
        async move {
            for block in blocks {
                match &block.payload {
                    BlockPayload::Toggle { toggle } => {
                        let text = plain_text(&toggle.rich_text);
                        if text.is_empty() {
                            continue;
                        }
                        // Toggle children nest inside the unit instead of
                        // flattening, preserving disclosure grouping.
                        let mut nested = Vec::new();
                        self.walk(&block.children, indent + 1, &mut nested).await;
                        let mut unit = ContentBlock::new(BlockType::Toggle, text, indent);
                        if !nested.is_empty() {
                            unit.children = Some(nested);
                        }
                        out.push(unit);
                    }
                    BlockPayload::Table { .. } => {
                        out.push(project_table(block, indent));
                    }
                    BlockPayload::Image { image } => {
                        let mut unit =
                            ContentBlock::new(BlockType::Image, image.url().to_string(), indent);
                        unit.url = Some(image.url().to_string());
                        out.push(unit);
                    }
                    BlockPayload::ChildDatabase { child_database } => {
                        out.push(
                            self.project_child_database(&block.id, &child_database.title, indent)
                                .await,
                        );
                    }
                    // Rows only carry meaning inside a table projection.
                    BlockPayload::TableRow { .. } => {}
                    BlockPayload::Unknown => {}
                    BlockPayload::Divider => {
                        out.push(ContentBlock::new(BlockType::Divider, DIVIDER_TEXT, indent));
                    }
                    payload => {
                        let text = payload.display_text();
                        if text.is_empty() {
                            continue;
                        }
                        out.push(project_text_unit(payload, text, indent));
                        self.walk(&block.children, indent + 1, out).await;
                    }
                }
            }
        }
        .boxed()
    }

    /// Resolves an embedded database to its row list, degrading to a
    /// failure-annotated placeholder when all retries are exhausted so
    /// sibling simplification still completes.
    async fn project_child_database(
        &self,
        id: &NotionId,
        title: &str,
        indent: usize,
    ) -> ContentBlock {
        match self.rows.query(id).await {
            Ok(rows) => {
                let mut unit = ContentBlock::new(BlockType::ChildDatabase, title, indent);
                unit.database_rows = Some(rows);
                unit
            }
            Err(e) => {
                log::warn!(
                    "Child database {} could not be loaded: {}",
                    id.as_str(),
                    e
                );
                let content = if title.is_empty() {
                    LOAD_FAILED_MARKER.to_string()
                } else {
                    format!("{} {}", title, LOAD_FAILED_MARKER)
                };
                ContentBlock::new(BlockType::ChildDatabase, content, indent)
            }
        }
    }
}

/// Projects the plain text-bearing kinds into their units.
fn project_text_unit(payload: &BlockPayload, text: String, indent: usize) -> ContentBlock {
    match payload {
        BlockPayload::Heading1 { .. } => {
            let mut unit = ContentBlock::new(BlockType::Heading1, text, indent);
            unit.level = Some(1);
            unit
        }
        BlockPayload::Heading2 { .. } => {
            let mut unit = ContentBlock::new(BlockType::Heading2, text, indent);
            unit.level = Some(2);
            unit
        }
        BlockPayload::Heading3 { .. } => {
            let mut unit = ContentBlock::new(BlockType::Heading3, text, indent);
            unit.level = Some(3);
            unit
        }
        BlockPayload::BulletedListItem { .. } => {
            ContentBlock::new(BlockType::BulletedListItem, text, indent)
        }
        BlockPayload::NumberedListItem { .. } => {
            ContentBlock::new(BlockType::NumberedListItem, text, indent)
        }
        BlockPayload::ToDo { to_do } => {
            let mut unit = ContentBlock::new(BlockType::ToDo, text, indent);
            unit.checked = Some(to_do.checked);
            unit
        }
        BlockPayload::Callout { .. } => ContentBlock::new(BlockType::Callout, text, indent),
        BlockPayload::Quote { .. } => ContentBlock::new(BlockType::Quote, text, indent),
        BlockPayload::Code { code } => {
            let mut unit = ContentBlock::new(BlockType::Code, text, indent);
            if !code.language.is_empty() {
                unit.language = Some(code.language.clone());
            }
            unit
        }
        _ => ContentBlock::new(BlockType::Paragraph, text, indent),
    }
}

/// Folds a table's row children into the unit's text grid.
///
/// Rows are never emitted as standalone units; the display text is a
/// computed summary of the grid size.
fn project_table(block: &Block, indent: usize) -> ContentBlock {
    let rows: Vec<Vec<String>> = block
        .children
        .iter()
        .filter_map(|child| match &child.payload {
            BlockPayload::TableRow { table_row } => Some(
                table_row
                    .cells
                    .iter()
                    .map(|cell| plain_text(cell))
                    .collect(),
            ),
            _ => None,
        })
        .collect();

    let mut unit = ContentBlock::new(
        BlockType::Table,
        format!("Table ({} rows)", rows.len()),
        indent,
    );
    unit.table_data = Some(rows);
    unit
}
