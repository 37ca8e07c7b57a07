// src/simplify/mod.rs
//! The simplification model: flat, typed content units with indentation
//! metadata, suitable for prompt assembly, diffing, or rendering.

mod simplifier;

pub use simplifier::Simplifier;

use crate::model::DatabaseRow;
use serde::{Deserialize, Serialize};

/// The output vocabulary of simplified units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "heading_1")]
    Heading1,
    #[serde(rename = "heading_2")]
    Heading2,
    #[serde(rename = "heading_3")]
    Heading3,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem,
    #[serde(rename = "numbered_list_item")]
    NumberedListItem,
    #[serde(rename = "to_do")]
    ToDo,
    #[serde(rename = "callout")]
    Callout,
    #[serde(rename = "quote")]
    Quote,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "toggle")]
    Toggle,
    #[serde(rename = "divider")]
    Divider,
    #[serde(rename = "child_database")]
    ChildDatabase,
}

/// One flattened entry of simplified content.
///
/// `indent_level` is consistent with the unit's structural ancestors
/// (0 = top level). Toggles are the one kind whose children are nested
/// in `children` instead of flattened, preserving disclosure grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    pub indent_level: usize,
    /// Heading level 1–3, headings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Checked state, to-dos only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Language tag, code blocks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Resolved display URL, images only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Cell text grid, tables only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<Vec<Vec<String>>>,
    /// Resolved rows, child databases only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_rows: Option<Vec<DatabaseRow>>,
    /// Nested units, toggles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ContentBlock>>,
}

impl ContentBlock {
    /// Creates a unit with only the universal fields set.
    pub fn new(block_type: BlockType, content: impl Into<String>, indent_level: usize) -> Self {
        Self {
            block_type,
            content: content.into(),
            indent_level,
            level: None,
            checked: None,
            language: None,
            url: None,
            table_data: None,
            database_rows: None,
            children: None,
        }
    }
}
