// src/types/rich_text.rs
//! Minimal rich-text representation.
//!
//! The API decorates text runs with annotations, equations, and mentions.
//! Simplification only needs the plain text and any link target, so that
//! is all the engine keeps.

use serde::{Deserialize, Serialize};

/// One run of rich text from a block or property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RichTextItem {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextItem {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: None,
        }
    }
}

/// Concatenates the plain-text runs of a rich-text array.
pub fn plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
