// src/model/block.rs
//! The raw content tree: one [`Block`] per fetched node.
//!
//! A block couples the fields every node shares (identity, timestamps,
//! child bookkeeping) with a [`BlockPayload`] tagged union carrying the
//! kind-specific data. Undecodable kinds land in `BlockPayload::Unknown`
//! instead of failing the fetch.

use crate::types::{plain_text, NotionId, RichTextItem};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).single().unwrap_or_default()
}

/// One fetched unit in the raw tree.
///
/// Exclusively owned by the tree rooted at the page being fetched and
/// immutable once attached to its parent's child list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: NotionId,
    #[serde(default = "epoch")]
    pub created_time: DateTime<Utc>,
    #[serde(default = "epoch")]
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(flatten)]
    pub payload: BlockPayload,
    /// Populated by the tree fetcher, never present on the wire.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    /// Creates a block with a fresh ID and no children. Fixture helper.
    pub fn new(payload: BlockPayload) -> Self {
        Self {
            id: NotionId::new_v4(),
            created_time: epoch(),
            last_edited_time: epoch(),
            has_children: false,
            archived: false,
            payload,
            children: Vec::new(),
        }
    }

    /// Attaches children and flips `has_children`. Fixture helper.
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }

    pub fn kind(&self) -> &'static str {
        self.payload.kind()
    }
}

/// Kind-specific payload for every supported block type.
///
/// Internally tagged on the API's `type` discriminator; the payload
/// field carries the same name as the tag, matching the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockPayload {
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextPayload },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextPayload },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextPayload },
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: TextPayload },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: TextPayload },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: TextPayload },
    #[serde(rename = "to_do")]
    ToDo { to_do: ToDoPayload },
    #[serde(rename = "callout")]
    Callout { callout: TextPayload },
    #[serde(rename = "quote")]
    Quote { quote: TextPayload },
    #[serde(rename = "code")]
    Code { code: CodePayload },
    #[serde(rename = "table")]
    Table { table: TablePayload },
    #[serde(rename = "table_row")]
    TableRow { table_row: TableRowPayload },
    #[serde(rename = "image")]
    Image { image: FileObject },
    #[serde(rename = "toggle")]
    Toggle { toggle: TextPayload },
    #[serde(rename = "divider")]
    Divider,
    #[serde(rename = "child_database")]
    ChildDatabase { child_database: ChildDatabasePayload },
    /// Placeholder for any block type the engine does not decode.
    #[serde(rename = "unknown")]
    #[serde(other)]
    Unknown,
}

impl BlockPayload {
    /// The API-facing kind string for this payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Heading1 { .. } => "heading_1",
            Self::Heading2 { .. } => "heading_2",
            Self::Heading3 { .. } => "heading_3",
            Self::Paragraph { .. } => "paragraph",
            Self::BulletedListItem { .. } => "bulleted_list_item",
            Self::NumberedListItem { .. } => "numbered_list_item",
            Self::ToDo { .. } => "to_do",
            Self::Callout { .. } => "callout",
            Self::Quote { .. } => "quote",
            Self::Code { .. } => "code",
            Self::Table { .. } => "table",
            Self::TableRow { .. } => "table_row",
            Self::Image { .. } => "image",
            Self::Toggle { .. } => "toggle",
            Self::Divider => "divider",
            Self::ChildDatabase { .. } => "child_database",
            Self::Unknown => "unknown",
        }
    }

    /// Derives the display text for this payload: the concatenated
    /// plain-text runs of its rich-text field, or its title field when
    /// rich text is absent, or the empty string.
    pub fn display_text(&self) -> String {
        match self {
            Self::Heading1 { heading_1: t }
            | Self::Heading2 { heading_2: t }
            | Self::Heading3 { heading_3: t }
            | Self::Paragraph { paragraph: t }
            | Self::BulletedListItem {
                bulleted_list_item: t,
            }
            | Self::NumberedListItem {
                numbered_list_item: t,
            }
            | Self::Callout { callout: t }
            | Self::Quote { quote: t }
            | Self::Toggle { toggle: t } => plain_text(&t.rich_text),
            Self::ToDo { to_do } => plain_text(&to_do.rich_text),
            Self::Code { code } => plain_text(&code.rich_text),
            Self::ChildDatabase { child_database } => child_database.title.clone(),
            Self::Table { .. }
            | Self::TableRow { .. }
            | Self::Image { .. }
            | Self::Divider
            | Self::Unknown => String::new(),
        }
    }
}

/// Payload for the plain rich-text block family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextPayload {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
}

impl TextPayload {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            rich_text: vec![RichTextItem::from_text(text)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToDoPayload {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodePayload {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TablePayload {
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableRowPayload {
    #[serde(default)]
    pub cells: Vec<Vec<RichTextItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChildDatabasePayload {
    #[serde(default)]
    pub title: String,
}

/// An externally hosted or Notion-hosted file reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileObject {
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

impl FileObject {
    /// The resolved display URL regardless of hosting.
    pub fn url(&self) -> &str {
        match self {
            Self::External { external } => &external.url,
            Self::File { file } => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_prefers_rich_text_then_title() {
        let paragraph = BlockPayload::Paragraph {
            paragraph: TextPayload::from_text("hello"),
        };
        assert_eq!(paragraph.display_text(), "hello");

        let database = BlockPayload::ChildDatabase {
            child_database: ChildDatabasePayload {
                title: "Tasks".to_string(),
            },
        };
        assert_eq!(database.display_text(), "Tasks");

        assert_eq!(BlockPayload::Divider.display_text(), "");
        assert_eq!(BlockPayload::Unknown.display_text(), "");
    }

    #[test]
    fn file_object_resolves_url_from_either_hosting() {
        let external = FileObject::External {
            external: ExternalFile {
                url: "https://example.com/a.png".to_string(),
            },
        };
        assert_eq!(external.url(), "https://example.com/a.png");

        let hosted = FileObject::File {
            file: NotionFile {
                url: "https://files.notion.so/b.png".to_string(),
                expiry_time: None,
            },
        };
        assert_eq!(hosted.url(), "https://files.notion.so/b.png");
    }
}
