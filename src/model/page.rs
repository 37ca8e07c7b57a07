// src/model/page.rs
//! Root page metadata.

use crate::types::NotionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for the page a fetch is rooted at.
///
/// Title extraction never fails: a page without a usable title property
/// carries the `"Untitled"` sentinel instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub id: NotionId,
    pub title: String,
    pub url: String,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    /// Emoji or image URL, when the page has an icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Cover image URL, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}
