// src/api/parse.rs
//! Lenient decoding of Notion API responses into domain values.
//!
//! The decoding posture follows the engine's availability-over-
//! completeness tradeoff: an unrecognizable block becomes an `Unknown`
//! placeholder, a missing page title becomes the `"Untitled"` sentinel,
//! and a malformed property renders as the empty string. Only structural
//! failures (an unreadable response envelope, a missing root id) are
//! errors.

use crate::constants::UNTITLED_SENTINEL;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, BlockPayload, DatabaseRow, PageInfo, PropertyValue};
use crate::types::NotionId;
use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Notion API error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Converts a non-success response body into a typed service error.
pub fn parse_error_body(status: u16, body: &str) -> AppError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) if !error.code.is_empty() => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
        },
        _ => AppError::NotionService {
            code: NotionErrorCode::from_http_status(status),
            message: format!("HTTP {}", status),
        },
    }
}

fn fallback_time() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).single().unwrap_or_default()
}

fn parse_time(value: Option<&Value>) -> DateTime<Utc> {
    value
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(fallback_time)
}

/// Decodes one block from a listing result.
///
/// Never fails: anything that does not decode as a known block kind
/// becomes a placeholder of kind `unknown` carrying whatever identity
/// the item exposed.
pub fn parse_block(value: Value) -> Block {
    match serde_json::from_value::<Block>(value.clone()) {
        Ok(block) => block,
        Err(e) => {
            log::debug!("Undecodable block, substituting unknown placeholder: {}", e);
            Block {
                id: value
                    .get("id")
                    .and_then(Value::as_str)
                    .map(NotionId::from_api)
                    .unwrap_or_else(NotionId::new_v4),
                created_time: parse_time(value.get("created_time")),
                last_edited_time: parse_time(value.get("last_edited_time")),
                has_children: value
                    .get("has_children")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                archived: value
                    .get("archived")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                payload: BlockPayload::Unknown,
                children: Vec::new(),
            }
        }
    }
}

/// Decodes page metadata. The id is the only required field; title
/// extraction falls back to the sentinel rather than erroring.
pub fn parse_page_info(value: &Value) -> Result<PageInfo, AppError> {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .map(NotionId::from_api)
        .ok_or_else(|| AppError::MalformedResponse("page response missing 'id'".to_string()))?;

    Ok(PageInfo {
        id,
        title: extract_title(value.get("properties")),
        url: value
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        created_time: parse_time(value.get("created_time")),
        last_edited_time: parse_time(value.get("last_edited_time")),
        icon: parse_visual(value.get("icon")),
        cover: parse_visual(value.get("cover")),
    })
}

/// Decodes one database row (a page object from a query result).
///
/// Never fails: identity falls back to a fresh id, the title to the
/// sentinel-free empty handling of [`extract_title`], and each property
/// to its rendered string (empty when malformed).
pub fn parse_database_row(value: &Value) -> DatabaseRow {
    let mut properties = IndexMap::new();
    if let Some(map) = value.get("properties").and_then(Value::as_object) {
        for (name, property) in map {
            let rendered = serde_json::from_value::<PropertyValue>(property.clone())
                .map(|p| p.render())
                .unwrap_or_default();
            properties.insert(name.clone(), rendered);
        }
    }

    DatabaseRow {
        id: value
            .get("id")
            .and_then(Value::as_str)
            .map(NotionId::from_api)
            .unwrap_or_else(NotionId::new_v4),
        title: extract_title(value.get("properties")),
        url: value
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        properties,
    }
}

/// Finds the first non-empty title-type property, or the sentinel.
fn extract_title(properties: Option<&Value>) -> String {
    properties
        .and_then(Value::as_object)
        .and_then(|map| {
            map.values().find_map(|property| {
                serde_json::from_value::<PropertyValue>(property.clone())
                    .ok()
                    .and_then(|p| p.as_title())
                    .filter(|title| !title.is_empty())
            })
        })
        .unwrap_or_else(|| UNTITLED_SENTINEL.to_string())
}

/// Resolves an icon or cover object to a display string (emoji or URL).
fn parse_visual(value: Option<&Value>) -> Option<String> {
    let value = value?;
    let kind = value.get("type").and_then(Value::as_str)?;
    match kind {
        "emoji" => value
            .get("emoji")
            .and_then(Value::as_str)
            .map(str::to_string),
        "external" => value
            .get("external")
            .and_then(|v| v.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string),
        "file" => value
            .get("file")
            .and_then(|v| v.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
