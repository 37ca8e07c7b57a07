// src/model/row.rs
//! Database rows and the property-to-string reduction.
//!
//! Every supported property type reduces deterministically to a single
//! rendered string; malformed or unrecognized values reduce to the empty
//! string rather than failing the row.

use crate::types::{plain_text, NotionId, RichTextItem};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One resolved item from an embedded database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRow {
    pub id: NotionId,
    pub title: String,
    pub url: String,
    /// Property name → rendered value, in schema order.
    pub properties: IndexMap<String, String>,
}

/// A typed database property value, tagged by the API's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyValue {
    #[serde(rename = "title")]
    Title {
        #[serde(default)]
        title: Vec<RichTextItem>,
    },
    #[serde(rename = "rich_text")]
    RichText {
        #[serde(default)]
        rich_text: Vec<RichTextItem>,
    },
    #[serde(rename = "number")]
    Number { number: Option<f64> },
    #[serde(rename = "select")]
    Select { select: Option<SelectOption> },
    #[serde(rename = "status")]
    Status { status: Option<SelectOption> },
    #[serde(rename = "multi_select")]
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    #[serde(rename = "date")]
    Date { date: Option<DateValue> },
    #[serde(rename = "checkbox")]
    Checkbox { checkbox: bool },
    #[serde(rename = "url")]
    Url { url: Option<String> },
    #[serde(rename = "email")]
    Email { email: Option<String> },
    #[serde(rename = "phone_number")]
    PhoneNumber { phone_number: Option<String> },
    #[serde(rename = "people")]
    People {
        #[serde(default)]
        people: Vec<PersonRef>,
    },
    #[serde(rename = "files")]
    Files {
        #[serde(default)]
        files: Vec<FileRef>,
    },
    #[serde(rename = "relation")]
    Relation {
        #[serde(default)]
        relation: Vec<RelationRef>,
    },
    #[serde(rename = "formula")]
    Formula { formula: FormulaResult },
    #[serde(rename = "rollup")]
    Rollup { rollup: RollupResult },
    #[serde(rename = "created_time")]
    CreatedTime { created_time: DateTime<Utc> },
    #[serde(rename = "last_edited_time")]
    LastEditedTime { last_edited_time: DateTime<Utc> },
    #[serde(other)]
    Unknown,
}

impl PropertyValue {
    /// Reduces the value to its rendered string form.
    pub fn render(&self) -> String {
        match self {
            Self::Title { title } => plain_text(title),
            Self::RichText { rich_text } => plain_text(rich_text),
            Self::Number { number } => number.map(format_number).unwrap_or_default(),
            Self::Select { select } | Self::Status { status: select } => select
                .as_ref()
                .map(|option| option.name.clone())
                .unwrap_or_default(),
            Self::MultiSelect { multi_select } => multi_select
                .iter()
                .map(|option| option.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Self::Date { date } => date.as_ref().map(DateValue::render).unwrap_or_default(),
            Self::Checkbox { checkbox } => checkbox.to_string(),
            Self::Url { url: value }
            | Self::Email { email: value }
            | Self::PhoneNumber {
                phone_number: value,
            } => value.clone().unwrap_or_default(),
            Self::People { people } => people
                .iter()
                .filter_map(|person| person.name.as_deref())
                .collect::<Vec<_>>()
                .join(", "),
            Self::Files { files } => files
                .iter()
                .map(|file| file.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Self::Relation { relation } => relation.len().to_string(),
            Self::Formula { formula } => formula.render(),
            Self::Rollup { rollup } => rollup.render(),
            Self::CreatedTime { created_time } => created_time.to_rfc3339(),
            Self::LastEditedTime { last_edited_time } => last_edited_time.to_rfc3339(),
            Self::Unknown => String::new(),
        }
    }

    /// The title text when this is a title property, otherwise `None`.
    pub fn as_title(&self) -> Option<String> {
        match self {
            Self::Title { title } => Some(plain_text(title)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// A date or date range. Kept as the API's ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

impl DateValue {
    fn render(&self) -> String {
        match &self.end {
            Some(end) => format!("{} → {}", self.start, end),
            None => self.start.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: NotionId,
}

/// A computed formula result, tagged by its result type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FormulaResult {
    #[serde(rename = "string")]
    String { string: Option<String> },
    #[serde(rename = "number")]
    Number { number: Option<f64> },
    #[serde(rename = "boolean")]
    Boolean { boolean: Option<bool> },
    #[serde(rename = "date")]
    Date { date: Option<DateValue> },
    #[serde(other)]
    Unknown,
}

impl FormulaResult {
    fn render(&self) -> String {
        match self {
            Self::String { string } => string.clone().unwrap_or_default(),
            Self::Number { number } => number.map(format_number).unwrap_or_default(),
            Self::Boolean { boolean } => boolean.map(|b| b.to_string()).unwrap_or_default(),
            Self::Date { date } => date.as_ref().map(DateValue::render).unwrap_or_default(),
            Self::Unknown => String::new(),
        }
    }
}

/// An aggregated rollup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RollupResult {
    #[serde(rename = "number")]
    Number { number: Option<f64> },
    #[serde(rename = "date")]
    Date { date: Option<DateValue> },
    #[serde(rename = "array")]
    Array {
        #[serde(default)]
        array: Vec<serde_json::Value>,
    },
    #[serde(other)]
    Unknown,
}

impl RollupResult {
    fn render(&self) -> String {
        match self {
            Self::Number { number } => number.map(format_number).unwrap_or_default(),
            Self::Date { date } => date.as_ref().map(DateValue::render).unwrap_or_default(),
            Self::Array { array } => array.len().to_string(),
            Self::Unknown => String::new(),
        }
    }
}

/// Renders a number without a trailing `.0` for integral values.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
