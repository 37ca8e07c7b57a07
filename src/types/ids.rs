// src/types/ids.rs
//! Normalized Notion identifiers.
//!
//! Notion IDs arrive in three shapes: bare 32-hex, hyphenated UUID, or
//! buried in a share URL. All of them normalize to the bare form here so
//! the rest of the engine never thinks about formats again.

use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

static ID_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9a-fA-F]{32})$").expect("static regex is valid"));

/// A normalized Notion object identifier (32 lowercase hex characters).
///
/// Used uniformly for pages, blocks, and databases — the API accepts the
/// same identifier space for all three.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String);

impl NotionId {
    /// Parses any supported input shape into a normalized ID.
    ///
    /// Accepts a bare 32-hex string, a hyphenated UUID, or a Notion URL
    /// whose last path segment ends in an ID.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let input = input.trim();

        let candidate = if input.starts_with("http://") || input.starts_with("https://") {
            let url = Url::parse(input)
                .map_err(|e| AppError::InvalidId(format!("{}: {}", input, e)))?;
            url.path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(|segment| segment.to_string())
                .ok_or_else(|| AppError::InvalidId(format!("no ID in URL: {}", input)))?
        } else {
            input.to_string()
        };

        let stripped: String = candidate.chars().filter(|c| *c != '-').collect();
        match ID_SUFFIX.captures(&stripped) {
            Some(caps) => Ok(Self(caps[1].to_lowercase())),
            None => Err(AppError::InvalidId(input.to_string())),
        }
    }

    /// Creates an ID from an already-normalized API response value.
    pub(crate) fn from_api(value: &str) -> Self {
        Self(value.chars().filter(|c| *c != '-').collect::<String>().to_lowercase())
    }

    /// Creates a fresh random ID. Used by tests and fixtures.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    /// The bare 32-hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hyphenated UUID form the REST endpoints expect.
    pub fn to_hyphenated(&self) -> String {
        if self.0.len() == 32 {
            format!(
                "{}-{}-{}-{}-{}",
                &self.0[0..8],
                &self.0[8..12],
                &self.0[12..16],
                &self.0[16..20],
                &self.0[20..32]
            )
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_api(&value))
    }
}
