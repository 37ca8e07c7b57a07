// src/types/mod.rs
//! Foundational domain types shared across the engine.

mod api_key;
mod ids;
mod rich_text;

pub use api_key::ApiKey;
pub use ids::NotionId;
pub use rich_text::{plain_text, RichTextItem};
