// src/api/client.rs
//! Thin reqwest wrapper implementing [`NotionSource`] against the
//! Notion REST API.
//!
//! Authentication and the versioned-API header are baked into the
//! client; decoding leniency lives in [`super::parse`].

use super::pagination::PaginatedResponse;
use super::NotionSource;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::model::{Block, DatabaseRow, PageInfo};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client};
use serde_json::Value;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// HTTP client for the Notion API.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a client with bearer auth and the API version header.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header)
                .map_err(|e| AppError::InvalidApiKey(format!("not a valid header value: {}", e)))?,
        );
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }

    /// GET an endpoint and return the decoded JSON body, mapping
    /// non-success statuses through the typed error vocabulary.
    async fn get_json(&self, endpoint: &str) -> Result<Value, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::decode_response(response).await
    }

    /// POST a JSON body to an endpoint and return the decoded JSON body.
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        Self::decode_response(response).await
    }

    async fn decode_response(response: reqwest::Response) -> Result<Value, AppError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(super::parse::parse_error_body(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Splits a listing envelope into items, cursor, and continuation flag.
    fn split_page(value: Value) -> (Vec<Value>, Option<String>, bool) {
        let next_cursor = value
            .get("next_cursor")
            .and_then(Value::as_str)
            .map(str::to_string);
        let has_more = value
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let results = match value.get("results") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        (results, next_cursor, has_more)
    }
}

#[async_trait::async_trait]
impl NotionSource for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<PageInfo, AppError> {
        let body = self
            .get_json(&format!("pages/{}", id.to_hyphenated()))
            .await?;
        super::parse::parse_page_info(&body)
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        let mut endpoint = format!(
            "blocks/{}/children?page_size={}",
            parent.to_hyphenated(),
            NOTION_API_PAGE_SIZE
        );
        if let Some(cursor) = cursor {
            endpoint.push_str(&format!("&start_cursor={}", cursor));
        }

        let body = self.get_json(&endpoint).await?;
        let (results, next_cursor, has_more) = Self::split_page(body);

        Ok(PaginatedResponse {
            results: results.into_iter().map(super::parse::parse_block).collect(),
            next_cursor,
            has_more,
        })
    }

    async fn query_database(
        &self,
        database: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<DatabaseRow>, AppError> {
        let mut query = serde_json::json!({ "page_size": NOTION_API_PAGE_SIZE });
        if let Some(cursor) = cursor {
            query["start_cursor"] = serde_json::json!(cursor);
        }

        let body = self
            .post_json(&format!("databases/{}/query", database.to_hyphenated()), &query)
            .await?;
        let (results, next_cursor, has_more) = Self::split_page(body);

        Ok(PaginatedResponse {
            results: results
                .iter()
                .map(super::parse::parse_database_row)
                .collect(),
            next_cursor,
            has_more,
        })
    }
}
