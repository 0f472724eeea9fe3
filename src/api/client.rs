// src/api/client.rs
//! HTTP client for the Notion API and the content repository built on it.
//!
//! Requests are authenticated and versioned here; parsing lives in
//! `parser`, model conversion in `notion_client_adapter`.

use super::parser::{parse_blocks_pagination, parse_record_response, parse_records_pagination};
use super::simple_pagination::fetch_all_pages;
use super::ContentRepository;
use crate::constants::NOTION_MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::model::{group_list_items, Block, PageRecord};
use crate::types::{ApiKey, DatabaseId, PageId};
use futures::future::{BoxFuture, FutureExt};
use reqwest::{header, Client, Response};
use serde::Serialize;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to `endpoint` (a path relative to the API root).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        log::debug!("GET {} -> {}", endpoint, response.status());
        Ok(response)
    }

    /// Makes a POST request with a JSON body to `endpoint`.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        log::debug!("POST {} -> {}", endpoint, response.status());
        Ok(response)
    }

    /// Every direct child of `parent`, following cursors to the end.
    async fn retrieve_children(&self, parent: &str) -> Result<Vec<Block>, AppError> {
        let pagination_result = fetch_all_pages(
            |page_size, cursor| async move {
                let endpoint = children_endpoint(parent, page_size, cursor.as_deref());
                let response = self.get(&endpoint).await?;
                let result = extract_response_text(response).await?;
                parse_blocks_pagination(result)
            },
            None,
        )
        .await?;
        Ok(pagination_result.items)
    }

    /// Fetches the children of `parent` and, one block at a time, their
    /// descendants.
    ///
    /// List runs are grouped at every level except directly under a list
    /// item, whose children are rendered by the first-child rule instead.
    fn fetch_tree(&self, parent: String, depth: usize) -> BoxFuture<'_, Result<Vec<Block>, AppError>> {
        async move {
            if depth > NOTION_MAX_FETCH_DEPTH {
                return Err(AppError::RecursionLimitExceeded(NOTION_MAX_FETCH_DEPTH));
            }

            let mut blocks = self.retrieve_children(&parent).await?;
            for block in &mut blocks {
                if !block.has_children() {
                    continue;
                }
                let children = self.fetch_tree(block.id().to_dashed(), depth + 1).await?;
                let children = if block.is_list_item() {
                    children
                } else {
                    group_list_items(children)
                };
                block.set_children(children);
            }
            Ok(blocks)
        }
        .boxed()
    }
}

fn children_endpoint(parent: &str, page_size: u32, cursor: Option<&str>) -> String {
    let mut endpoint = format!("blocks/{}/children?page_size={}", parent, page_size);
    if let Some(cursor) = cursor {
        endpoint.push_str("&start_cursor=");
        endpoint.push_str(cursor);
    }
    endpoint
}

#[async_trait::async_trait]
impl ContentRepository for NotionHttpClient {
    async fn list_records(
        &self,
        database: &DatabaseId,
    ) -> Result<Vec<Option<PageRecord>>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_dashed());
        log::info!("Querying database {}", database);

        let pagination_result = fetch_all_pages(
            |page_size, cursor| {
                let endpoint = &endpoint;
                async move {
                    let mut query = serde_json::json!({ "page_size": page_size });
                    if let Some(cursor) = cursor {
                        query["start_cursor"] = serde_json::json!(cursor);
                    }
                    let response = self.post(endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    parse_records_pagination(result)
                }
            },
            None,
        )
        .await?;

        log::debug!(
            "Database {} returned {} rows over {} pages",
            database,
            pagination_result.items.len(),
            pagination_result.pages_fetched
        );
        Ok(pagination_result.items)
    }

    async fn get_record(&self, page: &PageId) -> Result<PageRecord, AppError> {
        let response = self.get(&format!("pages/{}", page.to_dashed())).await?;
        let result = extract_response_text(response).await?;
        parse_record_response(result)
    }

    async fn get_block_tree(&self, page: &PageId) -> Result<Vec<Block>, AppError> {
        let blocks = self.fetch_tree(page.to_dashed(), 0).await?;
        Ok(group_list_items(blocks))
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Reads the response body as text, keeping status and URL for error reports.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_endpoint_carries_cursor() {
        assert_eq!(
            children_endpoint("abc", 100, None),
            "blocks/abc/children?page_size=100"
        );
        assert_eq!(
            children_endpoint("abc", 100, Some("next")),
            "blocks/abc/children?page_size=100&start_cursor=next"
        );
    }
}
