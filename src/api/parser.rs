// src/api/parser.rs
//! Turns raw Notion responses into domain values.
//!
//! Success bodies are decoded with notion-client's serde types; error bodies
//! are decoded into Notion's error object when possible and otherwise
//! classified by HTTP status.

use super::client::ApiResponse;
use super::responses::{
    NotionError, NotionPage, QueryDatabaseResponse, RetrieveBlockChildrenResponse, ToDomain,
};
use super::types::PaginatedResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::{Block, PageRecord};
use reqwest::StatusCode;

/// Parse any Notion API response into `T`, or into the error it reports.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_with_notion_client(&result.data, &result.url)
    } else {
        parse_error_with_notion_client(&result.data, result.status, &result.url)
    }
}

fn parse_with_notion_client<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn parse_error_with_notion_client<T>(
    body: &str,
    status: StatusCode,
    url: &str,
) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return Err(NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into());
    }

    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

/// Cuts a body down for logging without splitting a UTF-8 character.
fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Parse a single page (`GET pages/{id}`) into a post record.
pub fn parse_record_response(result: ApiResponse<String>) -> Result<PageRecord, AppError> {
    let page: NotionPage = parse_api_response(result)?;
    page.to_domain()
}

/// Parse one page of a database query. Rows that cannot be read become `None`.
pub fn parse_records_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Option<PageRecord>>, AppError> {
    let response: QueryDatabaseResponse = parse_api_response(result)?;

    Ok(PaginatedResponse {
        object: response.object.clone(),
        next_cursor: response.next_cursor.clone(),
        has_more: response.has_more,
        results: response.into_domain_records(),
    })
}

/// Parse one page of block children.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;

    Ok(PaginatedResponse {
        object: response.object.clone(),
        next_cursor: response.next_cursor.clone(),
        has_more: response.has_more,
        results: response.into_domain_blocks(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::OK,
            url: "test_url".to_string(),
        }
    }

    const PAGE_ROW: &str = r#"{
        "object": "page",
        "id": "216cd412-8533-8087-a989-cf37889137c3",
        "created_time": "2023-01-04T16:00:00.000Z",
        "last_edited_time": "2023-02-10T03:30:00.000Z",
        "created_by": {"object": "user", "id": "user-id"},
        "last_edited_by": {"object": "user", "id": "user-id"},
        "parent": {"type": "database_id", "database_id": "a1b2c3d4-e5f6-7890-abcd-ef1234567890"},
        "archived": false,
        "url": "https://www.notion.so/Test-Page",
        "properties": {
            "Name": {
                "id": "title",
                "type": "title",
                "title": [
                    {
                        "type": "text",
                        "text": {"content": "Hello Rust", "link": null},
                        "plain_text": "Hello Rust",
                        "href": null,
                        "annotations": {"bold": false, "italic": false, "strikethrough": false, "underline": false, "code": false, "color": "default"}
                    }
                ]
            },
            "Image": {"id": "img", "type": "url", "url": "https://example.com/cover.png"},
            "Tags": {
                "id": "tags",
                "type": "multi_select",
                "multi_select": [
                    {"id": "t1", "name": "rust", "color": "orange"},
                    {"id": "t2", "name": "web", "color": "blue"}
                ]
            }
        }
    }"#;

    #[test]
    fn test_error_body_becomes_notion_api_error() {
        let result = parse_api_response::<NotionPage>(ApiResponse {
            data: r#"{
                "object": "error",
                "status": 404,
                "code": "object_not_found",
                "message": "Could not find page with ID: abc123",
                "request_id": "req_123"
            }"#
            .to_string(),
            status: StatusCode::NOT_FOUND,
            url: "test_url".to_string(),
        });

        match result {
            Err(e @ AppError::NotionClient(NotionClientError::NotionApi { .. })) => {
                assert!(e.is_not_found())
            }
            other => panic!("Expected NotionClientError::NotionApi, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_error_body_falls_back_to_status() {
        let result = parse_api_response::<NotionPage>(ApiResponse {
            data: "<html>bad gateway</html>".to_string(),
            status: StatusCode::BAD_GATEWAY,
            url: "test_url".to_string(),
        });

        match result {
            Err(AppError::NotionService { code, .. }) => {
                assert_eq!(code, NotionErrorCode::HttpStatus(502))
            }
            other => panic!("Expected NotionService, got {:?}", other),
        }
    }

    #[test]
    fn test_record_properties_are_mapped() {
        let record = parse_record_response(ok(PAGE_ROW)).unwrap();

        assert_eq!(record.id.as_str(), "216cd41285338087a989cf37889137c3");
        assert_eq!(record.title_text(), "Hello Rust");
        assert_eq!(
            record.cover_url.as_deref(),
            Some("https://example.com/cover.png")
        );
        let tags: Vec<&str> = record.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_unreadable_row_becomes_none() {
        let body = format!(
            r#"{{
                "object": "list",
                "results": [{}, {{"object": "page", "id": "not-a-page"}}],
                "next_cursor": "cursor-2",
                "has_more": true
            }}"#,
            PAGE_ROW
        );

        let page = parse_records_pagination(ok(&body)).unwrap();
        assert_eq!(page.results.len(), 2);
        assert!(page.results[0].is_some());
        assert!(page.results[1].is_none());
        assert_eq!(page.next_cursor.as_deref(), Some("cursor-2"));
    }

    #[test]
    fn test_blocks_page_decodes_children() {
        let body = r#"{
            "object": "list",
            "results": [{
                "object": "block",
                "id": "316cd412-8533-8087-a989-cf37889137c4",
                "parent": {"type": "page_id", "page_id": "414cd412-8533-8087-a989-cf37889137c5"},
                "created_time": "2025-06-20T00:00:00.000Z",
                "last_edited_time": "2025-06-20T00:00:00.000Z",
                "created_by": {"object": "user", "id": "user-id"},
                "last_edited_by": {"object": "user", "id": "user-id"},
                "has_children": false,
                "archived": false,
                "type": "divider",
                "divider": {}
            }],
            "next_cursor": null,
            "has_more": false
        }"#;

        let page = parse_blocks_pagination(ok(body)).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].block_type(), "divider");
        assert!(!page.has_more);
    }

    fn block_json(id: &str, kind: &str, extra: &str) -> String {
        format!(
            r#"{{
                "object": "block",
                "id": "{id}",
                "parent": {{"type": "page_id", "page_id": "414cd412-8533-8087-a989-cf37889137c5"}},
                "created_time": "2025-06-20T00:00:00.000Z",
                "last_edited_time": "2025-06-20T00:00:00.000Z",
                "created_by": {{"object": "user", "id": "user-id"}},
                "last_edited_by": {{"object": "user", "id": "user-id"}},
                {extra}
                "type": "{kind}",
                "{kind}": {{}}
            }}"#
        )
    }

    fn listing(blocks: &[String]) -> String {
        format!(
            r#"{{"object": "list", "results": [{}], "next_cursor": null, "has_more": false}}"#,
            blocks.join(",")
        )
    }

    #[test]
    fn test_unknown_block_kind_keeps_the_listing() {
        let body = listing(&[
            block_json(
                "316cd412-8533-8087-a989-cf37889137c4",
                "divider",
                r#""has_children": false, "archived": false,"#,
            ),
            block_json(
                "516cd412-8533-8087-a989-cf37889137c6",
                "audio",
                r#""has_children": true, "archived": false,"#,
            ),
        ]);

        let page = parse_blocks_pagination(ok(&body)).unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].block_type(), "divider");
        match &page.results[1] {
            Block::Unsupported(b) => {
                assert_eq!(b.block_type, "audio");
                assert_eq!(b.common.id.as_str(), "516cd41285338087a989cf37889137c6");
                assert!(b.common.has_children);
            }
            other => panic!("Expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_block_without_id_has_no_children() {
        let body = listing(&[r#"{"object": "block", "type": "audio", "has_children": true}"#.to_string()]);

        let page = parse_blocks_pagination(ok(&body)).unwrap();

        assert_eq!(page.results[0].block_type(), "audio");
        assert!(!page.results[0].has_children());
    }

    #[test]
    fn test_archived_blocks_are_dropped() {
        let body = listing(&[
            block_json(
                "316cd412-8533-8087-a989-cf37889137c4",
                "divider",
                r#""has_children": false, "archived": true,"#,
            ),
            block_json(
                "616cd412-8533-8087-a989-cf37889137c7",
                "divider",
                r#""has_children": false, "archived": false,"#,
            ),
        ]);

        let page = parse_blocks_pagination(ok(&body)).unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id().as_str(), "616cd41285338087a989cf37889137c7");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let body = "é".repeat(ERROR_BODY_PREVIEW_LENGTH + 10);
        let cut = preview(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), ERROR_BODY_PREVIEW_LENGTH + 3);
    }
}
