// src/api/pagination.rs
//! Cursor-following pagination over any listing endpoint.

use crate::error::AppError;

/// One page of results from a paginated listing call.
#[derive(Debug, Clone)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A single page holding everything, with no continuation.
    pub fn complete(results: Vec<T>) -> Self {
        Self {
            results,
            next_cursor: None,
            has_more: false,
        }
    }
}

/// Fetches every page by following the continuation cursor until the
/// service reports exhaustion.
///
/// Results are appended in service order, never re-sorted. There is no
/// retry here: pagination itself is low-risk, and the one call site that
/// does observe flakiness (child-database queries) wraps this loop in a
/// retry policy instead.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch_page(cursor.take()).await?;

        let has_more = page.has_more;
        cursor = page.next_cursor;
        items.extend(page.results);

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn follows_cursors_and_preserves_order() {
        let pages = vec![
            PaginatedResponse {
                results: vec![1, 2],
                next_cursor: Some("a".to_string()),
                has_more: true,
            },
            PaginatedResponse {
                results: vec![3],
                next_cursor: Some("b".to_string()),
                has_more: true,
            },
            PaginatedResponse::complete(vec![4, 5]),
        ];
        let mut call = 0usize;
        let seen_cursors = std::sync::Mutex::new(Vec::new());

        let items = fetch_all_pages(|cursor| {
            seen_cursors.lock().unwrap().push(cursor);
            let page = pages[call].clone();
            call += 1;
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *seen_cursors.lock().unwrap(),
            vec![None, Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[tokio::test]
    async fn stops_when_has_more_is_false() {
        let items: Vec<u8> = fetch_all_pages(|_| async { Ok(PaginatedResponse::complete(vec![])) })
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn errors_propagate_unchanged() {
        let result: Result<Vec<u8>, _> = fetch_all_pages(|_| async {
            Err(AppError::MalformedResponse("broken page".to_string()))
        })
        .await;
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}
