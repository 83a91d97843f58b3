//! Window planning for paginated backend calls
//!
//! Each page asks the backend for the first `offset + limit + 1` ranked
//! items. The extra lookahead item only signals that another page exists and
//! is never returned.

use std::future::Future;

use tracing::debug;

use super::cursor::{encode_cursor, validate_cursor};
use super::fingerprint::fingerprint;
use super::MAX_LIMIT;
use crate::error::{classify, ClassifiedError, Fault};

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Present iff more items exist past this page
    pub next_cursor: Option<String>,
    /// Position of the first item in the full result set
    pub offset: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// A validated request window, ready to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    query: String,
    offset: u64,
    limit: u64,
    fetch_count: usize,
}

impl Window {
    /// Validate the cursor against `query` and size the backend request
    pub fn open(query: &str, limit: usize, cursor: Option<&str>) -> Result<Self, ClassifiedError> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(ClassifiedError::query(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        let limit = limit as u64;
        let offset = validate_cursor(cursor, query)?;

        let fetch_count = offset
            .checked_add(limit)
            .and_then(|end| end.checked_add(1))
            .and_then(|count| usize::try_from(count).ok())
            .ok_or_else(|| {
                ClassifiedError::query("cursor offset out of range")
                    .with_detail("errorType", "invalid_cursor")
                    .with_detail("reason", "offset_overflow")
            })?;

        debug!(
            fingerprint = %fingerprint(query),
            offset,
            limit,
            fetch_count,
            "planned result window"
        );

        Ok(Self {
            query: query.to_string(),
            offset,
            limit,
            fetch_count,
        })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of ranked items to request from the start of the result set
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    /// Cut the backend's items down to `[offset, offset + limit)`
    pub fn slice<T>(self, fetched: Vec<T>) -> Page<T> {
        let end = self.offset + self.limit;
        let has_more = fetched.len() as u64 > end;

        // offset < fetch_count, which fits in usize
        let items: Vec<T> = fetched
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect();

        let next_cursor = has_more.then(|| encode_cursor(&self.query, end));

        Page {
            items,
            next_cursor,
            offset: self.offset,
        }
    }
}

/// Run one paginated backend call
///
/// `fetch` receives the number of items to retrieve and is invoked at most
/// once. Cursor problems and backend faults both come back classified.
pub async fn paginate<T, F, Fut>(
    query: &str,
    limit: usize,
    cursor: Option<&str>,
    fetch: F,
) -> Result<Page<T>, ClassifiedError>
where
    F: FnOnce(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, Fault>>,
{
    let window = Window::open(query, limit, cursor)?;
    let fetched = fetch(window.fetch_count())
        .await
        .map_err(|fault| classify(&fault))?;
    Ok(window.slice(fetched))
}
