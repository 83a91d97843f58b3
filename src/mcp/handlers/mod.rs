//! Handler modules for MCP tools
//!
//! Each handler validates its request, calls the backend, and renders text.
//! Failures come back as classified errors for the caller to format.

pub mod file;
pub mod files;
pub mod health;
pub mod repos;
pub mod search;
pub mod stats;
pub mod symbols;

use crate::error::ClassifiedError;
use crate::mcp::constants::MAX_CONTEXT_LINES;
use crate::pagination::MAX_LIMIT;

/// Result of a tool handler
pub type ToolOutput = Result<String, ClassifiedError>;

/// Reject blank required fields
pub(crate) fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, ClassifiedError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClassifiedError::query(format!("{} must not be empty", field))
            .with_detail("field", field));
    }
    Ok(value)
}

/// Apply the default page size and check bounds
pub(crate) fn resolve_limit(limit: Option<u32>, default: usize) -> Result<usize, ClassifiedError> {
    match limit {
        None => Ok(default),
        Some(n) if n >= 1 && n as usize <= MAX_LIMIT => Ok(n as usize),
        Some(n) => Err(ClassifiedError::query(format!(
            "limit must be between 1 and {} (got {})",
            MAX_LIMIT, n
        ))
        .with_detail("field", "limit")),
    }
}

pub(crate) fn resolve_context_lines(lines: Option<u32>, default: u32) -> Result<u32, ClassifiedError> {
    match lines {
        None => Ok(default),
        Some(n) if n <= MAX_CONTEXT_LINES => Ok(n),
        Some(n) => Err(ClassifiedError::query(format!(
            "context_lines must be between 0 and {} (got {})",
            MAX_CONTEXT_LINES, n
        ))
        .with_detail("field", "context_lines")),
    }
}

/// An empty cursor counts as absent; anything else goes to the validator
pub(crate) fn cursor_arg(cursor: &Option<String>) -> Option<&str> {
    cursor.as_deref().filter(|c| !c.is_empty())
}
