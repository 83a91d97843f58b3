//! Configuration constants for MCP tools

/// Default page size for content search
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Default page size for symbol search
pub const DEFAULT_SYMBOL_LIMIT: usize = 10;

/// Default page size for file name search
pub const DEFAULT_FILE_LIMIT: usize = 20;

/// Default page size for repository listings
pub const DEFAULT_REPO_LIMIT: usize = 50;

/// Default number of context lines around each match
pub const DEFAULT_CONTEXT_LINES: u32 = 3;

/// Largest accepted `context_lines`
pub const MAX_CONTEXT_LINES: u32 = 10;

/// Longer lines are cut and marked with an ellipsis
pub const MAX_LINE_CHARS: usize = 300;

/// Maximum number of lines shown by get_file
pub const MAX_FILE_LINES: usize = 2000;
