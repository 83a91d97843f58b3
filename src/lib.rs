//! zoekt-mcp: MCP server for Zoekt code search
//!
//! Exposes a zoekt-webserver instance as MCP tools. Backend calls are mostly
//! pass-through; the shared machinery is:
//!
//! - Stateless pagination: opaque cursors carry `(query fingerprint, offset)`
//!   and are re-validated against the caller's query on every page
//! - Window planning: fetch `offset + limit + 1` ranked items, slice, and
//!   emit a continuation cursor only when the lookahead item exists
//! - Error classification: free-text backend failures mapped onto
//!   `UNAVAILABLE`, `QUERY_ERROR`, `TIMEOUT`, `NOT_FOUND` with hints
//!
//! ## MCP Tools
//!
//! - `search` - Content search with filters
//! - `search_symbols` - Symbol definitions
//! - `search_files` - File names
//! - `list_repos` - Indexed repositories
//! - `get_file` - Whole file content
//! - `get_stats` - Index statistics
//! - `health_check` - Backend reachability

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod pagination;
pub mod zoekt;
