//! CLI command implementations
//!
//! Handles command-line operations against the configured backend:
//! - search: Content search, one page at a time
//! - repos: List indexed repositories
//! - stats: Show index statistics
//! - health: Check backend reachability

mod commands;

pub use commands::*;
