//! Request types for MCP tools

use rmcp::schemars;
use serde::Deserialize;

/// Request for content search
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(
        description = "Zoekt query. Supports regular expressions and filters, e.g. 'func main', 'foo.*bar lang:go'"
    )]
    pub query: String,
    #[schemars(description = "Only search repositories whose name matches this pattern")]
    pub repo: Option<String>,
    #[schemars(description = "Only search files in this language (e.g. 'go', 'rust', 'typescript')")]
    pub lang: Option<String>,
    #[schemars(description = "Only search files whose path matches this pattern")]
    pub file: Option<String>,
    #[schemars(description = "Match case exactly (default: false)")]
    pub case_sensitive: Option<bool>,
    #[schemars(description = "Lines of context around each match, 0-10 (default: 3)")]
    pub context_lines: Option<u32>,
    #[schemars(description = "Files per page, 1-100 (default: 10)")]
    pub limit: Option<u32>,
    #[schemars(description = "Opaque cursor from a previous page of the same query")]
    pub cursor: Option<String>,
}

/// Request for symbol definition search
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SymbolSearchRequest {
    #[schemars(description = "Symbol name or pattern (function, type, method, ...)")]
    pub symbol: String,
    #[schemars(description = "Only search repositories whose name matches this pattern")]
    pub repo: Option<String>,
    #[schemars(description = "Only search files in this language")]
    pub lang: Option<String>,
    #[schemars(description = "Files per page, 1-100 (default: 10)")]
    pub limit: Option<u32>,
    #[schemars(description = "Opaque cursor from a previous page of the same query")]
    pub cursor: Option<String>,
}

/// Request for file name search
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FileSearchRequest {
    #[schemars(description = "File name or path pattern (regular expression), e.g. 'Cargo\\.toml$'")]
    pub pattern: String,
    #[schemars(description = "Only search repositories whose name matches this pattern")]
    pub repo: Option<String>,
    #[schemars(description = "Files per page, 1-100 (default: 20)")]
    pub limit: Option<u32>,
    #[schemars(description = "Opaque cursor from a previous page of the same query")]
    pub cursor: Option<String>,
}

/// Request for repository listing
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListReposRequest {
    #[schemars(description = "Only list repositories whose name matches this pattern")]
    pub filter: Option<String>,
    #[schemars(description = "Repositories per page, 1-100 (default: 50)")]
    pub limit: Option<u32>,
    #[schemars(description = "Opaque cursor from a previous page of the same listing")]
    pub cursor: Option<String>,
}

/// Request for fetching a whole file
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetFileRequest {
    #[schemars(description = "Exact repository name as shown by list_repos (e.g. 'github.com/acme/app')")]
    pub repo: String,
    #[schemars(description = "File path relative to the repository root (e.g. 'src/main.rs')")]
    pub path: String,
}
