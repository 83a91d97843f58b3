//! Zoekt JSON API wire types
//!
//! Field names follow zoekt's Go structs (PascalCase). Byte payloads such as
//! chunk content arrive base64-encoded.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/search`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchRequestBody<'a> {
    pub q: &'a str,
    pub opts: SearchOptions,
}

/// Options forwarded to zoekt's search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchOptions {
    /// Number of ranked files to return
    pub max_doc_display_count: usize,
    pub num_context_lines: u32,
    pub chunk_matches: bool,
    /// Return whole file content
    pub whole: bool,
}

impl SearchOptions {
    pub fn ranked(count: usize, context_lines: u32) -> Self {
        Self {
            max_doc_display_count: count,
            num_context_lines: context_lines,
            chunk_matches: true,
            whole: false,
        }
    }

    pub fn whole_file() -> Self {
        Self {
            max_doc_display_count: 1,
            num_context_lines: 0,
            chunk_matches: false,
            whole: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "Result", default)]
    pub result: SearchResult,
}

/// Search result; zoekt's flattened statistics are ignored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SearchResult {
    pub files: Option<Vec<FileMatch>>,
}

impl SearchResult {
    pub fn into_files(self) -> Vec<FileMatch> {
        self.files.unwrap_or_default()
    }
}

/// One matching file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileMatch {
    pub file_name: String,
    pub repository: String,
    pub language: String,
    pub branches: Option<Vec<String>>,
    pub version: String,
    pub score: f64,
    pub chunk_matches: Option<Vec<ChunkMatch>>,
    pub line_matches: Option<Vec<LineMatch>>,
    /// Base64 file content, present when `Whole` was requested
    pub content: Option<String>,
}

impl FileMatch {
    /// Decoded match snippets, from chunk matches or legacy line matches
    pub fn snippets(&self) -> Vec<Snippet> {
        if let Some(ref chunks) = self.chunk_matches {
            return chunks
                .iter()
                .filter(|c| !c.file_name)
                .map(|c| Snippet {
                    start_line: c.content_start.line_number,
                    lines: split_lines(&decode_text(&c.content)),
                })
                .collect();
        }

        self.line_matches
            .iter()
            .flatten()
            .filter(|l| !l.file_name)
            .map(|l| Snippet {
                start_line: l.line_number,
                lines: split_lines(&decode_text(&l.line)),
            })
            .collect()
    }

    pub fn decoded_content(&self) -> Option<String> {
        self.content.as_deref().map(decode_text)
    }

    /// Number of match ranges in this file
    pub fn match_count(&self) -> usize {
        if let Some(ref chunks) = self.chunk_matches {
            return chunks
                .iter()
                .map(|c| c.ranges.as_ref().map_or(1, |r| r.len().max(1)))
                .sum();
        }
        self.line_matches.as_ref().map_or(0, |l| l.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChunkMatch {
    pub content: String,
    pub content_start: Location,
    pub ranges: Option<Vec<Range>>,
    /// Match is on the file name, not the content
    pub file_name: bool,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Location {
    pub byte_offset: u32,
    pub line_number: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Range {
    pub start: Location,
    pub end: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LineMatch {
    pub line: String,
    pub line_number: u32,
    pub file_name: bool,
}

/// Decoded lines starting at a 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub start_line: u32,
    pub lines: Vec<String>,
}

/// Body of `POST /api/list`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRequestBody<'a> {
    pub q: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(rename = "List", default)]
    pub list: RepoList,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RepoList {
    pub repos: Option<Vec<RepoListEntry>>,
    pub stats: RepoStats,
    pub crashes: u64,
}

impl RepoList {
    pub fn repo_count(&self) -> usize {
        self.repos.as_ref().map_or(0, |r| r.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RepoListEntry {
    pub repository: Repository,
    pub index_metadata: Option<IndexMetadata>,
    pub stats: RepoStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Repository {
    pub name: String,
    #[serde(rename = "URL")]
    pub url: String,
    pub branches: Option<Vec<Branch>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Branch {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IndexMetadata {
    pub index_time: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RepoStats {
    pub repos: u64,
    pub shards: u64,
    pub documents: u64,
    pub index_bytes: u64,
    pub content_bytes: u64,
}

/// Error body zoekt sends with non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(rename = "Error")]
    pub error: String,
}

/// Decode a base64 payload as text, falling back to the raw string
pub fn decode_text(encoded: &str) -> String {
    match STANDARD.decode(encoded.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => encoded.to_string(),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.trim_end_matches('\n')
        .split('\n')
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect()
}
