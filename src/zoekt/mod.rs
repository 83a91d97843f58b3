//! Zoekt backend client
//!
//! Thin async wrapper over zoekt-webserver's JSON API. One HTTP request per
//! call, no retries. Failures come back as [`Fault`] values that keep
//! timeouts, connection failures, and HTTP statuses apart for the
//! classifier.

pub mod query;
pub mod types;

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::Fault;
use types::{
    ErrorBody, FileMatch, ListRequestBody, ListResponse, RepoList, RepoListEntry,
    SearchOptions, SearchRequestBody, SearchResponse, SearchResult,
};

const SEARCH_PATH: &str = "api/search";
const LIST_PATH: &str = "api/list";

/// Client for a zoekt-webserver instance
#[derive(Debug, Clone)]
pub struct ZoektClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ZoektClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("zoekt-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Raw search call
    pub async fn search(&self, query: &str, opts: SearchOptions) -> Result<SearchResult, Fault> {
        debug!(
            query,
            count = opts.max_doc_display_count,
            whole = opts.whole,
            "zoekt search"
        );
        let body = SearchRequestBody { q: query, opts };
        let response: SearchResponse = self.post(SEARCH_PATH, &body).await?;
        Ok(response.result)
    }

    /// Top `count` ranked files for `query`
    pub async fn search_files(
        &self,
        query: &str,
        count: usize,
        context_lines: u32,
    ) -> Result<Vec<FileMatch>, Fault> {
        let result = self
            .search(query, SearchOptions::ranked(count, context_lines))
            .await?;
        let mut files = result.into_files();
        files.truncate(count);
        Ok(files)
    }

    /// Single file with full content, if it exists
    pub async fn fetch_file(&self, query: &str) -> Result<Option<FileMatch>, Fault> {
        let result = self.search(query, SearchOptions::whole_file()).await?;
        Ok(result.into_files().into_iter().next())
    }

    /// Raw repository listing
    pub async fn list(&self, query: &str) -> Result<RepoList, Fault> {
        debug!(query, "zoekt list");
        let body = ListRequestBody { q: query };
        let response: ListResponse = self.post(LIST_PATH, &body).await?;
        Ok(response.list)
    }

    /// First `count` repositories matching `query`, in backend order
    pub async fn list_repos(&self, query: &str, count: usize) -> Result<Vec<RepoListEntry>, Fault> {
        let list = self.list(query).await?;
        let mut repos = list.repos.unwrap_or_default();
        repos.truncate(count);
        Ok(repos)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, Fault> {
        let response = self.http.post(self.endpoint(path)).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            // A deadline or dropped connection while reading the body is a
            // transport fault, not an HTTP one.
            let text = response.text().await?;
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => body.error,
                Err(_) if !text.trim().is_empty() => text.trim().to_string(),
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            debug!(status = status.as_u16(), %message, "zoekt returned an error status");
            return Err(Fault::Http {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Fault::Message(format!("invalid backend response: {}", e)))
    }
}
