//! Integration tests for zoekt-mcp
//!
//! These tests run the real client and tool handlers against an in-process
//! fake zoekt-webserver built with axum.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Url;
use serde_json::{json, Value};

use zoekt_mcp::error::{format_error, ErrorCode};
use zoekt_mcp::mcp::handlers::file::handle_get_file;
use zoekt_mcp::mcp::handlers::health::handle_health;
use zoekt_mcp::mcp::handlers::repos::handle_list_repos;
use zoekt_mcp::mcp::handlers::search::handle_search;
use zoekt_mcp::mcp::handlers::stats::handle_stats;
use zoekt_mcp::mcp::handlers::symbols::handle_symbol_search;
use zoekt_mcp::mcp::types::{GetFileRequest, ListReposRequest, SearchRequest, SymbolSearchRequest};
use zoekt_mcp::pagination::{encode_cursor, paginate};
use zoekt_mcp::zoekt::ZoektClient;

const TOTAL_FILES: usize = 23;
const TOTAL_REPOS: usize = 7;

/// Shared state of the fake backend
#[derive(Clone, Default)]
struct Fake {
    /// (query, MaxDocDisplayCount) of every search request
    searches: Arc<Mutex<Vec<(String, usize)>>>,
}

fn file_json(i: usize) -> Value {
    json!({
        "FileName": format!("src/file_{:02}.go", i),
        "Repository": "github.com/acme/app",
        "Language": "Go",
        "Branches": ["main"],
        "Version": "abc",
        "Score": 100.0 - i as f64,
        "ChunkMatches": [{
            "Content": STANDARD.encode(format!("func handler{}() {{\n", i)),
            "ContentStart": {"ByteOffset": 0, "LineNumber": 10 + i, "Column": 1},
            "Ranges": [],
            "FileName": false,
            "Score": 1.0
        }]
    })
}

fn repo_json(i: usize) -> Value {
    json!({
        "Repository": {
            "Name": format!("github.com/acme/repo{}", i),
            "URL": format!("https://github.com/acme/repo{}", i),
            "Branches": [{"Name": "main", "Version": "deadbeef"}]
        },
        "Stats": {"Documents": 10 * i, "ContentBytes": 1024 * i}
    })
}

fn zoekt_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "Error": message }))).into_response()
}

async fn fake_search(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    let query = body["Q"].as_str().unwrap_or_default().to_string();
    let count = body["Opts"]["MaxDocDisplayCount"].as_u64().unwrap_or(0) as usize;
    fake.searches.lock().unwrap().push((query.clone(), count));

    if query.contains("broken(") {
        return zoekt_error(
            StatusCode::BAD_REQUEST,
            "error parsing regexp: missing closing ): `broken(`",
        );
    }
    if query.contains("bogus:") {
        return zoekt_error(StatusCode::BAD_REQUEST, "unknown field: \"bogus:\"");
    }

    if query.starts_with("repo:^") {
        let files = if query.contains("README") {
            json!([{
                "FileName": "README.md",
                "Repository": "github.com/acme/app",
                "Language": "Markdown",
                "Branches": ["main"],
                "Content": STANDARD.encode("# App\n\nHello.\n")
            }])
        } else {
            Value::Null
        };
        return Json(json!({ "Result": { "Files": files } })).into_response();
    }

    let files: Vec<Value> = (0..TOTAL_FILES.min(count)).map(file_json).collect();
    Json(json!({
        "Result": {
            "FileCount": TOTAL_FILES,
            "MatchCount": TOTAL_FILES,
            "Files": files
        }
    }))
    .into_response()
}

async fn fake_list(Json(body): Json<Value>) -> Response {
    let query = body["Q"].as_str().unwrap_or_default();
    let repos: Vec<Value> = (0..TOTAL_REPOS)
        .map(repo_json)
        .filter(|r| {
            query.is_empty()
                || r["Repository"]["Name"]
                    .as_str()
                    .unwrap_or_default()
                    .contains(query.trim_start_matches("repo:"))
        })
        .collect();
    Json(json!({
        "List": {
            "Repos": repos,
            "Stats": {"Repos": TOTAL_REPOS, "Documents": 280, "Shards": 7, "IndexBytes": 4096, "ContentBytes": 28672},
            "Crashes": 0
        }
    }))
    .into_response()
}

async fn spawn(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

async fn setup() -> (ZoektClient, Fake) {
    let fake = Fake::default();
    let router = Router::new()
        .route("/api/search", post(fake_search))
        .route("/api/list", post(fake_list))
        .with_state(fake.clone());
    let url = spawn(router).await;
    let client = ZoektClient::new(url, Duration::from_secs(5)).unwrap();
    (client, fake)
}

fn next_cursor(output: &str) -> Option<String> {
    let start = output.find("cursor=\"")? + "cursor=\"".len();
    let end = output[start..].find('"')? + start;
    Some(output[start..end].to_string())
}

fn search_req(query: &str, limit: u32, cursor: Option<String>) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        limit: Some(limit),
        cursor,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_search_pages_through_all_results() {
    let (client, fake) = setup().await;

    let mut cursor = None;
    let mut pages = Vec::new();
    loop {
        let output = handle_search(&client, &search_req("handler", 5, cursor))
            .await
            .unwrap();
        cursor = next_cursor(&output);
        pages.push(output);
        if cursor.is_none() {
            break;
        }
    }

    // ceil(23 / 5)
    assert_eq!(pages.len(), 5);
    for (i, page) in pages.iter().enumerate() {
        let first = i * 5 + 1;
        assert!(page.contains(&format!("(results {}-", first)), "page {}: {}", i, page);
    }
    let all = pages.concat();
    for i in 0..TOTAL_FILES {
        assert_eq!(
            all.matches(&format!("`src/file_{:02}.go`", i)).count(),
            1,
            "file {} should appear exactly once",
            i
        );
    }

    let counts: Vec<usize> = fake
        .searches
        .lock()
        .unwrap()
        .iter()
        .map(|(_, count)| *count)
        .collect();
    assert_eq!(counts, vec![6, 11, 16, 21, 26]);
}

#[tokio::test]
async fn test_lookahead_window_through_paginate() {
    let (client, _fake) = setup().await;

    let page = paginate("x", 20, None, |count| client.search_files("x", count, 0))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 20);
    assert!(page.next_cursor.is_some());

    let token = encode_cursor("x", 20);
    let page = paginate("x", 20, Some(&token), |count| client.search_files("x", count, 0))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 3);
    assert!(page.next_cursor.is_none());

    let token = encode_cursor("x", 23);
    let page = paginate("x", 20, Some(&token), |count| client.search_files("x", count, 0))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn test_filters_are_part_of_the_query() {
    let (client, fake) = setup().await;
    let req = SearchRequest {
        query: "handler".into(),
        repo: Some("acme".into()),
        lang: Some("go".into()),
        ..Default::default()
    };
    handle_search(&client, &req).await.unwrap();

    let searches = fake.searches.lock().unwrap();
    assert_eq!(searches[0].0, "handler repo:acme lang:go");
}

#[tokio::test]
async fn test_cursor_from_other_query_is_rejected() {
    let (client, fake) = setup().await;

    let first = handle_search(&client, &search_req("handler", 5, None))
        .await
        .unwrap();
    let cursor = next_cursor(&first).unwrap();

    let err = handle_search(&client, &search_req("other", 5, Some(cursor)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::QueryError);
    assert!(format_error(&err).starts_with("Error [QUERY_ERROR]: invalid cursor"));

    // The rejected call never reached the backend
    assert_eq!(fake.searches.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_garbage_cursor_is_query_error() {
    let (client, _fake) = setup().await;
    let err = handle_search(&client, &search_req("handler", 5, Some("%%%".into())))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::QueryError);
    assert_eq!(err.detail("reason"), Some("malformed_cursor"));
}

#[tokio::test]
async fn test_symbol_search_uses_sym_atom() {
    let (client, fake) = setup().await;
    let req = SymbolSearchRequest {
        symbol: "handleRequest".into(),
        ..Default::default()
    };
    let output = handle_symbol_search(&client, &req).await.unwrap();
    assert!(output.contains("sym:handleRequest"));
    assert_eq!(fake.searches.lock().unwrap()[0].0, "sym:handleRequest");
}

#[tokio::test]
async fn test_regex_error_is_classified() {
    let (client, _fake) = setup().await;
    let err = handle_search(&client, &search_req("broken(", 5, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::QueryError);
    assert_eq!(err.detail("errorType"), Some("regex_syntax"));
    assert!(format_error(&err).contains("Hint:"));
}

#[tokio::test]
async fn test_unknown_field_is_classified() {
    let (client, _fake) = setup().await;
    let err = handle_search(&client, &search_req("bogus:x", 5, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::QueryError);
    assert_eq!(err.detail("field"), Some("bogus:"));
}

#[tokio::test]
async fn test_list_repos_pagination() {
    let (client, _fake) = setup().await;

    let req = ListReposRequest {
        limit: Some(4),
        ..Default::default()
    };
    let first = handle_list_repos(&client, &req).await.unwrap();
    assert!(first.contains("Found 4 repositories"));
    assert!(first.contains("github.com/acme/repo0"));
    let cursor = next_cursor(&first).unwrap();

    let req = ListReposRequest {
        limit: Some(4),
        cursor: Some(cursor),
        ..Default::default()
    };
    let second = handle_list_repos(&client, &req).await.unwrap();
    assert!(second.contains("Found 3 repositories"));
    assert!(second.contains("github.com/acme/repo6"));
    assert!(next_cursor(&second).is_none());
}

#[tokio::test]
async fn test_get_file() {
    let (client, fake) = setup().await;
    let req = GetFileRequest {
        repo: "github.com/acme/app".into(),
        path: "README.md".into(),
    };
    let output = handle_get_file(&client, &req).await.unwrap();
    assert!(output.contains("    1: # App"));
    assert!(output.contains("    3: Hello."));
    assert_eq!(
        fake.searches.lock().unwrap()[0],
        (r"repo:^github\.com/acme/app$ file:^README\.md$".to_string(), 1)
    );
}

#[tokio::test]
async fn test_get_missing_file_is_not_found() {
    let (client, _fake) = setup().await;
    let req = GetFileRequest {
        repo: "github.com/acme/app".into(),
        path: "src/main.ts".into(),
    };
    let err = handle_get_file(&client, &req).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert!(err.message.contains("file not found: src/main.ts"));
    assert_eq!(err.detail("path"), Some("src/main.ts"));
}

#[tokio::test]
async fn test_stats_and_health() {
    let (client, _fake) = setup().await;

    let stats = handle_stats(&client).await.unwrap();
    assert!(stats.contains("**Repositories:** 7"));
    assert!(stats.contains("**Index Size:** 4.00 KB"));

    let health = handle_health(&client).await.unwrap();
    assert!(health.contains("is healthy (7 repositories indexed)"));
}

#[tokio::test]
async fn test_missing_endpoint_is_not_found() {
    let url = spawn(Router::new()).await;
    let client = ZoektClient::new(url, Duration::from_secs(5)).unwrap();
    let err = handle_stats(&client).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{}", addr)).unwrap();
    let client = ZoektClient::new(url, Duration::from_secs(5)).unwrap();
    let err = handle_search(&client, &search_req("handler", 5, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unavailable);
    assert!(err.hint.unwrap().contains("zoekt-webserver"));
}

#[tokio::test]
async fn test_slow_backend_is_timeout() {
    let router = Router::new().route(
        "/api/search",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "Result": { "Files": [] } }))
        }),
    );
    let url = spawn(router).await;
    let client = ZoektClient::new(url, Duration::from_millis(200)).unwrap();

    let err = handle_search(&client, &search_req("handler", 5, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Timeout);
    assert!(format_error(&err).starts_with("Error [TIMEOUT]"));
}

#[tokio::test]
async fn test_stalled_error_body_is_timeout() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 64\r\n\r\n")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
    });

    let url = Url::parse(&format!("http://{}", addr)).unwrap();
    let client = ZoektClient::new(url, Duration::from_millis(300)).unwrap();
    let err = handle_search(&client, &search_req("handler", 5, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Timeout);
}

#[tokio::test]
async fn test_invalid_input_skips_backend() {
    let (client, fake) = setup().await;

    let err = handle_search(&client, &search_req("   ", 5, None))
        .await
        .unwrap_err();
    assert_eq!(err.message, "query must not be empty");

    let err = handle_search(&client, &search_req("handler", 0, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::QueryError);

    assert!(fake.searches.lock().unwrap().is_empty());
}
