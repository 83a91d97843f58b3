//! Zoekt query composition
//!
//! Tool inputs are turned into a single query string. That exact string is
//! both what zoekt receives and what pagination cursors are bound to, so
//! composition must be deterministic.

/// Builds a query from a base expression and filter atoms
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    atoms: Vec<String>,
}

impl QueryBuilder {
    pub fn new(base: &str) -> Self {
        let mut builder = Self::default();
        let base = base.trim();
        if !base.is_empty() {
            builder.atoms.push(base.to_string());
        }
        builder
    }

    /// Append `key:value` when a non-blank value is given
    pub fn filter(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.atoms.push(atom(key, value));
        }
        self
    }

    /// Append a literal atom when `enabled`
    pub fn flag(mut self, atom: &str, enabled: bool) -> Self {
        if enabled {
            self.atoms.push(atom.to_string());
        }
        self
    }

    pub fn build(self) -> String {
        self.atoms.join(" ")
    }
}

/// `key:value`, quoting values that contain whitespace or quotes
pub fn atom(key: &str, value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '"') {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{}:\"{}\"", key, escaped)
    } else {
        format!("{}:{}", key, value)
    }
}

/// Free-text search with optional repo/lang/file filters
pub fn search_query(
    query: &str,
    repo: Option<&str>,
    lang: Option<&str>,
    file: Option<&str>,
    case_sensitive: bool,
) -> String {
    QueryBuilder::new(query)
        .filter("repo", repo)
        .filter("lang", lang)
        .filter("file", file)
        .flag("case:yes", case_sensitive)
        .build()
}

/// Symbol definition search
pub fn symbol_query(symbol: &str, repo: Option<&str>, lang: Option<&str>) -> String {
    QueryBuilder::new(&atom("sym", symbol.trim()))
        .filter("repo", repo)
        .filter("lang", lang)
        .build()
}

/// File-name-only search
pub fn file_name_query(pattern: &str, repo: Option<&str>) -> String {
    QueryBuilder::new(&atom("file", pattern.trim()))
        .flag("type:filename", true)
        .filter("repo", repo)
        .build()
}

/// Repository list filter; empty lists everything
pub fn repo_list_query(filter: Option<&str>) -> String {
    QueryBuilder::default().filter("repo", filter).build()
}

/// Matches exactly one file in exactly one repository
pub fn exact_file_query(repo: &str, path: &str) -> String {
    format!(
        "{} {}",
        atom("repo", &anchored(repo.trim())),
        atom("file", &anchored(path.trim().trim_start_matches("./")))
    )
}

fn anchored(literal: &str) -> String {
    format!("^{}$", regex::escape(literal))
}
