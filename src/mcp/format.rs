//! Shared formatting utilities for MCP tool outputs

use crate::mcp::constants::{MAX_FILE_LINES, MAX_LINE_CHARS};
use crate::pagination::Page;
use crate::zoekt::types::{FileMatch, RepoListEntry, RepoStats};

/// Header line for a page, or an empty-result line
pub fn format_page_header<T>(page: &Page<T>, noun: &str, query: &str) -> String {
    if page.is_empty() {
        if page.offset > 0 {
            return format!("No more {} for `{}`.\n", noun, query);
        }
        return format!("No {} found for `{}`.\n", noun, query);
    }

    let first = page.offset + 1;
    let last = page.offset + page.items.len() as u64;
    format!(
        "Found {} {} for `{}` (results {}-{}):\n\n",
        page.items.len(),
        noun,
        query,
        first,
        last
    )
}

/// Trailing continuation line, empty on the last page
pub fn format_next_page<T>(page: &Page<T>) -> String {
    match page.next_cursor {
        Some(ref cursor) => format!(
            "\nMore results available. Pass cursor=\"{}\" to fetch the next page.\n",
            cursor
        ),
        None => String::new(),
    }
}

/// File header plus line-numbered match snippets
pub fn format_file_match(file: &FileMatch) -> String {
    let mut output = format!("### {}: `{}`", file.repository, file.file_name);
    if !file.language.is_empty() {
        output.push_str(&format!(" ({})", file.language));
    }
    match file.match_count() {
        0 => {}
        1 => output.push_str(" [1 match]"),
        n => output.push_str(&format!(" [{} matches]", n)),
    }
    output.push('\n');

    let snippets = file.snippets();
    if snippets.is_empty() {
        return output;
    }

    output.push_str("```\n");
    for (i, snippet) in snippets.iter().enumerate() {
        if i > 0 {
            output.push_str("...\n");
        }
        for (offset, line) in snippet.lines.iter().enumerate() {
            output.push_str(&format!(
                "{:>5}: {}\n",
                snippet.start_line as usize + offset,
                truncate_line(line)
            ));
        }
    }
    output.push_str("```\n");
    output
}

/// Page of content matches
pub fn format_match_page(page: &Page<FileMatch>, noun: &str, query: &str) -> String {
    let mut output = format_page_header(page, noun, query);
    for file in &page.items {
        output.push_str(&format_file_match(file));
        output.push('\n');
    }
    output.push_str(&format_next_page(page));
    output
}

/// Page of file names only
pub fn format_file_name_page(page: &Page<FileMatch>, query: &str) -> String {
    let mut output = format_page_header(page, "files", query);
    for file in &page.items {
        output.push_str(&format!("- {}: `{}`", file.repository, file.file_name));
        if !file.language.is_empty() {
            output.push_str(&format!(" ({})", file.language));
        }
        output.push('\n');
    }
    output.push_str(&format_next_page(page));
    output
}

/// Page of repositories
pub fn format_repo_page(page: &Page<RepoListEntry>, query: &str) -> String {
    let label = if query.is_empty() { "*" } else { query };
    let mut output = format_page_header(page, "repositories", label);
    for entry in &page.items {
        output.push_str(&format_repo(entry));
    }
    output.push_str(&format_next_page(page));
    output
}

/// Single repository list item
pub fn format_repo(entry: &RepoListEntry) -> String {
    let repo = &entry.repository;
    let mut output = format!(
        "- **{}** ({} files, {})",
        repo.name,
        entry.stats.documents,
        format_bytes(entry.stats.content_bytes)
    );
    if !repo.url.is_empty() {
        output.push_str(&format!(" - {}", repo.url));
    }
    output.push('\n');

    let branches: Vec<String> = repo
        .branches
        .iter()
        .flatten()
        .map(|b| {
            if b.version.is_empty() {
                b.name.clone()
            } else {
                format!("{}@{}", b.name, short_version(&b.version))
            }
        })
        .collect();
    if !branches.is_empty() {
        output.push_str(&format!("  Branches: {}\n", branches.join(", ")));
    }
    if let Some(ref meta) = entry.index_metadata {
        if !meta.index_time.is_empty() {
            output.push_str(&format!("  Indexed: {}\n", meta.index_time));
        }
    }
    output
}

/// Whole file with line numbers
pub fn format_file_content(file: &FileMatch, content: &str) -> String {
    let mut output = format!("## {}: `{}`\n\n", file.repository, file.file_name);
    if !file.language.is_empty() {
        output.push_str(&format!("**Language:** {}\n", file.language));
    }
    if let Some(branch) = file.branches.as_ref().and_then(|b| b.first()) {
        output.push_str(&format!("**Branch:** {}\n", branch));
    }

    let lines: Vec<&str> = content.lines().collect();
    output.push_str(&format!("**Lines:** {}\n\n```\n", lines.len()));
    for (i, line) in lines.iter().take(MAX_FILE_LINES).enumerate() {
        output.push_str(&format!("{:>5}: {}\n", i + 1, truncate_line(line)));
    }
    output.push_str("```\n");

    if lines.len() > MAX_FILE_LINES {
        output.push_str(&format!(
            "\n... truncated ({} more lines)\n",
            lines.len() - MAX_FILE_LINES
        ));
    }
    output
}

/// Index-wide statistics
pub fn format_stats(stats: &RepoStats, repo_count: usize) -> String {
    let mut output = String::from("## Zoekt Index Status\n\n");
    output.push_str(&format!("**Repositories:** {}\n", repo_count));
    output.push_str(&format!("**Documents:** {}\n", stats.documents));
    output.push_str(&format!("**Shards:** {}\n", stats.shards));
    output.push_str(&format!("**Index Size:** {}\n", format_bytes(stats.index_bytes)));
    output.push_str(&format!(
        "**Content Size:** {}\n",
        format_bytes(stats.content_bytes)
    ));
    output
}

/// Cut overlong lines on a char boundary
pub fn truncate_line(line: &str) -> String {
    match line.char_indices().nth(MAX_LINE_CHARS) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None => line.to_string(),
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b >= GB {
        format!("{:.2} GB", b / GB)
    } else if b >= MB {
        format!("{:.2} MB", b / MB)
    } else if b >= KB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn short_version(version: &str) -> &str {
    match version.char_indices().nth(12) {
        Some((idx, _)) => &version[..idx],
        None => version,
    }
}
