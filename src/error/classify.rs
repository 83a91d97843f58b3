//! Rule-based fault classification
//!
//! Zoekt only reports failures as free text, so classification is an ordered
//! table of `(predicate, outcome)` rules. The first matching rule wins; new
//! signatures go into the table, not into nested conditionals.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{ClassifiedError, ErrorCode, Fault};

const TIMEOUT_HINT: &str = "The search took too long. Narrow the query, for example add a \
    repo: filter or use a more specific pattern.";

const UNAVAILABLE_HINT: &str = "Make sure zoekt-webserver is running and reachable \
    (set ZOEKT_URL if it is not listening on http://localhost:6070).";

const REGEX_HINT: &str = "Patterns are RE2 regular expressions. Balance brackets and \
    parentheses, or escape special characters such as ( [ { . * + ? with a backslash.";

const FIELD_HINT: &str = "Recognized filters: repo:, file:, lang:, sym:, case:, branch:, \
    content:, type:, archived:, fork:. Prefix a filter with - to negate it.";

const NOT_FOUND_HINT: &str = "Check the spelling of the repository name and file path. \
    Use list_repos to see which repositories are indexed.";

static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:unknown|invalid|unrecognized)\s+(?:field|operator|atom)\s*:?\s*["'`]?([\w.-]+:?)"#)
        .expect("valid regex")
});

/// One entry of the classification table
struct Rule {
    name: &'static str,
    code: ErrorCode,
    hint: Option<&'static str>,
    matches: fn(&Fault, &str) -> bool,
    enrich: fn(ClassifiedError, &str) -> ClassifiedError,
}

/// Evaluated top to bottom; order resolves overlapping substrings.
static RULES: &[Rule] = &[
    Rule {
        name: "timeout",
        code: ErrorCode::Timeout,
        hint: Some(TIMEOUT_HINT),
        matches: is_timeout,
        enrich: keep,
    },
    Rule {
        name: "unavailable",
        code: ErrorCode::Unavailable,
        hint: Some(UNAVAILABLE_HINT),
        matches: is_unavailable,
        enrich: keep,
    },
    Rule {
        name: "regex_syntax",
        code: ErrorCode::QueryError,
        hint: Some(REGEX_HINT),
        matches: is_regex_syntax,
        enrich: regex_details,
    },
    Rule {
        name: "unknown_field",
        code: ErrorCode::QueryError,
        hint: Some(FIELD_HINT),
        matches: is_unknown_field,
        enrich: field_details,
    },
    Rule {
        name: "not_found",
        code: ErrorCode::NotFound,
        hint: Some(NOT_FOUND_HINT),
        matches: is_not_found,
        enrich: keep,
    },
];

/// Map a raw fault onto the error taxonomy
///
/// Total: unmatched faults become `QUERY_ERROR` with `errorType = unknown`.
pub fn classify(fault: &Fault) -> ClassifiedError {
    let message = fault.to_string();
    let lower = message.to_lowercase();

    for rule in RULES {
        if (rule.matches)(fault, &lower) {
            debug!(rule = rule.name, code = %rule.code, "classified backend fault");
            let mut err = ClassifiedError::new(rule.code, message.clone());
            if let Some(hint) = rule.hint {
                err = err.with_hint(hint);
            }
            return (rule.enrich)(err, &message);
        }
    }

    debug!(rule = "fallback", code = %ErrorCode::QueryError, "unclassified backend fault");
    ClassifiedError::new(ErrorCode::QueryError, message).with_detail("errorType", "unknown")
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

fn is_timeout(fault: &Fault, text: &str) -> bool {
    matches!(fault, Fault::Timeout(_))
        || contains_any(
            text,
            &[
                "aborterror",
                "aborted",
                "timed out",
                "timeout",
                "deadline exceeded",
                "etimedout",
            ],
        )
}

fn is_unavailable(fault: &Fault, text: &str) -> bool {
    matches!(fault, Fault::Transport(_))
        || matches!(fault, Fault::Http { status: 502 | 503, .. })
        || contains_any(
            text,
            &[
                "econnrefused",
                "connection refused",
                "econnreset",
                "enotfound",
                "ehostunreach",
                "enetunreach",
                "network is unreachable",
                "fetch failed",
                "dns error",
            ],
        )
}

fn is_regex_syntax(_fault: &Fault, text: &str) -> bool {
    contains_any(
        text,
        &[
            "error parsing regexp",
            "regexp:",
            "missing closing",
            "missing ]",
            "missing )",
            "unterminated",
            "unbalanced",
            "invalid character class",
            "parse error",
        ],
    )
}

fn is_unknown_field(_fault: &Fault, text: &str) -> bool {
    contains_any(
        text,
        &[
            "unknown field",
            "unknown operator",
            "invalid operator",
            "unrecognized field",
            "unknown atom",
        ],
    )
}

fn is_not_found(fault: &Fault, text: &str) -> bool {
    matches!(fault, Fault::Http { status: 404, .. }) || contains_any(text, &["not found", "http 404"])
}

fn keep(err: ClassifiedError, _message: &str) -> ClassifiedError {
    err
}

fn regex_details(err: ClassifiedError, _message: &str) -> ClassifiedError {
    err.with_detail("errorType", "regex_syntax")
}

fn field_details(err: ClassifiedError, message: &str) -> ClassifiedError {
    let err = err.with_detail("errorType", "unknown_field");
    match extract_field(message) {
        Some(field) => err.with_detail("field", field),
        None => err,
    }
}

fn extract_field(message: &str) -> Option<String> {
    FIELD_PATTERN
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
