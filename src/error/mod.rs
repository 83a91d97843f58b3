//! Error taxonomy for tool calls
//!
//! Every failure that reaches a tool handler is reduced to a
//! [`ClassifiedError`] with one of four stable codes. Raw failures enter as a
//! [`Fault`], are mapped by [`classify`] and rendered by [`format_error`].

mod classify;
mod format;

use std::collections::BTreeMap;
use std::error::Error as _;
use std::fmt;

use thiserror::Error;

pub use classify::classify;
pub use format::format_error;

/// Closed set of error kinds surfaced to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Backend unreachable or down
    Unavailable,
    /// Malformed query, bad cursor, or anything unclassifiable
    QueryError,
    /// Backend exceeded its deadline
    Timeout,
    /// Referenced repository or file does not exist
    NotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unavailable => "UNAVAILABLE",
            ErrorCode::QueryError => "QUERY_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure mapped onto the four-kind taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct ClassifiedError {
    pub code: ErrorCode,
    pub message: String,
    pub hint: Option<String>,
    pub details: BTreeMap<String, String>,
}

impl ClassifiedError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
            details: BTreeMap::new(),
        }
    }

    /// Shorthand for input problems detected before the backend is called
    pub fn query(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::QueryError, message)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

/// Raw failure raised by the backend collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// Request aborted because the deadline passed
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Connection could not be established
    #[error("fetch failed: {0}")]
    Transport(String),
    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// Anything else, reduced to its text
    #[error("{0}")]
    Message(String),
}

impl Fault {
    pub fn message(text: impl Into<String>) -> Self {
        Fault::Message(text.into())
    }
}

impl From<String> for Fault {
    fn from(text: String) -> Self {
        Fault::Message(text)
    }
}

impl From<&str> for Fault {
    fn from(text: &str) -> Self {
        Fault::Message(text.to_string())
    }
}

impl From<reqwest::Error> for Fault {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display hides the root cause; walk the chain so the
        // classifier sees "connection refused" and friends.
        let mut text = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }

        if err.is_timeout() {
            Fault::Timeout(text)
        } else if err.is_connect() {
            Fault::Transport(text)
        } else if let Some(status) = err.status() {
            Fault::Http {
                status: status.as_u16(),
                message: text,
            }
        } else if err.is_decode() {
            Fault::Message(format!("invalid backend response: {}", text))
        } else {
            Fault::Message(text)
        }
    }
}
