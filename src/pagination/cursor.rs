//! Cursor codec and validation
//!
//! A cursor token is `base64url(json({"q": fingerprint, "o": offset}))`.
//! Nothing is stored server-side: the token carries the whole resume state
//! and is re-checked against the caller's query on every request.
//!
//! Tokens issued by older clients also carry a page-size field (`"s"`).
//! It is accepted and ignored.

use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose},
    Engine as _,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::fingerprint::fingerprint;
use crate::error::ClassifiedError;

/// Tokens beyond this length are rejected before decoding
pub const MAX_TOKEN_CHARS: usize = 1024;

/// URL-safe alphabet; padding is never written but tolerated on input
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    general_purpose::NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded resume position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub fingerprint: String,
    pub offset: u64,
}

#[derive(Debug, Deserialize)]
struct CursorPayload {
    q: String,
    o: u64,
}

/// Encode a resume position for `query`
pub fn encode_cursor(query: &str, offset: u64) -> String {
    let payload = serde_json::json!({
        "q": fingerprint(query),
        "o": offset,
    });
    TOKEN_ENGINE.encode(payload.to_string())
}

/// Decode a token, returning `None` for anything malformed
///
/// Never fails loudly: bad base64, non-JSON, missing fields, and negative or
/// fractional offsets all collapse to `None`.
pub fn decode_cursor(token: &str) -> Option<Cursor> {
    let token = token.trim();
    if token.is_empty() || token.len() > MAX_TOKEN_CHARS {
        return None;
    }

    let bytes = TOKEN_ENGINE.decode(token.as_bytes()).ok()?;
    let payload: CursorPayload = serde_json::from_slice(&bytes).ok()?;
    if payload.q.is_empty() {
        return None;
    }

    Some(Cursor {
        fingerprint: payload.q,
        offset: payload.o,
    })
}

/// Why a supplied cursor was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorRejection {
    #[error("invalid cursor: token is malformed or truncated")]
    Malformed,
    #[error("invalid cursor: it was issued for a different query")]
    QueryMismatch,
}

impl From<CursorRejection> for ClassifiedError {
    fn from(rejection: CursorRejection) -> Self {
        let reason = match rejection {
            CursorRejection::Malformed => "malformed_cursor",
            CursorRejection::QueryMismatch => "cursor_query_mismatch",
        };
        ClassifiedError::query(rejection.to_string())
            .with_hint(
                "Cursors only work with the exact query that produced them. \
                 Repeat the same query and filters, or omit cursor to start from the first page.",
            )
            .with_detail("errorType", "invalid_cursor")
            .with_detail("reason", reason)
    }
}

/// Resolve the starting offset for `query`
///
/// No token means the first page. A token that does not decode, or that was
/// issued for another query, is refused rather than treated as page one.
pub fn validate_cursor(token: Option<&str>, query: &str) -> Result<u64, CursorRejection> {
    let Some(token) = token else {
        return Ok(0);
    };

    let cursor = decode_cursor(token).ok_or(CursorRejection::Malformed)?;
    if cursor.fingerprint != fingerprint(query) {
        debug!(
            expected = %fingerprint(query),
            found = %cursor.fingerprint,
            "cursor fingerprint mismatch"
        );
        return Err(CursorRejection::QueryMismatch);
    }

    Ok(cursor.offset)
}
