//! Stateless result windowing shared by every paginated tool
//!
//! - `fingerprint`: short digest of the query text
//! - `cursor`: opaque resume tokens and their validation
//! - `window`: fetch sizing, slicing, continuation cursors

mod cursor;
mod fingerprint;
mod window;

pub use cursor::{decode_cursor, encode_cursor, validate_cursor, Cursor, CursorRejection};
pub use fingerprint::{fingerprint, FINGERPRINT_LEN};
pub use window::{paginate, Page, Window};

/// Upper bound on items per page
pub const MAX_LIMIT: usize = 100;
