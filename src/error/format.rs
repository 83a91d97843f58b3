//! User-facing rendering of classified errors

use super::ClassifiedError;

/// Render an error as a text block
///
/// Shape is the same for every code:
///
/// ```text
/// Error [CODE]: message
///
/// Hint: hint text
/// ```
///
/// The hint section is omitted when there is no hint.
pub fn format_error(err: &ClassifiedError) -> String {
    let mut output = format!("Error [{}]: {}", err.code.as_str(), err.message);
    if let Some(ref hint) = err.hint {
        output.push_str(&format!("\n\nHint: {}", hint));
    }
    output
}
