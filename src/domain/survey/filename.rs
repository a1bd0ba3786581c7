//! Response file naming.

use crate::domain::foundation::{RespondentId, Timestamp};

/// Extension of persisted response bundles.
pub const BUNDLE_EXTENSION: &str = "csv";

/// Used when a profession sanitizes down to nothing.
const EMPTY_PROFESSION_PLACEHOLDER: &str = "unknown";

/// Makes a free-text profession safe to embed in a file name.
///
/// Whitespace becomes `_`; anything outside `[A-Za-z0-9_-]` also becomes `_`,
/// so path separators, dots and control characters never reach the filesystem.
pub fn sanitize_profession(profession: &str) -> String {
    let sanitized: String = profession
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        EMPTY_PROFESSION_PLACEHOLDER.to_string()
    } else {
        sanitized
    }
}

/// Builds `{profession}_{respondent}_{YYYY-MM-DD_HH-MM-SS}.csv`.
pub fn bundle_file_name(profession: &str, respondent_id: &RespondentId, at: &Timestamp) -> String {
    format!(
        "{}_{}_{}.{}",
        sanitize_profession(profession),
        respondent_id,
        at.to_file_stamp(),
        BUNDLE_EXTENSION
    )
}
