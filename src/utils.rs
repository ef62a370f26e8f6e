//! Common utility functions shared across the codebase.

/// Formats a count with the singular or plural noun.
///
/// # Examples
///
/// ```
/// use i18n_keys::utils::pluralize;
///
/// assert_eq!(pluralize(1, "file", "files"), "1 file");
/// assert_eq!(pluralize(0, "file", "files"), "0 files");
/// assert_eq!(pluralize(3, "key", "keys"), "3 keys");
/// ```
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}
