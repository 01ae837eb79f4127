//! Stored filename generation.

use chrono::Utc;
use rand::Rng;

const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;
const MAX_EXTENSION_LEN: usize = 16;

/// Generate a unique-in-practice name for a stored file.
///
/// The name is `{unix_millis}-{random}{ext}` with `random` in `[0, 1e9)`.
/// Uniqueness is probabilistic; the record store rejects duplicates.
pub fn generate_filename(original_filename: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
    format!("{}-{}{}", millis, suffix, extension_of(original_filename))
}

/// Extension of the client-supplied filename, including the leading dot.
///
/// Returns an empty string when there is no usable extension. Directory parts
/// of the name are ignored and only ASCII alphanumeric extensions are kept.
pub fn extension_of(original_filename: &str) -> String {
    let base = original_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_filename);

    match base.rfind('.') {
        // A leading dot marks a hidden file, not an extension
        Some(0) | None => String::new(),
        Some(idx) => {
            let ext = &base[idx + 1..];
            if ext.is_empty()
                || ext.len() > MAX_EXTENSION_LEN
                || !ext.chars().all(|c| c.is_ascii_alphanumeric())
            {
                String::new()
            } else {
                format!(".{}", ext)
            }
        }
    }
}
