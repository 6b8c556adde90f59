/// Characters rejected by common filesystems and by Telegram clients when saving files.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Max length (in characters) of a sanitized name, extension excluded.
pub const MAX_FILENAME_CHARS: usize = 100;

/// Replaces each forbidden character with `_` and keeps at most [`MAX_FILENAME_CHARS`] characters.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .take(MAX_FILENAME_CHARS)
        .collect()
}
