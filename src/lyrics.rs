//! Verse-level windowing over lyric text.

/// Verses are delimited by a blank line inside the stored text.
const VERSE_DELIMITER: &str = "\n\n";

/// Return the requested page of verses from `text`, rejoined with the same
/// blank-line delimiter.
///
/// A song with no blank line is a single verse, and empty text is one empty
/// verse returned for page 1. A `page` past the last verse yields an empty
/// string, which callers treat as a valid, empty result rather than an
/// error. Both `page` and `page_size` must already be clamped to at least 1
/// by the caller, matching the lenient parsing at the HTTP boundary.
pub fn paginate_verses(text: &str, page: usize, page_size: usize) -> String {
    let verses: Vec<&str> = text.split(VERSE_DELIMITER).collect();

    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= verses.len() {
        return String::new();
    }

    let end = start.saturating_add(page_size).min(verses.len());
    verses[start..end].join(VERSE_DELIMITER)
}
