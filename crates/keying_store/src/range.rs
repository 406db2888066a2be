//! Key range helpers.

use std::ops::Bound;

/// Returns the smallest string greater than every string starting with `prefix`.
///
/// Trailing `char::MAX` characters cannot be incremented and are dropped
/// first. Returns `None` when nothing remains, i.e. the range is unbounded.
#[must_use]
pub fn prefix_successor(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        // Surrogates are not chars; the successor of U+D7FF is U+E000.
        let next = match last {
            '\u{d7ff}' => Some('\u{e000}'),
            c => char::from_u32(u32::from(c) + 1),
        };
        if let Some(next) = next {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

/// Returns the key range covering exactly the keys that start with `prefix`.
///
/// `str` orders by code point, so the range is closed with the exclusive
/// [`prefix_successor`] rather than a sentinel character.
#[must_use]
pub fn prefix_range(prefix: &str) -> (Bound<String>, Bound<String>) {
    let end = match prefix_successor(prefix) {
        Some(end) => Bound::Excluded(end),
        None => Bound::Unbounded,
    };
    (Bound::Included(prefix.to_string()), end)
}
