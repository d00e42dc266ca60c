//! Symbols the slugifier spells out as words.

/// Sorted by code point for binary search.
const SYMBOLS: &[(char, &str)] = &[
    ('$', "dollar"),
    ('%', "percent"),
    ('&', "and"),
    ('+', "plus"),
    ('<', "less"),
    ('>', "greater"),
    ('@', "at"),
    ('|', "or"),
    ('£', "pound"),
    ('¥', "yen"),
    ('©', "c"),
    ('®', "r"),
    ('₫', "dong"),
    ('€', "euro"),
    ('₹', "rupee"),
    ('™', "tm"),
    ('∆', "delta"),
    ('∞', "infinity"),
    ('♥', "love"),
];

/// Returns the word `ch` is spelled as, if it is a known symbol.
#[must_use]
pub fn word(ch: char) -> Option<&'static str> {
    SYMBOLS
        .binary_search_by(|(key, _)| key.cmp(&ch))
        .ok()
        .map(|idx| SYMBOLS[idx].1)
}
