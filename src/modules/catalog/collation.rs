//! Title collation that approximates a locale-aware comparison without a
//! full collator: base letters first, then accents, then case.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Per-level sort weights of a string after canonical decomposition.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    /// Lowercased base letters with combining marks stripped.
    base: Vec<char>,
    /// Combining marks attached to each base letter.
    accents: Vec<Vec<char>>,
    /// Uppercase flags per base letter; lowercase sorts first.
    uppercase: Vec<bool>,
}

impl CollationKey {
    fn new(text: &str) -> Self {
        let mut key = Self::default();
        for c in text.nfd() {
            if is_combining_mark(c) {
                if let Some(marks) = key.accents.last_mut() {
                    marks.push(c);
                }
                continue;
            }
            for lower in c.to_lowercase() {
                key.base.push(lower);
                key.accents.push(Vec::new());
                key.uppercase.push(c.is_uppercase());
            }
        }
        key
    }
}

/// Compare two titles: `ё` sorts with `е`, `é` with `e`, and case only
/// breaks ties. Identical keys fall back to the raw text.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    CollationKey::new(a)
        .cmp(&CollationKey::new(b))
        .then_with(|| a.cmp(b))
}
