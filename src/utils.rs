//! Utility functions for string processing.

use unicode_normalization::UnicodeNormalization;

/// Normalize a token for indexing: lowercase and strip diacritics.
///
/// This lets accented and plain spellings meet in the same posting list:
/// - "Café" → "cafe"
/// - "naïve" → "naive"
/// - "Ångström" → "angstrom"
///
/// # Algorithm
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks (category Mn = Mark, Nonspacing)
/// 3. Lowercase
pub fn normalize(value: &str) -> String {
    if value.is_ascii() {
        return value.to_ascii_lowercase();
    }
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Replace every occurrence of any character in `banned` with a space.
///
/// Length in characters is preserved, so positions in the escaped text line
/// up with the original.
pub fn blank_out(value: &str, banned: &[char]) -> String {
    value
        .chars()
        .map(|c| if banned.contains(&c) { ' ' } else { c })
        .collect()
}
