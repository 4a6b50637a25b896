//! Text normalization shared by resume and job description inputs.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Lowercases `text`, collapses every run of non-word characters to a single
/// space, and trims both ends. Word characters are Unicode letters, digits and `_`.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_WORD_RUN.replace_all(&lowered, " ").trim().to_string()
}

/// Normalizes an optional value. Absent input normalizes to an empty string.
pub fn normalize_optional(text: Option<&str>) -> String {
    text.map(normalize_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_collapses_punctuation() {
        assert_eq!(
            normalize_text("  Senior Rust/Go Engineer -- (Remote!)  "),
            "senior rust go engineer remote"
        );
    }

    #[test]
    fn test_keeps_digits_and_underscores() {
        assert_eq!(normalize_text("C++ & node_js 18.x"), "c node_js 18 x");
    }

    #[test]
    fn test_newlines_and_tabs_are_non_word() {
        assert_eq!(normalize_text("Python\n\tdeveloper\r\n"), "python developer");
    }

    #[test]
    fn test_unicode_letters_survive() {
        assert_eq!(normalize_text("Café Ünïcode—résumé"), "café ünïcode résumé");
    }

    #[test]
    fn test_punctuation_only_becomes_empty() {
        assert_eq!(normalize_text("!!! --- ???"), "");
    }

    #[test]
    fn test_is_idempotent() {
        let samples = [
            "Looking for a Python developer",
            "  MIXED case, with; punctuation...  ",
            "",
            "émigré—naïve façade",
            "a\u{00a0}b\u{2003}c",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_absent_value_normalizes_to_empty() {
        assert_eq!(normalize_optional(None), "");
        assert_eq!(normalize_optional(Some("Hello, World")), "hello world");
    }
}
