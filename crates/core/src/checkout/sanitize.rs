//! Free-text input sanitization.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a word character, whitespace, `@`, `.` or `-`.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s@.\-]").expect("static pattern compiles"));

/// Trim surrounding whitespace, then drop every disallowed character.
///
/// This is a second line of defence for values echoed back or stored; it
/// does not replace field validation.
///
/// ```
/// use electroshop_core::checkout::sanitize_text;
///
/// assert_eq!(sanitize_text("  Ann <b>O'Neil</b> "), "Ann bONeilb");
/// assert_eq!(sanitize_text("ann@example.com"), "ann@example.com");
/// ```
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    DISALLOWED.replace_all(input.trim(), "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_allowed_characters() {
        assert_eq!(sanitize_text("1 Main St."), "1 Main St.");
        assert_eq!(sanitize_text("credit_card"), "credit_card");
        assert_eq!(sanitize_text("12-29"), "12-29");
        assert_eq!(sanitize_text("José Müller"), "José Müller");
    }

    #[test]
    fn test_strips_markup_and_punctuation() {
        assert_eq!(sanitize_text("<script>x</script>"), "scriptxscript");
        assert_eq!(sanitize_text("12/29"), "1229");
        assert_eq!(sanitize_text("a;b'c\"d"), "abcd");
    }

    #[test]
    fn test_trims_before_filtering() {
        assert_eq!(sanitize_text("   "), "");
        assert_eq!(sanitize_text(" !a "), "a");
        // Whitespace exposed by removed characters is kept.
        assert_eq!(sanitize_text("a !"), "a ");
    }

    #[test]
    fn test_only_disallowed_becomes_empty() {
        assert_eq!(sanitize_text("!!!"), "");
    }
}
