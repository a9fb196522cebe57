//! Text cleanup shared by the extractor and the summarization preprocessor.
//!
//! [`normalize`] collapses whitespace, strips a fixed list of boilerplate
//! noise patterns (call-to-actions, cookie/legal text, copyright lines, bare
//! URLs, email addresses), and collapses runs of repeated punctuation. The
//! order matters: whitespace collapse first makes the noise patterns (which
//! assume single-spaced text) reliable, and punctuation collapse last avoids
//! interfering with pattern matching. The function is pure and idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Noise patterns removed from article text, in application order.
///
/// The `[^.]*` tails consume a call-to-action up to the end of its sentence,
/// mirroring boilerplate that sites append after the article body.
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\badvertisement\b\s*",
        r"(?i)Click here[^.]*",
        r"(?i)Read more[^.]*",
        r"(?i)Continue reading[^.]*",
        r"(?i)Sign up[^.]*",
        r"(?i)Subscribe[^.]*",
        r"(?i)Share this[^.]*",
        r"(?i)Follow us[^.]*",
        r"(?i)Cookie Policy[^.]*",
        r"(?i)Privacy Policy[^.]*",
        r"(?i)Terms of Service[^.]*",
        r"©\s*\d{4}[^.]*",
        r"(?i)All rights reserved[^.]*",
        r"https?://\S+",
        r"\S+@\S+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static ELLIPSIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{3,}").unwrap());
static REPEAT_BANG: Lazy<Regex> = Lazy::new(|| Regex::new(r"!{2,}").unwrap());
static REPEAT_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?{2,}").unwrap());

/// Collapse whitespace, strip noise patterns, and collapse repeated
/// punctuation. Applying the result to itself is a no-op.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = WHITESPACE.replace_all(text, " ").into_owned();

    for pattern in NOISE_PATTERNS.iter() {
        out = pattern.replace_all(&out, "").into_owned();
    }

    out = ELLIPSIS.replace_all(&out, "...").into_owned();
    out = REPEAT_BANG.replace_all(&out, "!").into_owned();
    out = REPEAT_QUESTION.replace_all(&out, "?").into_owned();

    WHITESPACE.replace_all(&out, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("a\n\n  b\t\tc"), "a b c");
    }

    #[test]
    fn test_advertisement_markers_removed() {
        assert_eq!(
            normalize("Advertisement Some real news. ADVERTISEMENT More news."),
            "Some real news. More news."
        );
    }

    #[test]
    fn test_call_to_action_removed_up_to_sentence_end() {
        assert_eq!(
            normalize("The vote passed. Subscribe to our newsletter today. It was close."),
            "The vote passed. . It was close."
        );
    }

    #[test]
    fn test_urls_and_emails_removed() {
        assert_eq!(
            normalize("See https://example.com/x for details, or write tips@example.com now."),
            "See for details, or write now."
        );
    }

    #[test]
    fn test_copyright_lines_removed() {
        let cleaned = normalize("Story ends here. © 2026 Example Media. All rights reserved entirely.");
        assert!(!cleaned.contains("2026"));
        assert!(!cleaned.contains("rights reserved"));
    }

    #[test]
    fn test_repeated_punctuation_collapsed() {
        assert_eq!(normalize("Wait..... what?? Really!!!"), "Wait... what? Really!");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Advertisement   Read more here.  The   story....  continues!!  now??",
            "plain text already normalized.",
            "  spaced\tout\ninput with https://a.example/b and a@b.c ",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
