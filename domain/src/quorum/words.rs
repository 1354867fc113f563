//! Reply classification against approve/deny word lists.
//!
//! A reply counts only when its whole body is a single recognized word,
//! optionally followed by `.`/`!` and trailing whitespace:
//!
//! | Body | Verdict |
//! |------|---------|
//! | `Approved` | Approve |
//! | `approved!!` | Approve |
//! | `APPROVED.\n` | Approve |
//! | `I have approved this` | Neither |

use crate::core::error::MatchError;
use crate::quorum::vote::Verdict;
use regex::Regex;

/// Built-in words that approve the workflow.
pub const DEFAULT_APPROVE_WORDS: &[&str] = &["approved", "yes", "👍", "✅", "🚀", "🚢"];

/// Built-in words that deny the workflow.
pub const DEFAULT_DENY_WORDS: &[&str] = &["denied", "no", "👎", "❌", "𝕏", "🚫"];

/// Parse a comma-separated list of additional words.
///
/// Each word is trimmed; case is preserved. An all-blank input yields no
/// words, but a blank entry inside a non-blank list is kept so that
/// [`WordMatcher::new`] can reject it.
pub fn parse_additional_words(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|word| word.trim().to_string()).collect()
}

#[derive(Debug, Clone)]
struct WordPattern {
    word: String,
    regex: Regex,
}

impl WordPattern {
    fn compile(word: String, list: &'static str) -> Result<Self, MatchError> {
        if word.is_empty() {
            return Err(MatchError::EmptyWord { list });
        }
        let pattern = format!(r"(?i)^{}[.!]*\n*\s*$", regex::escape(&word));
        let regex = Regex::new(&pattern).map_err(|e| MatchError::InvalidPattern {
            word: word.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { word, regex })
    }
}

/// Classifies a reply body as Approve / Deny / Neither.
///
/// Patterns are compiled once at construction, so every structural problem
/// with the word lists surfaces from [`WordMatcher::new`].
///
/// # Example
///
/// ```
/// use approval_domain::quorum::{Verdict, WordMatcher};
///
/// let matcher = WordMatcher::with_defaults().unwrap();
/// assert_eq!(matcher.classify("Approved!"), Verdict::Approve);
/// assert_eq!(matcher.classify("no"), Verdict::Deny);
/// assert_eq!(matcher.classify("I have approved this"), Verdict::Neither);
/// ```
#[derive(Debug, Clone)]
pub struct WordMatcher {
    approve: Vec<WordPattern>,
    deny: Vec<WordPattern>,
}

impl WordMatcher {
    /// Build a matcher from the default lists extended with additional words.
    pub fn new(
        additional_approve: impl IntoIterator<Item = String>,
        additional_deny: impl IntoIterator<Item = String>,
    ) -> Result<Self, MatchError> {
        let approve = compile_list(DEFAULT_APPROVE_WORDS, additional_approve, "approve")?;
        let deny = compile_list(DEFAULT_DENY_WORDS, additional_deny, "deny")?;
        Ok(Self { approve, deny })
    }

    /// Matcher with only the built-in words.
    pub fn with_defaults() -> Result<Self, MatchError> {
        Self::new(Vec::new(), Vec::new())
    }

    /// Classify a single reply body. Approve words take precedence.
    pub fn classify(&self, body: &str) -> Verdict {
        if self.approve.iter().any(|p| p.regex.is_match(body)) {
            Verdict::Approve
        } else if self.deny.iter().any(|p| p.regex.is_match(body)) {
            Verdict::Deny
        } else {
            Verdict::Neither
        }
    }

    /// Accepted approve words, in matching order.
    pub fn approve_words(&self) -> impl Iterator<Item = &str> {
        self.approve.iter().map(|p| p.word.as_str())
    }

    /// Accepted deny words, in matching order.
    pub fn deny_words(&self) -> impl Iterator<Item = &str> {
        self.deny.iter().map(|p| p.word.as_str())
    }

    /// Words present in both lists, compared case-insensitively.
    ///
    /// Such words always classify as Approve.
    pub fn overlapping_words(&self) -> Vec<String> {
        self.approve_words()
            .filter(|a| self.deny_words().any(|d| d.to_lowercase() == a.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

fn compile_list(
    defaults: &[&str],
    additional: impl IntoIterator<Item = String>,
    list: &'static str,
) -> Result<Vec<WordPattern>, MatchError> {
    defaults
        .iter()
        .map(|w| w.to_string())
        .chain(additional)
        .map(|word| WordPattern::compile(word, list))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> WordMatcher {
        WordMatcher::with_defaults().unwrap()
    }

    #[test]
    fn test_exact_word_matches() {
        let m = matcher();
        assert_eq!(m.classify("approved"), Verdict::Approve);
        assert_eq!(m.classify("yes"), Verdict::Approve);
        assert_eq!(m.classify("denied"), Verdict::Deny);
        assert_eq!(m.classify("no"), Verdict::Deny);
    }

    #[test]
    fn test_case_and_trailing_punctuation() {
        let m = matcher();
        assert_eq!(m.classify("Approved"), Verdict::Approve);
        assert_eq!(m.classify("approved!!"), Verdict::Approve);
        assert_eq!(m.classify("APPROVED.\n"), Verdict::Approve);
        assert_eq!(m.classify("Yes.!.\n\n  "), Verdict::Approve);
        assert_eq!(m.classify("NO!"), Verdict::Deny);
    }

    #[test]
    fn test_embedded_word_is_ignored() {
        let m = matcher();
        assert_eq!(m.classify("I have approved this"), Verdict::Neither);
        assert_eq!(m.classify("approved, but check the logs"), Verdict::Neither);
        assert_eq!(m.classify("not"), Verdict::Neither);
        assert_eq!(m.classify("nope"), Verdict::Neither);
        assert_eq!(m.classify(""), Verdict::Neither);
    }

    #[test]
    fn test_leading_whitespace_is_not_trimmed() {
        assert_eq!(matcher().classify("  yes"), Verdict::Neither);
    }

    #[test]
    fn test_symbols() {
        let m = matcher();
        assert_eq!(m.classify("👍"), Verdict::Approve);
        assert_eq!(m.classify("✅"), Verdict::Approve);
        assert_eq!(m.classify("🚀"), Verdict::Approve);
        assert_eq!(m.classify("🚢!"), Verdict::Approve);
        assert_eq!(m.classify("👎"), Verdict::Deny);
        assert_eq!(m.classify("❌"), Verdict::Deny);
        assert_eq!(m.classify("🚫\n"), Verdict::Deny);
        assert_eq!(m.classify("👍👍"), Verdict::Neither);
    }

    #[test]
    fn test_additional_words() {
        let m = WordMatcher::new(
            parse_additional_words(" LGTM , ship it"),
            parse_additional_words("nah"),
        )
        .unwrap();
        assert_eq!(m.classify("lgtm"), Verdict::Approve);
        assert_eq!(m.classify("Ship It!"), Verdict::Approve);
        assert_eq!(m.classify("NAH"), Verdict::Deny);
        assert!(m.approve_words().any(|w| w == "LGTM"));
    }

    #[test]
    fn test_additional_words_are_literal() {
        let m = WordMatcher::new(vec!["+1".to_string()], Vec::new()).unwrap();
        assert_eq!(m.classify("+1"), Verdict::Approve);
        assert_eq!(m.classify("1"), Verdict::Neither);

        let m = WordMatcher::new(vec!["a.b".to_string()], Vec::new()).unwrap();
        assert_eq!(m.classify("axb"), Verdict::Neither);
    }

    #[test]
    fn test_parse_additional_words() {
        assert!(parse_additional_words("").is_empty());
        assert!(parse_additional_words("   ").is_empty());
        assert_eq!(parse_additional_words("a, B ,c"), vec!["a", "B", "c"]);
    }

    #[test]
    fn test_empty_word_is_rejected() {
        let result = WordMatcher::new(parse_additional_words("ok,,fine"), Vec::new());
        assert_eq!(
            result.unwrap_err(),
            MatchError::EmptyWord { list: "approve" }
        );

        let result = WordMatcher::new(Vec::new(), parse_additional_words("nope,"));
        assert_eq!(result.unwrap_err(), MatchError::EmptyWord { list: "deny" });
    }

    #[test]
    fn test_overlap_prefers_approve() {
        let m = WordMatcher::new(vec!["maybe".to_string()], vec!["Maybe".to_string()]).unwrap();
        assert_eq!(m.overlapping_words(), vec!["maybe"]);
        assert_eq!(m.classify("maybe"), Verdict::Approve);
    }

    #[test]
    fn test_word_lists_in_order() {
        let m = matcher();
        let approve: Vec<_> = m.approve_words().collect();
        assert_eq!(approve, DEFAULT_APPROVE_WORDS);
        let deny: Vec<_> = m.deny_words().collect();
        assert_eq!(deny, DEFAULT_DENY_WORDS);
        assert!(m.overlapping_words().is_empty());
    }
}
