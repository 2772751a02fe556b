//! Token accounting.
//!
//! Providers that report usage are trusted as-is. For the rest, the token
//! count is *estimated* from the answer length at [`CHARS_PER_TOKEN`]
//! characters per token. The estimate is advisory only: it was never
//! validated against any tokenizer and can be off by a wide margin for
//! non-English text, code, or heavy punctuation.

/// Characters per token assumed by [`estimate_tokens`].
pub const CHARS_PER_TOKEN: u64 = 4;

/// Approximate token count for `text`: `round(chars / 4)`, halves rounding up.
pub fn estimate_tokens(text: &str) -> u64 {
    let chars = text.chars().count() as u64;
    (chars + CHARS_PER_TOKEN / 2) / CHARS_PER_TOKEN
}

/// Picks the reported usage when the backend returned a positive count,
/// otherwise falls back to [`estimate_tokens`].
pub fn resolve_token_count(reported: Option<u64>, text: &str) -> u64 {
    match reported {
        Some(n) if n > 0 => n,
        _ => estimate_tokens(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_rounds_to_nearest() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("a"), 0);
        assert_eq!(estimate_tokens("ab"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcdef"), 2);
        assert_eq!(estimate_tokens(&"x".repeat(400)), 100);
    }

    #[test]
    fn test_estimate_counts_chars_not_bytes() {
        // 4 chars, 8 bytes
        assert_eq!(estimate_tokens("ëëëë"), 1);
    }

    #[test]
    fn test_resolve_prefers_reported_usage() {
        assert_eq!(resolve_token_count(Some(245), "short"), 245);
        assert_eq!(resolve_token_count(None, "abcdefgh"), 2);
        assert_eq!(resolve_token_count(Some(0), "abcdefgh"), 2);
    }
}
