//! Character-safe text helpers.
//!
//! All size limits in docsage (chunk width, summary input cap, snippet
//! fallback) count characters, not bytes, so slicing must respect code
//! point boundaries.

/// Return at most the first `n` characters of `s`.
pub fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_input_is_returned_whole() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn ascii_truncates_at_n() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("abcdef", 6), "abcdef");
        assert_eq!(truncate_chars("abcdef", 0), "");
    }

    #[test]
    fn multibyte_code_points_are_not_split() {
        let s = "héllo wörld";
        assert_eq!(truncate_chars(s, 5), "héllo");
        let emoji = "a😀b😀c";
        assert_eq!(truncate_chars(emoji, 3), "a😀b");
    }
}
