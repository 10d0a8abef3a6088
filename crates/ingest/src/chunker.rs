//! Fixed-size character chunking.

/// Chunk width, in characters.
pub const CHUNK_CHARS: usize = 1500;

/// Split `content` into contiguous, non-overlapping windows of
/// [`CHUNK_CHARS`] characters, in document order. The last window may be
/// shorter. Concatenating the result reproduces `content` exactly.
pub fn chunk_text(content: &str) -> Vec<String> {
    chunk_text_width(content, CHUNK_CHARS)
}

/// Chunking with an explicit width. Widths count characters, so multi-byte
/// code points are never split.
pub fn chunk_text_width(content: &str, width: usize) -> Vec<String> {
    debug_assert!(width > 0);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut len = 0usize;

    for ch in content.chars() {
        current.push(ch);
        len += 1;
        if len == width {
            chunks.push(std::mem::take(&mut current));
            len = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_yields_no_chunks() {
        assert!(chunk_text("").is_empty());
    }

    #[test]
    fn short_content_is_one_chunk() {
        let chunks = chunk_text("hello world");
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn concatenation_round_trips() {
        let content = "abcdefgh".repeat(700); // 5600 chars
        let chunks = chunk_text(&content);
        assert_eq!(chunks.concat(), content);
    }

    #[test]
    fn all_chunks_full_width_except_last() {
        let content = "x".repeat(5600);
        let chunks = chunk_text(&content);
        assert_eq!(chunks.len(), 4);
        for chunk in &chunks[..3] {
            assert_eq!(chunk.chars().count(), CHUNK_CHARS);
        }
        assert_eq!(chunks[3].chars().count(), 5600 % CHUNK_CHARS);
    }

    #[test]
    fn exactly_divisible_content_has_no_short_tail() {
        let content = "y".repeat(3000);
        let chunks = chunk_text(&content);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1500);
        assert_eq!(chunks[1].chars().count(), 1500);
    }

    #[test]
    fn widths_count_characters_not_bytes() {
        // 4 three-byte chars with width 2: boundaries land between code points.
        let content = "日本語字";
        let chunks = chunk_text_width(content, 2);
        assert_eq!(chunks, vec!["日本", "語字"]);
        assert_eq!(chunks.concat(), content);
    }
}
