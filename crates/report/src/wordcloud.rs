//! Word-frequency image renderer.
//!
//! Produces an 800x400 white PNG where the most frequent document words are
//! laid out in rows, scaled by their counts. Glyphs come from a built-in
//! 5x7 bitmap table rather than a bundled font file, which keeps the
//! renderer deterministic and the binary free of font assets.

use image::{Rgb, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

use crate::ReportError;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 400;

/// Words rendered at most.
const MAX_WORDS: usize = 40;
/// Largest glyph scale factor; the least frequent rendered word gets 1.
const MAX_SCALE: u32 = 5;
const PADDING: u32 = 10;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const PALETTE: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([214, 39, 40]),
    Rgb([44, 160, 44]),
    Rgb([148, 103, 189]),
    Rgb([255, 127, 14]),
    Rgb([23, 90, 99]),
];

/// Common English words excluded from the cloud.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "has", "have", "this", "that", "with", "from", "they", "been", "were", "will",
    "would", "there", "their", "what", "about", "which", "when", "then", "them", "these", "than",
    "into", "more", "other", "some", "such", "only", "over", "also", "its", "his", "she", "him",
];

/// Render a word-frequency PNG over the full document content.
///
/// Callers must reject empty/whitespace-only content before calling; given
/// such input this produces a blank canvas rather than failing.
pub fn render_wordcloud_png(content: &str) -> Result<Vec<u8>, ReportError> {
    let ranked = ranked_words(content);
    debug!(words = ranked.len(), "rendering word cloud");

    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    layout_words(&mut img, &ranked);

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| ReportError::Image(e.to_string()))?;
    Ok(out)
}

/// Count qualifying words and return the top [`MAX_WORDS`] with counts,
/// most frequent first. Ties break alphabetically so output is stable.
pub fn ranked_words(content: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in content
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 3)
    {
        let word = token.to_lowercase();
        if STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(MAX_WORDS);
    ranked
}

/// Place words row by row, scaled by frequency, until the canvas is full.
fn layout_words(img: &mut RgbImage, ranked: &[(String, usize)]) {
    let Some(&(_, max_count)) = ranked.first() else {
        return;
    };
    let min_count = ranked.last().map(|&(_, c)| c).unwrap_or(max_count);

    let mut x = PADDING;
    let mut y = PADDING;
    let mut row_height = 0u32;

    for (i, (word, count)) in ranked.iter().enumerate() {
        let scale = word_scale(*count, min_count, max_count);
        let word_width = glyph_width(scale) * word.chars().count() as u32;
        let word_height = glyph_height(scale);

        if x + word_width > WIDTH - PADDING {
            x = PADDING;
            y += row_height + PADDING;
            row_height = 0;
        }
        if y + word_height > HEIGHT - PADDING {
            break;
        }

        draw_word(img, word, x, y, scale, PALETTE[i % PALETTE.len()]);
        x += word_width + PADDING;
        row_height = row_height.max(word_height);
    }
}

/// Linear scale between 1 and [`MAX_SCALE`] over the count range.
fn word_scale(count: usize, min_count: usize, max_count: usize) -> u32 {
    if max_count == min_count {
        return (MAX_SCALE + 1) / 2;
    }
    let span = (max_count - min_count) as u32;
    1 + ((count - min_count) as u32 * (MAX_SCALE - 1) + span / 2) / span
}

// ── Bitmap glyphs ─────────────────────────────────────────────────────────

/// Glyph cell sizes at a given scale (5x7 pixels plus a 1-column gap).
fn glyph_width(scale: u32) -> u32 {
    6 * scale
}
fn glyph_height(scale: u32) -> u32 {
    7 * scale
}

fn draw_word(img: &mut RgbImage, word: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let mut cursor = x;
    for ch in word.chars() {
        if let Some(columns) = glyph(ch) {
            draw_glyph(img, &columns, cursor, y, scale, color);
        }
        cursor += glyph_width(scale);
    }
}

fn draw_glyph(img: &mut RgbImage, columns: &[u8; 5], x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    for (col, bits) in columns.iter().enumerate() {
        for row in 0..7u32 {
            if bits & (1 << row) == 0 {
                continue;
            }
            for dx in 0..scale {
                for dy in 0..scale {
                    let px = x + col as u32 * scale + dx;
                    let py = y + row * scale + dy;
                    if px < img.width() && py < img.height() {
                        img.put_pixel(px, py, color);
                    }
                }
            }
        }
    }
}

/// Classic 5x7 column bitmaps (bit 0 = top row). Words are lowercased before
/// rendering, so letters map onto the uppercase shapes; anything outside
/// `[a-z0-9]` renders as a blank cell.
fn glyph(ch: char) -> Option<[u8; 5]> {
    let glyphs_alpha: [[u8; 5]; 26] = [
        [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
        [0x7F, 0x49, 0x49, 0x49, 0x36], // B
        [0x3E, 0x41, 0x41, 0x41, 0x22], // C
        [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
        [0x7F, 0x49, 0x49, 0x49, 0x41], // E
        [0x7F, 0x09, 0x09, 0x09, 0x01], // F
        [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
        [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
        [0x00, 0x41, 0x7F, 0x41, 0x00], // I
        [0x20, 0x40, 0x41, 0x3F, 0x01], // J
        [0x7F, 0x08, 0x14, 0x22, 0x41], // K
        [0x7F, 0x40, 0x40, 0x40, 0x40], // L
        [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
        [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
        [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
        [0x7F, 0x09, 0x09, 0x09, 0x06], // P
        [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
        [0x7F, 0x09, 0x19, 0x29, 0x46], // R
        [0x46, 0x49, 0x49, 0x49, 0x31], // S
        [0x01, 0x01, 0x7F, 0x01, 0x01], // T
        [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
        [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
        [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
        [0x63, 0x14, 0x08, 0x14, 0x63], // X
        [0x07, 0x08, 0x70, 0x08, 0x07], // Y
        [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    ];
    let glyphs_digit: [[u8; 5]; 10] = [
        [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
        [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
        [0x42, 0x61, 0x51, 0x49, 0x46], // 2
        [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
        [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
        [0x27, 0x45, 0x45, 0x45, 0x39], // 5
        [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
        [0x01, 0x71, 0x09, 0x05, 0x03], // 7
        [0x36, 0x49, 0x49, 0x49, 0x36], // 8
        [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    ];

    match ch {
        'a'..='z' => Some(glyphs_alpha[(ch as u8 - b'a') as usize]),
        '0'..='9' => Some(glyphs_digit[(ch as u8 - b'0') as usize]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_a_png_of_the_right_size() {
        let bytes = render_wordcloud_png("rust rust tokio server server server").unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), WIDTH);
        assert_eq!(decoded.height(), HEIGHT);
    }

    #[test]
    fn frequent_words_rank_first() {
        let ranked = ranked_words("alpha beta alpha gamma alpha beta");
        assert_eq!(ranked[0], ("alpha".to_string(), 3));
        assert_eq!(ranked[1], ("beta".to_string(), 2));
        assert_eq!(ranked[2], ("gamma".to_string(), 1));
    }

    #[test]
    fn stop_words_and_short_tokens_are_dropped() {
        let ranked = ranked_words("the and for a an it rust");
        assert_eq!(ranked, vec![("rust".to_string(), 1)]);
    }

    #[test]
    fn counting_is_case_insensitive() {
        let ranked = ranked_words("Rust RUST rust");
        assert_eq!(ranked, vec![("rust".to_string(), 3)]);
    }

    #[test]
    fn ranking_is_deterministic_on_ties() {
        let a = ranked_words("zeta eta theta");
        let b = ranked_words("theta zeta eta");
        assert_eq!(a, b);
        // All counts equal: alphabetical order.
        assert_eq!(a[0].0, "eta");
    }

    #[test]
    fn rendering_changes_pixels() {
        let bytes = render_wordcloud_png("rust rust rust rust").unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
        let non_white = img.pixels().filter(|p| **p != BACKGROUND).count();
        assert!(non_white > 0);
    }

    #[test]
    fn scale_spans_the_count_range() {
        assert_eq!(word_scale(10, 1, 10), MAX_SCALE);
        assert_eq!(word_scale(1, 1, 10), 1);
        assert_eq!(word_scale(5, 5, 5), (MAX_SCALE + 1) / 2);
    }
}
