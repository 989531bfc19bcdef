//! Text helpers for the built-in Helvetica font.

/// Encodes `s` for a simple font with `WinAnsiEncoding`.
///
/// Latin-1 maps to itself; the common typographic characters that WinAnsi
/// places in 0x80..0x9F are translated; anything else becomes `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Baselines (layout coordinates, y down) for `lines` lines of text centred
/// vertically in a region starting at `top` with the given `height`.
pub fn centered_baselines(
    lines: usize,
    top: f32,
    height: f32,
    font_size: f32,
    leading: f32,
) -> Vec<f32> {
    if lines == 0 {
        return Vec::new();
    }
    // The last line only needs its glyph height, not a full leading.
    let block_height = leading * (lines - 1) as f32 + font_size;
    let block_top = top + (height - block_height) / 2.0;
    (0..lines)
        .map(|i| block_top + i as f32 * leading + font_size * 0.8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_ansi_latin1_and_quotes() {
        assert_eq!(to_win_ansi("Björk"), b"Bj\xf6rk".to_vec());
        assert_eq!(to_win_ansi("Don’t – stop"), b"Don\x92t \x96 stop".to_vec());
        assert_eq!(to_win_ansi("坂本"), b"??".to_vec());
    }

    #[test]
    fn test_centered_baselines() {
        let b = centered_baselines(2, 0.0, 100.0, 8.0, 10.0);
        // block is 18pt tall, starting at 41
        assert_eq!(b, vec![41.0 + 6.4, 51.0 + 6.4]);
        assert!(centered_baselines(0, 0.0, 10.0, 8.0, 10.0).is_empty());
    }
}
