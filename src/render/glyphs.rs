//! Built-in 5x7 bitmap font for chart text.
//!
//! Covers what chart labels need: letters (drawn as capitals), digits and
//! the punctuation found in dates, offsets and JVM version strings.
//! Unknown characters advance like a space.

/// Glyph rows, top to bottom.
pub const GLYPH_HEIGHT: i32 = 7;

const SPACE_WIDTH: i32 = 3;

/// Columns left blank after each glyph.
const GAP: i32 = 1;

/// Pixel rows of one glyph; bit `width - 1` is the leftmost column.
struct Glyph {
    ch: char,
    width: u8,
    rows: [u8; 7],
}

const fn g(ch: char, width: u8, rows: [u8; 7]) -> Glyph {
    Glyph { ch, width, rows }
}

#[rustfmt::skip]
const GLYPHS: &[Glyph] = &[
    g('A', 5, [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
    g('B', 5, [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
    g('C', 5, [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
    g('D', 5, [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110]),
    g('E', 5, [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
    g('F', 5, [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
    g('G', 5, [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
    g('H', 5, [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
    g('I', 3, [0b111, 0b010, 0b010, 0b010, 0b010, 0b010, 0b111]),
    g('J', 5, [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100]),
    g('K', 5, [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001]),
    g('L', 5, [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
    g('M', 5, [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
    g('N', 5, [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001]),
    g('O', 5, [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    g('P', 5, [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
    g('Q', 5, [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101]),
    g('R', 5, [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
    g('S', 5, [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
    g('T', 5, [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
    g('U', 5, [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    g('V', 5, [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
    g('W', 5, [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010]),
    g('X', 5, [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
    g('Y', 5, [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100]),
    g('Z', 5, [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
    g('0', 5, [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
    g('1', 5, [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    g('2', 5, [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
    g('3', 5, [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
    g('4', 5, [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
    g('5', 5, [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
    g('6', 5, [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
    g('7', 5, [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
    g('8', 5, [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
    g('9', 5, [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
    g('(', 3, [0b001, 0b010, 0b100, 0b100, 0b100, 0b010, 0b001]),
    g(')', 3, [0b100, 0b010, 0b001, 0b001, 0b001, 0b010, 0b100]),
    g(':', 1, [0, 1, 1, 0, 1, 1, 0]),
    g('.', 1, [0, 0, 0, 0, 0, 0, 1]),
    g(',', 2, [0, 0, 0, 0, 0, 0b01, 0b10]),
    g('\'', 1, [1, 1, 0, 0, 0, 0, 0]),
    g('-', 3, [0, 0, 0, 0b111, 0, 0, 0]),
    g('+', 5, [0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0]),
    g('=', 5, [0, 0, 0b11111, 0, 0b11111, 0, 0]),
    g('_', 5, [0, 0, 0, 0, 0, 0, 0b11111]),
    g('/', 5, [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000]),
    g('%', 5, [0b11001, 0b11010, 0b00010, 0b00100, 0b01000, 0b01011, 0b10011]),
];

fn glyph(ch: char) -> Option<&'static Glyph> {
    let upper = ch.to_ascii_uppercase();
    GLYPHS.iter().find(|glyph| glyph.ch == upper)
}

/// Pixel scale giving roughly `size`-pixel-tall text.
pub fn scale_for(size: f64) -> i32 {
    ((size / 10.0).round() as i32).max(1)
}

/// Unrotated width and height of `text` at `scale`.
pub fn text_extent(text: &str, scale: i32) -> (i32, i32) {
    let mut width = 0;
    for ch in text.chars() {
        width += match glyph(ch) {
            Some(glyph) => glyph.width as i32 + GAP,
            None => SPACE_WIDTH,
        };
    }
    ((width - GAP).max(0) * scale, GLYPH_HEIGHT * scale)
}

/// Call `plot` for every lit pixel of `text`, in unrotated coordinates
/// relative to the top-left corner of the text box.
pub fn rasterize(text: &str, scale: i32, mut plot: impl FnMut(i32, i32)) {
    let mut cursor = 0;
    for ch in text.chars() {
        let Some(glyph) = glyph(ch) else {
            cursor += SPACE_WIDTH;
            continue;
        };
        let width = glyph.width as i32;
        for (row, bits) in glyph.rows.iter().enumerate() {
            for col in 0..width {
                if bits & (1 << (width - 1 - col)) == 0 {
                    continue;
                }
                let (x, y) = ((cursor + col) * scale, row as i32 * scale);
                for dx in 0..scale {
                    for dy in 0..scale {
                        plot(x + dx, y + dy);
                    }
                }
            }
        }
        cursor += width + GAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_strings_are_covered() {
        let text = "GC Log (Java 1.8.0_151-b12) Time (+02:00) Memory (MB) 17.0.8+7 Heap change by Full GC, Start: End: 2025-07-07";
        for ch in text.chars().filter(|c| *c != ' ') {
            assert!(glyph(ch).is_some(), "no glyph for {ch:?}");
        }
    }

    #[test]
    fn test_extent() {
        assert_eq!(text_extent("", 1), (0, 7));
        assert_eq!(text_extent("I", 1), (3, 7));
        assert_eq!(text_extent("GC", 2), (22, 14));
        assert_eq!(text_extent("A B", 1), (5 + 1 + 3 + 5, 7));
    }

    #[test]
    fn test_rasterize_stays_inside_extent() {
        let (width, height) = text_extent("Heap 1024", 2);
        let mut lit = 0;
        rasterize("Heap 1024", 2, |x, y| {
            assert!((0..width).contains(&x) && (0..height).contains(&y), "({x}, {y})");
            lit += 1;
        });
        assert!(lit > 0);
    }

    #[test]
    fn test_scale_for() {
        assert_eq!(scale_for(6.0), 1);
        assert_eq!(scale_for(14.0), 1);
        assert_eq!(scale_for(24.0), 2);
    }
}
