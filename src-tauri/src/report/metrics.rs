//! Text measurement for the built-in Helvetica font.
//!
//! Widths are the standard Helvetica AFM advance widths in 1/1000 em, so
//! wrapping matches what a PDF viewer renders without embedding a font.

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Advance widths for ASCII 32..=126.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => ASCII_WIDTHS[(c as usize) - 32],
        '•' => 350,
        '°' => 400,
        '½' => 834,
        '–' => 556,
        '—' => 1000,
        _ => 556,
    }
}

/// Width of `text` in millimetres at `font_size` points.
pub fn text_width_mm(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    units as f32 / 1000.0 * font_size / PT_PER_MM
}

/// Split `text` into lines no wider than `max_width_mm`.
///
/// Explicit newlines are kept (an empty line stays empty). Words longer than
/// the width are broken at character boundaries.
pub fn wrap_text(text: &str, font_size: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width_mm(&candidate, font_size) <= max_width_mm {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width_mm(word, font_size) <= max_width_mm {
                current = word.to_string();
            } else {
                for c in word.chars() {
                    current.push(c);
                    if text_width_mm(&current, font_size) > max_width_mm {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_table_covers_printable_ascii() {
        assert_eq!(ASCII_WIDTHS.len(), ('~' as usize) - (' ' as usize) + 1);
        assert_eq!(char_width(' '), 278);
        assert_eq!(char_width('W'), 944);
        assert_eq!(char_width('i'), 222);
        assert_eq!(char_width('~'), 584);
    }

    #[test]
    fn test_text_width_scales_with_font_size() {
        let small = text_width_mm("Leaf spot", 10.0);
        let large = text_width_mm("Leaf spot", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        let lines = wrap_text("Header:\n\n• one\n• two", 12.0, 170.0);
        assert_eq!(lines, vec!["Header:", "", "• one", "• two"]);
    }

    #[test]
    fn test_wrap_breaks_long_lines_within_width() {
        let text = "Apply potassium bicarbonate solution (1 tbsp + ½ tsp liquid soap per gallon of water) and spray thoroughly on both sides of leaves every 7-10 days";
        let lines = wrap_text(text, 12.0, 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 12.0) <= 100.0, "too wide: {}", line);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_splits_oversized_word() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 12.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
