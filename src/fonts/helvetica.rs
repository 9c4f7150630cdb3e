//! Character widths of the built-in Helvetica faces.
//!
//! Values are the Adobe standard metrics in 1/1000 em for the printable
//! ASCII range (`' '` through `'~'`). Other characters fall back to the
//! width of a digit.

const FIRST: u32 = b' ' as u32;
const FALLBACK_WIDTH: u16 = 556;

/// Height of capital letters as a fraction of the font size.
pub const CAP_HEIGHT: f64 = 0.718;

/// Depth of descenders as a fraction of the font size.
pub const DESCENT: f64 = 0.207;

#[rustfmt::skip]
const REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(ch: char, bold: bool) -> u16 {
    let table = if bold { &BOLD } else { &REGULAR };
    (ch as u32)
        .checked_sub(FIRST)
        .and_then(|index| table.get(index as usize))
        .copied()
        .unwrap_or(FALLBACK_WIDTH)
}

/// Width of `text` in points when set in Helvetica (or Helvetica-Bold) at
/// `font_size` points.
pub fn text_width(text: &str, bold: bool, font_size: f64) -> f64 {
    let units: u32 = text.chars().map(|ch| u32::from(char_width(ch, bold))).sum();
    f64::from(units) * font_size / 1000.0
}

/// Greedily breaks `text` into lines no wider than `max_width` points.
///
/// Words longer than the limit get a line of their own. Whitespace runs
/// collapse to single spaces.
pub fn wrap(text: &str, bold: bool, font_size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if text_width(&candidate, bold, font_size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_widths() {
        assert_eq!(text_width("A", false, 1000.0), 667.0);
        assert_eq!(text_width("i", false, 1000.0), 222.0);
        assert_eq!(text_width("i", true, 1000.0), 278.0);
        assert_eq!(text_width("~", true, 1000.0), 584.0);
        assert_eq!(text_width("", true, 12.0), 0.0);
    }

    #[test]
    fn width_scales_with_font_size() {
        let small = text_width("$443.78 USD", false, 12.0);
        let large = text_width("$443.78 USD", false, 24.0);
        assert!((large - 2.0 * small).abs() < 1e-9);
    }

    #[test]
    fn non_ascii_uses_fallback() {
        assert_eq!(text_width("é", false, 1000.0), 556.0);
    }

    #[test]
    fn wraps_long_titles() {
        let title = "Extra Wide Conductive Anti Static Bench Top Mat Roll Price Brackets";
        let lines = wrap(title, true, 24.0, 468.0);
        assert!(lines.len() > 1);
        assert!(lines
            .iter()
            .all(|line| text_width(line, true, 24.0) <= 468.0));
        assert_eq!(lines.join(" "), title);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(
            wrap("ESD Mat Roll Price Brackets", true, 24.0, 468.0),
            vec!["ESD Mat Roll Price Brackets".to_owned()]
        );
        assert_eq!(wrap("", true, 24.0, 468.0), vec![String::new()]);
    }
}
