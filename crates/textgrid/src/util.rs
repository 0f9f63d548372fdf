//! Utility functions for text measurement and color conversion.
//!
//! Widths are counted in Unicode scalar values. ANSI escape sequences are
//! only ever added after measurement, so nothing here needs to skip them.

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// # Example
///
/// ```rust
/// use textgrid::rgb_to_ansi256;
///
/// // Pure red maps to ANSI 196
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
///
/// // Pure green maps to ANSI 46
/// assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// Measured width of a text fragment.
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Splits `s` after `width` characters, returning `(visible, overflow)`.
///
/// A zero width keeps nothing visible and drops the overflow, so callers
/// iterating on the overflow always terminate.
///
/// ```rust
/// use textgrid::split_at_width;
///
/// assert_eq!(split_at_width("Hello World", 5), ("Hello", " World"));
/// assert_eq!(split_at_width("Hi", 5), ("Hi", ""));
/// ```
pub fn split_at_width(s: &str, width: usize) -> (&str, &str) {
    if width == 0 {
        return ("", "");
    }
    match s.char_indices().nth(width) {
        Some((byte, _)) => s.split_at(byte),
        None => (s, ""),
    }
}

/// Repeats `c` `count` times.
pub fn repeat_char(c: char, count: usize) -> String {
    std::iter::repeat(c).take(count).collect()
}

/// Number of decimal digits needed to print `n`.
pub fn digit_count(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}
