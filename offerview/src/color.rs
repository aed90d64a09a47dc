//! CSS-style color strings to terminal colors.

use ratatui::style::Color;

/// Parse a design color.
///
/// `rgb(r, g, b)`, `rgba(r, g, b, a)` and short `#rgb` hex are handled
/// here; everything else (`#rrggbb`, named and indexed colors) goes
/// through ratatui's [`Color`] parser. Alpha is dropped; the terminal has
/// no translucency.
pub fn parse_css_color(value: &str) -> Option<Color> {
    let value = value.trim();

    if let Some(inner) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        return parse_rgb_function(inner);
    }

    if let Some(hex) = value.strip_prefix('#').filter(|hex| hex.len() == 3) {
        return parse_short_hex(hex);
    }

    value.parse::<Color>().ok()
}

/// Parse a color, falling back when the string is not understood.
pub fn css_color_or(value: &str, fallback: Color) -> Color {
    parse_css_color(value).unwrap_or(fallback)
}

fn parse_rgb_function(inner: &str) -> Option<Color> {
    let inner = inner.strip_suffix(')')?;

    let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>());
    let r = channels.next()?.ok()?;
    let g = channels.next()?.ok()?;
    let b = channels.next()?.ok()?;
    Some(Color::Rgb(r, g, b))
}

fn parse_short_hex(hex: &str) -> Option<Color> {
    let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
    Some(Color::Rgb(digits.next()??, digits.next()??, digits.next()??))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_css_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_css_color("#FFF"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_css_color("#12345"), None);
        assert_eq!(parse_css_color("#zzzzzz"), None);
    }

    #[test]
    fn test_parse_rgb_functions() {
        assert_eq!(
            parse_css_color("rgba(255, 255, 255, 0.2)"),
            Some(Color::Rgb(255, 255, 255))
        );
        assert_eq!(parse_css_color("rgb(1,2,3)"), Some(Color::Rgb(1, 2, 3)));
        assert_eq!(parse_css_color("rgb(300, 0, 0)"), None);
    }

    #[test]
    fn test_named_and_indexed_colors() {
        assert_eq!(parse_css_color("red"), Some(Color::Red));
        assert_eq!(parse_css_color("LightBlue"), Some(Color::LightBlue));
        assert_eq!(parse_css_color("42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn test_fallback_for_unknown_names() {
        assert_eq!(css_color_or("tomato", Color::Gray), Color::Gray);
        assert_eq!(css_color_or("#12g", Color::Gray), Color::Gray);
    }
}
