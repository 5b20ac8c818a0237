use crossterm::style::Color;
use mk_core::config::ColorScheme;

/// Accent used for titles, the selection marker and uncolored list numbers.
pub const ACCENT_COLOR: Color = Color::DarkMagenta;
/// Used for hints and descriptions.
pub const MUTED_COLOR: Color = Color::DarkGrey;

/// Trait for converting a color scheme to terminal colors
pub trait AsTermPalette {
    fn as_crossterm_palette(&self) -> [Color; 6];
}

impl AsTermPalette for ColorScheme {
    fn as_crossterm_palette(&self) -> [Color; 6] {
        match self {
            ColorScheme::Rainbow => [
                Color::DarkRed,
                Color::DarkYellow,
                Color::DarkGreen,
                Color::DarkCyan,
                Color::DarkBlue,
                Color::DarkMagenta,
            ],
            // Avoids red/green pairs
            ColorScheme::Deuteranopia => [
                Color::DarkBlue,
                Color::DarkYellow,
                Color::DarkCyan,
                Color::DarkMagenta,
                Color::Blue,
                Color::Yellow,
            ],
            // Avoids blue/yellow pairs
            ColorScheme::Tritanopia => [
                Color::DarkRed,
                Color::DarkMagenta,
                Color::DarkGreen,
                Color::Red,
                Color::Magenta,
                Color::Green,
            ],
            ColorScheme::HighContrast => [
                Color::Red,
                Color::Yellow,
                Color::Green,
                Color::Cyan,
                Color::Blue,
                Color::Magenta,
            ],
        }
    }
}

/// Color of the row at `index`, cycling through `palette`.
#[must_use]
pub fn row_color(palette: &[Color], index: usize) -> Option<Color> {
    if palette.is_empty() {
        None
    } else {
        Some(palette[index % palette.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_have_distinct_colors() {
        for scheme in [
            ColorScheme::Rainbow,
            ColorScheme::Deuteranopia,
            ColorScheme::Tritanopia,
            ColorScheme::HighContrast,
        ] {
            let palette = scheme.as_crossterm_palette();
            for (i, color) in palette.iter().enumerate() {
                assert!(!palette[i + 1..].contains(color), "{scheme:?} repeats {color:?}");
            }
        }
    }

    #[test]
    fn test_row_color_cycles() {
        let palette = ColorScheme::Rainbow.as_crossterm_palette();
        assert_eq!(row_color(&palette, 0), Some(Color::DarkRed));
        assert_eq!(row_color(&palette, 6), Some(Color::DarkRed));
        assert_eq!(row_color(&palette, 7), Some(Color::DarkYellow));
        assert_eq!(row_color(&[], 3), None);
    }
}
