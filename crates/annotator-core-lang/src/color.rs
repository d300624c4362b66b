//! RGB colors as understood by the host document (channels in `[0.0, 1.0]`).

use serde::Serialize;

/// An opaque RGB color. Transparency is expressed as `Option<Color>::None` at use sites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    /// Red channel, `0.0..=1.0`.
    pub red: f32,
    /// Green channel, `0.0..=1.0`.
    pub green: f32,
    /// Blue channel, `0.0..=1.0`.
    pub blue: f32,
}

impl Color {
    /// Create a color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            red: r as f32 / 255.0,
            green: g as f32 / 255.0,
            blue: b as f32 / 255.0,
        }
    }

    /// Pure white.
    pub const WHITE: Self = Self::from_rgb8(0xFF, 0xFF, 0xFF);
    /// Pure black.
    pub const BLACK: Self = Self::from_rgb8(0x00, 0x00, 0x00);
    /// Pure blue.
    pub const BLUE: Self = Self::from_rgb8(0x00, 0x00, 0xFF);
    /// Light gray used behind configuration text in the light theme.
    pub const LIGHT_GRAY: Self = Self::from_rgb8(0xF3, 0xF3, 0xF3);
}

/// VSCode-derived palettes used by the built-in themes.
pub mod palette {
    use super::Color;

    /// Dark theme background (dark gray).
    pub const DARK_BACKGROUND: Color = Color::from_rgb8(0x1E, 0x1E, 0x1E);
    /// Dark theme default foreground.
    pub const DARK_FOREGROUND: Color = Color::from_rgb8(0xD4, 0xD4, 0xD4);
    /// Dark theme yellow.
    pub const DARK_YELLOW: Color = Color::from_rgb8(0xDC, 0xDC, 0xAA);
    /// Dark theme green-cyan.
    pub const DARK_GREEN_CYAN: Color = Color::from_rgb8(0x4E, 0xC9, 0xB0);
    /// Dark theme pale green.
    pub const DARK_PALE_GREEN: Color = Color::from_rgb8(0xB5, 0xCE, 0xA8);
    /// Dark theme dark green.
    pub const DARK_DARK_GREEN: Color = Color::from_rgb8(0x6A, 0x99, 0x55);
    /// Dark theme pink.
    pub const DARK_PINK: Color = Color::from_rgb8(0xC5, 0x86, 0xC0);
    /// Dark theme dark blue.
    pub const DARK_DARK_BLUE: Color = Color::from_rgb8(0x56, 0x9C, 0xD6);
    /// Dark theme light red-orange.
    pub const DARK_LIGHT_RED_ORANGE: Color = Color::from_rgb8(0xCE, 0x91, 0x78);

    /// Light theme pink.
    pub const LIGHT_PINK: Color = Color::from_rgb8(0xAF, 0x00, 0xDB);
    /// Light theme green-cyan.
    pub const LIGHT_GREEN_CYAN: Color = Color::from_rgb8(0x26, 0x7F, 0x99);
    /// Light theme straw yellow.
    pub const LIGHT_STRAW_YELLOW: Color = Color::from_rgb8(0x79, 0x5E, 0x26);
    /// Light theme pale green.
    pub const LIGHT_PALE_GREEN: Color = Color::from_rgb8(0x09, 0x86, 0x58);
    /// Light theme dark green.
    pub const LIGHT_DARK_GREEN: Color = Color::from_rgb8(0x00, 0x80, 0x00);
    /// Light theme dark red.
    pub const LIGHT_DARK_RED: Color = Color::from_rgb8(0xA3, 0x15, 0x15);
}
