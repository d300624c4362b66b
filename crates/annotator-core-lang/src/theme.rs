//! Color themes.

use std::collections::HashMap;

use crate::color::{Color, palette};
use crate::style::TokenStyle;

/// Name of the built-in dark theme.
pub const DARK_THEME: &str = "dark";
/// Name of the built-in light theme.
pub const LIGHT_THEME: &str = "light";

/// Colors and fonts used to paint the code region and its configuration segments.
///
/// `None` colors are transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name (lowercase).
    pub name: String,
    /// Whole-document background.
    pub doc_background: Color,
    /// Default code text color.
    pub code_foreground: Color,
    /// Paragraph shading behind the code.
    pub code_background: Option<Color>,
    /// Text highlight behind the code.
    pub code_highlight: Option<Color>,
    /// Configuration (header/footer) text color.
    pub config_foreground: Color,
    /// Paragraph shading behind configuration text.
    pub config_background: Option<Color>,
    /// Text highlight behind configuration text.
    pub config_highlight: Option<Color>,
    /// Font family of configuration text.
    pub config_font: String,
    /// Font size of configuration text (points).
    pub config_font_size: f64,
    /// Whether configuration text is kept in italics (the directive marker style).
    pub config_italics: bool,
    palette: HashMap<TokenStyle, Color>,
}

impl Theme {
    /// Look up the color for a token style. Unmapped styles fall back to the code foreground.
    pub fn color(&self, style: TokenStyle) -> Color {
        self.palette
            .get(&style)
            .copied()
            .unwrap_or(self.code_foreground)
    }

    /// Override or add a palette entry.
    pub fn with_color(mut self, style: TokenStyle, color: Color) -> Self {
        self.palette.insert(style, color);
        self
    }

    /// The VSCode-like dark theme.
    pub fn dark() -> Self {
        Self {
            name: DARK_THEME.to_string(),
            doc_background: palette::DARK_BACKGROUND,
            code_foreground: palette::DARK_FOREGROUND,
            code_background: Some(palette::DARK_BACKGROUND),
            code_highlight: None,
            config_foreground: Color::WHITE,
            config_background: Some(Color::BLACK),
            config_highlight: None,
            config_font: crate::font::COURIER_NEW.to_string(),
            config_font_size: 11.0,
            config_italics: true,
            palette: HashMap::from([
                (TokenStyle::Comment, palette::DARK_DARK_GREEN),
                (TokenStyle::String, palette::DARK_LIGHT_RED_ORANGE),
                (TokenStyle::Control, palette::DARK_PINK),
                (TokenStyle::Declaration, palette::DARK_DARK_BLUE),
                (TokenStyle::Type, palette::DARK_GREEN_CYAN),
                (TokenStyle::Builtin, palette::DARK_YELLOW),
                (TokenStyle::Number, palette::DARK_PALE_GREEN),
            ]),
        }
    }

    /// The VSCode-like light theme.
    pub fn light() -> Self {
        Self {
            name: LIGHT_THEME.to_string(),
            doc_background: Color::WHITE,
            code_foreground: Color::BLACK,
            code_background: Some(Color::WHITE),
            code_highlight: None,
            config_foreground: Color::BLACK,
            config_background: Some(Color::LIGHT_GRAY),
            config_highlight: None,
            config_font: crate::font::COURIER_NEW.to_string(),
            config_font_size: 11.0,
            config_italics: true,
            palette: HashMap::from([
                (TokenStyle::Comment, palette::LIGHT_DARK_GREEN),
                (TokenStyle::String, palette::LIGHT_DARK_RED),
                (TokenStyle::Control, palette::LIGHT_PINK),
                (TokenStyle::Declaration, Color::BLUE),
                (TokenStyle::Type, palette::LIGHT_GREEN_CYAN),
                (TokenStyle::Builtin, palette::LIGHT_STRAW_YELLOW),
                (TokenStyle::Number, palette::LIGHT_PALE_GREEN),
            ]),
        }
    }
}
