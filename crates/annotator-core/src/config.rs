//! Process-wide defaults.
//!
//! [`AnnotatorConfig`] is loaded once (TOML) and resolved against a
//! [`Registry`] into [`Defaults`], which fill every directive the document leaves unset.

use std::path::{Path, PathBuf};

use annotator_core_lang::{DARK_THEME, GO, Language, Registry, Theme};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading or resolving the configuration.
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    /// The config file could not be read.
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    /// The config is not valid TOML for [`AnnotatorConfig`].
    Parse(#[from] toml::de::Error),

    #[error("unknown default language `{0}`")]
    /// `default_language` is not in the registry.
    UnknownLanguage(String),

    #[error("unknown default theme `{0}`")]
    /// `default_theme` is not in the registry.
    UnknownTheme(String),

    #[error("unknown default font `{0}`")]
    /// `default_font` is not a registered alias.
    UnknownFont(String),

    #[error("invalid default font size {0}")]
    /// `default_font_size` is not a positive finite number.
    InvalidFontSize(f64),
}

/// Default font alias.
pub const DEFAULT_FONT: &str = "courier_new";
/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f64 = 11.0;
/// Upper bound on shortcut replacements per cycle.
pub const DEFAULT_MAX_SUBSTITUTIONS: usize = 10_000;

/// Raw configuration, as written by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Language used when no `#lang=` directive is given.
    pub default_language: String,
    /// Font alias used when no `#font=` directive is given.
    pub default_font: String,
    /// Font size used when no `#size=` directive is given.
    pub default_font_size: f64,
    /// Theme used when no `#theme=` directive is given.
    pub default_theme: String,
    /// Shortcut setting used when no `#shortcuts=` directive is given.
    pub default_shortcuts: bool,
    /// Upper bound on shortcut replacements per cycle.
    pub max_substitutions: usize,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            default_language: GO.to_string(),
            default_font: DEFAULT_FONT.to_string(),
            default_font_size: DEFAULT_FONT_SIZE,
            default_theme: DARK_THEME.to_string(),
            default_shortcuts: false,
            max_substitutions: DEFAULT_MAX_SUBSTITUTIONS,
        }
    }
}

impl AnnotatorConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate every default against `registry`.
    pub fn resolve<'r>(&self, registry: &'r Registry) -> Result<Defaults<'r>, ConfigError> {
        let language = registry
            .language(&self.default_language)
            .ok_or_else(|| ConfigError::UnknownLanguage(self.default_language.clone()))?;
        let theme = registry
            .theme(&self.default_theme)
            .ok_or_else(|| ConfigError::UnknownTheme(self.default_theme.clone()))?;
        let font = registry
            .font(&self.default_font)
            .ok_or_else(|| ConfigError::UnknownFont(self.default_font.clone()))?;
        if !self.default_font_size.is_finite() || self.default_font_size <= 0.0 {
            return Err(ConfigError::InvalidFontSize(self.default_font_size));
        }

        Ok(Defaults {
            language,
            theme,
            font: font.to_string(),
            font_size: self.default_font_size,
            shortcuts: self.default_shortcuts,
        })
    }
}

/// Defaults resolved against a registry.
#[derive(Debug, Clone)]
pub struct Defaults<'r> {
    /// Default language.
    pub language: &'r Language,
    /// Default theme.
    pub theme: &'r Theme,
    /// Default font family.
    pub font: String,
    /// Default font size (points).
    pub font_size: f64,
    /// Default shortcut setting.
    pub shortcuts: bool,
}
