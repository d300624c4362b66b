//! Immutable lookup tables for languages, themes and fonts.
//!
//! A [`Registry`] is assembled once at start-up (builder-style) and then shared by reference.
//! Every lookup is case-insensitive and returns `None` for unknown keys.

use std::collections::HashMap;

use crate::error::LangError;
use crate::font::FONT_ALIASES;
use crate::go::{GO, go_language};
use crate::language::Language;
use crate::theme::Theme;

/// Language, theme and font tables.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    languages: HashMap<String, Language>,
    themes: HashMap<String, Theme>,
    fonts: HashMap<String, String>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in tables: Go, the `dark`/`light` themes and the font aliases.
    pub fn builtin() -> Result<Self, LangError> {
        let mut registry = Self::new()
            .with_language(GO, go_language()?)
            .with_theme(Theme::dark())
            .with_theme(Theme::light());
        for (alias, family) in FONT_ALIASES {
            registry = registry.with_font(alias, family);
        }
        Ok(registry)
    }

    /// Add or replace a language under `key`.
    pub fn with_language(mut self, key: &str, language: Language) -> Self {
        self.languages.insert(key.to_lowercase(), language);
        self
    }

    /// Add or replace a theme under its own name.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.themes.insert(theme.name.to_lowercase(), theme);
        self
    }

    /// Add or replace a font alias.
    pub fn with_font(mut self, alias: &str, family: &str) -> Self {
        self.fonts.insert(alias.to_lowercase(), family.to_string());
        self
    }

    /// Replace a registered language through `update` (e.g. to attach handlers).
    ///
    /// Unknown keys leave the registry unchanged.
    pub fn map_language(mut self, key: &str, update: impl FnOnce(Language) -> Language) -> Self {
        let key = key.to_lowercase();
        if let Some(language) = self.languages.remove(&key) {
            self.languages.insert(key, update(language));
        }
        self
    }

    /// Look up a language by directive name.
    pub fn language(&self, name: &str) -> Option<&Language> {
        self.languages.get(&name.to_lowercase())
    }

    /// Look up a theme by name.
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(&name.to_lowercase())
    }

    /// Resolve a font alias to its family name.
    pub fn font(&self, alias: &str) -> Option<&str> {
        self.fonts.get(&alias.to_lowercase()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::font::{CONSOLAS, COURIER_NEW};

    #[test]
    fn test_builtin_lookups_are_case_insensitive() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.language("GO").map(Language::name), Some("Go"));
        assert_eq!(registry.theme("Dark").map(|t| t.name.as_str()), Some("dark"));
        assert_eq!(registry.font("Courier_New"), Some(COURIER_NEW));
        assert_eq!(registry.font("consolas"), Some(CONSOLAS));
    }

    #[test]
    fn test_unknown_keys_are_none() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.language("cobol").is_none());
        assert!(registry.theme("solarized").is_none());
        assert!(registry.font("comic_sans").is_none());
    }

    #[test]
    fn test_map_language_attaches_handlers() {
        let registry = Registry::builtin()
            .unwrap()
            .map_language("go", |lang| {
                lang.with_formatter(|code: &str| {
                    Ok::<_, crate::HandlerError>(code.trim().to_string())
                })
            });
        let formatter = registry.language("go").and_then(Language::formatter).unwrap();
        assert_eq!(formatter.format("  x  ").unwrap(), "x");
    }
}
