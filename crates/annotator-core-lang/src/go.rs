//! Built-in Go language tables.
//!
//! Keyword patterns follow the VSCode Go grammar.

use crate::error::LangError;
use crate::language::Language;
use crate::rules::{KeywordRule, LiteralRule, ShortcutRule};
use crate::style::TokenStyle;

/// Registry key of the Go language.
pub const GO: &str = "go";

/// Snippet inserted by the `gomain` shortcut.
pub const GO_MAIN_SNIPPET: &str = "package main\n\nimport (\n\t\"fmt\"\n)\n\nfunc main() {\n\tfmt.Println(\"Hello, World!\")\n}\n";

/// Build the Go language without handlers.
///
/// Literal precedence: line comment, block comment, double quote, single quote, backtick.
pub fn go_language() -> Result<Language, LangError> {
    let literals = vec![
        LiteralRule::line_comment("//")?,
        LiteralRule::block_comment("/*", "*/")?,
        LiteralRule::quoted("\"")?,
        LiteralRule::quoted("'")?,
        LiteralRule::quoted("`")?,
    ];

    let keywords = vec![
        KeywordRule::new(
            r"\b(break|case|continue|default|defer|else|fallthrough|for|go|goto|if|range|return|select|switch)\b",
            TokenStyle::Control,
        )?,
        KeywordRule::new(
            r"\b(chan|const|func|interface|map|struct|true|false|nil|iota|package|type|import|var)\b",
            TokenStyle::Declaration,
        )?,
        KeywordRule::new(
            r"\b(bool|byte|error|(complex(64|128)|float(32|64)|u?int(8|16|32|64)?)|rune|string|uintptr)\b",
            TokenStyle::Type,
        )?,
        KeywordRule::new(
            r"\b(append|cap|close|complex|copy|delete|imag|len|make|new|panic|print|println|real|recover)\b",
            TokenStyle::Builtin,
        )?,
        KeywordRule::new(r"\b\d+\b", TokenStyle::Number)?,
    ];

    let shortcuts = vec![
        ShortcutRule::new("[\u{201C}\u{201D}]", "\"")?,
        ShortcutRule::new("[\u{2018}\u{2019}]", "'")?,
        ShortcutRule::new(r"\bgomain\b", GO_MAIN_SNIPPET)?,
    ];

    Ok(Language::new("Go")
        .with_literals(literals)
        .with_keywords(keywords)
        .with_shortcuts(shortcuts))
}
