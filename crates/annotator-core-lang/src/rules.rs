//! Literal-range, keyword and shortcut rules.

use regex::Regex;

use crate::error::LangError;
use crate::style::TokenStyle;

/// A bracketed literal region (comment or quoted string).
///
/// The scanner matches `start` literally, then consumes characters until `end` matches or the
/// input runs out. An unterminated literal extends to the end of the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRule {
    /// Opening symbol (e.g. `//`, `/*`, `"`).
    pub start: String,
    /// Closing symbol (e.g. `\n`, `*/`, `"`). The closing symbol is part of the literal.
    pub end: String,
    /// Style applied to the whole literal.
    pub style: TokenStyle,
}

impl LiteralRule {
    /// Create a rule. The start symbol must not be empty.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        style: TokenStyle,
    ) -> Result<Self, LangError> {
        let start = start.into();
        if start.is_empty() {
            return Err(LangError::EmptyLiteralStart);
        }
        Ok(Self {
            start,
            end: end.into(),
            style,
        })
    }

    /// A line comment running up to and including the next newline.
    pub fn line_comment(token: impl Into<String>) -> Result<Self, LangError> {
        Self::new(token, "\n", TokenStyle::Comment)
    }

    /// A block comment.
    pub fn block_comment(
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self, LangError> {
        Self::new(start, end, TokenStyle::Comment)
    }

    /// A string literal delimited by the same quote on both sides.
    pub fn quoted(quote: impl Into<String>) -> Result<Self, LangError> {
        let quote = quote.into();
        Self::new(quote.clone(), quote, TokenStyle::String)
    }
}

fn compile(pattern: &str) -> Result<Regex, LangError> {
    Regex::new(pattern).map_err(|source| LangError::Regex {
        pattern: pattern.to_string(),
        source,
    })
}

/// A single regex highlighting rule.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    regex: Regex,
    style: TokenStyle,
}

impl KeywordRule {
    /// Compile a keyword rule.
    pub fn new(pattern: &str, style: TokenStyle) -> Result<Self, LangError> {
        Ok(Self {
            regex: compile(pattern)?,
            style,
        })
    }

    /// The compiled pattern.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The style tag for matches.
    pub fn style(&self) -> TokenStyle {
        self.style
    }
}

/// A pattern → literal replacement rule (snippet expansion or character normalization).
#[derive(Debug, Clone)]
pub struct ShortcutRule {
    regex: Regex,
    replacement: String,
}

impl ShortcutRule {
    /// Compile a shortcut rule. The replacement is inserted literally (no capture expansion).
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, LangError> {
        Ok(Self {
            regex: compile(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// The compiled pattern.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The literal replacement text.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}
