use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while building language, theme or font tables.
pub enum LangError {
    #[error("regex compile error for pattern '{pattern}': {source}")]
    /// A keyword or shortcut pattern failed to compile.
    Regex {
        /// The regex pattern string.
        pattern: String,
        /// The compiler error.
        source: regex::Error,
    },

    #[error("literal rule has an empty start symbol")]
    /// A literal-range rule cannot start with an empty symbol.
    EmptyLiteralStart,
}
