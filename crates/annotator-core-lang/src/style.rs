//! Token style tags.
//!
//! Rules tag what they match with a [`TokenStyle`]; a [`Theme`](crate::Theme) maps tags to
//! actual colors. This keeps the language tables independent from the palette.

/// The kind of token a literal or keyword rule recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenStyle {
    /// Line or block comment.
    Comment,
    /// String, rune or raw string literal.
    String,
    /// Control-flow keyword (`if`, `for`, `return`, ...).
    Control,
    /// Declaration keyword (`func`, `type`, `var`, ...).
    Declaration,
    /// Primitive type name.
    Type,
    /// Builtin function.
    Builtin,
    /// Numeric literal.
    Number,
}
