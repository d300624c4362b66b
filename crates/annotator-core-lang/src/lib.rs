#![warn(missing_docs)]
//! `annotator-core-lang` - data-driven language configuration for `annotator-core`.
//!
//! This crate stays free of any document or position logic. It provides the tables the
//! annotation pipeline consults:
//!
//! - [`LiteralRule`]s (comments, quoted strings) in precedence order
//! - [`KeywordRule`]s tagged with a [`TokenStyle`]
//! - [`ShortcutRule`]s (snippet expansion, smart-quote normalization)
//! - [`Theme`]s mapping token styles to [`Color`]s
//! - optional [`Formatter`]/[`Runner`] handlers per [`Language`]
//!
//! Everything is collected in an immutable [`Registry`] built once at start-up.

pub mod color;
mod error;
pub mod font;
mod go;
mod handler;
mod language;
mod registry;
mod rules;
mod style;
mod theme;

pub use color::{Color, palette};
pub use error::LangError;
pub use go::{GO, GO_MAIN_SNIPPET, go_language};
pub use handler::{Formatter, HandlerError, RunResult, Runner};
pub use language::Language;
pub use registry::Registry;
pub use rules::{KeywordRule, LiteralRule, ShortcutRule};
pub use style::TokenStyle;
pub use theme::{DARK_THEME, LIGHT_THEME, Theme};
