#![warn(missing_docs)]
//! Annotator Core - code-region annotation for rich-text documents
//!
//! # Overview
//!
//! `annotator-core` turns a snapshot of a rich-text document into a batch of style and text
//! operations that syntax-highlight the code held in the document's body. Configuration comes
//! from italic directive tokens (`#lang=go`, `#theme=light`, ...) in headers and footers.
//!
//! The core never talks to the host editor: fetching snapshots, applying the batch and running
//! external formatters/sandboxes are left to the caller.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Annotator (per-cycle driver)               │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Highlighter (keywords → operations)        │
//! ├─────────────────────────────────────────────┤
//! │  Literal scanner (comments / strings)       │
//! ├─────────────────────────────────────────────┤
//! │  Shortcut substitution, format/run triggers │
//! ├─────────────────────────────────────────────┤
//! │  Instance extractor + directive parser      │
//! ├─────────────────────────────────────────────┤
//! │  Position map (UTF-8 bytes ↔ UTF-16 units)  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use annotator_core::{Annotator, AnnotatorConfig, Document, Operation, Run, Segment, TextStyle};
//! use annotator_core_lang::Registry;
//!
//! let registry = Registry::builtin()?;
//! let annotator = Annotator::new(&registry, &AnnotatorConfig::default())?;
//!
//! let document = Document::new(vec![
//!     Segment::header("kix.h", vec![Run::new("#lang=go #theme=light\n", 0, TextStyle::italic())]),
//!     Segment::body(vec![Run::new("x := 1 // one\n", 1, TextStyle::plain())]),
//! ]);
//!
//! let annotation = annotator.annotate(&document)?;
//! assert!(annotation
//!     .operations
//!     .iter()
//!     .any(|op| matches!(op, Operation::SetDocumentBackground { .. })));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Description
//!
//! - [`position`] - natural (UTF-8 byte) to native (UTF-16) offset map
//! - [`document`] - read-only snapshot model
//! - [`directives`] - directive token grammar and parser
//! - [`instance`] - code instance extraction
//! - [`literals`] - literal-range scanner built on parser combinators
//! - [`substitution`] - shortcut expansion
//! - [`highlight`] - regex keyword highlighter
//! - [`pipeline`] - per-cycle driver and operation emitter
//! - [`config`] - process-wide defaults
//!
//! # Unicode Support
//!
//! - UTF-8 internal encoding, addressed by byte offsets at character boundaries
//! - UTF-16 code unit addressing for every emitted operation
//! - Characters outside the BMP (emoji) occupy two native units

pub mod config;
pub mod directives;
pub mod document;
mod error;
pub mod highlight;
pub mod instance;
pub mod literals;
pub mod operations;
pub mod pipeline;
pub mod position;
pub mod substitution;

pub use config::{AnnotatorConfig, ConfigError, Defaults};
pub use directives::{DirectiveGrammar, DirectiveParser, DirectiveSet, Trigger};
pub use document::{Document, Run, Segment, SegmentKind, TextStyle};
pub use error::{AnnotateError, TriggerKind};
pub use highlight::RegexHighlighter;
pub use instance::{CodeInstance, SegmentSpan};
pub use literals::{Cursor, LiteralScan, StrCursor};
pub use operations::{DocRange, Operation, TextAttribute};
pub use pipeline::{Annotation, Annotator, Stage};
pub use position::PositionMap;
