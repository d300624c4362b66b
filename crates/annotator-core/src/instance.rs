//! Code instance extraction.
//!
//! A [`CodeInstance`] is built fresh from every snapshot: configuration segments (headers and
//! footers) are scanned for directives, and the whole body becomes the code. Inline markers such
//! as `<code>` in the body are plain code text.

use std::collections::BTreeMap;

use annotator_core_lang::{Language, Registry, Theme};

use crate::config::Defaults;
use crate::directives::{DirectiveGrammar, DirectiveParser, Trigger};
use crate::document::{Document, Segment};
use crate::error::AnnotateError;
use crate::operations::DocRange;
use crate::position::PositionMap;

/// Span of a configuration segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpan {
    /// Range covering all runs of the segment.
    pub range: DocRange,
    /// The segment holds only the residual newline the host keeps in empty segments.
    pub effectively_empty: bool,
}

impl SegmentSpan {
    fn of(segment: &Segment) -> Option<Self> {
        let (start, end) = segment.span()?;
        let effectively_empty = end.saturating_sub(start) == 1 && segment.text() == "\n";
        Some(Self {
            range: DocRange::new(start, end, segment.id.clone()),
            effectively_empty,
        })
    }
}

/// The code region of a document plus everything needed to annotate it.
#[derive(Debug, Clone)]
pub struct CodeInstance<'r> {
    /// Logical code text (UTF-8).
    pub code: String,
    /// Language of the code.
    pub language: &'r Language,
    /// Font family of the code.
    pub font: String,
    /// Font size of the code (points).
    pub font_size: f64,
    /// Theme.
    pub theme: &'r Theme,
    /// Whether shortcut substitution runs.
    pub shortcuts: bool,
    /// `#format` trigger.
    pub format: Option<Trigger>,
    /// `#run` trigger.
    pub run: Option<Trigger>,
    /// Native offset of the first code character in the body.
    pub start: usize,
    /// Native offset just past the code in the body.
    pub end: usize,
    /// Configuration segments keyed by segment id.
    pub segments: BTreeMap<String, SegmentSpan>,
    positions: PositionMap,
}

impl<'r> CodeInstance<'r> {
    /// Extract the code instance of `document`.
    ///
    /// Fails with [`AnnotateError::MissingBody`] or [`AnnotateError::EmptyCode`]; directive
    /// problems are only logged.
    pub fn extract(
        document: &Document,
        grammar: &DirectiveGrammar,
        registry: &'r Registry,
        defaults: &Defaults<'r>,
    ) -> Result<Self, AnnotateError> {
        let mut parser = DirectiveParser::new(grammar, registry);
        let mut segments = BTreeMap::new();

        for segment in document.config_segments() {
            for run in &segment.runs {
                parser.scan_run(run, &segment.id);
            }
            if let Some(span) = SegmentSpan::of(segment) {
                segments.insert(segment.id.clone(), span);
            }
        }

        let body = document.body().ok_or(AnnotateError::MissingBody)?;
        let code: String = body.runs.iter().map(|r| r.content.as_str()).collect();
        let (start, end) = body.span().ok_or(AnnotateError::EmptyCode)?;
        if code.is_empty() {
            return Err(AnnotateError::EmptyCode);
        }

        let directives = parser.finish(defaults);
        let positions = PositionMap::new(&code, start);
        if positions.end() != end {
            log::debug!(
                "Body runs are not contiguous: runs end at {end}, text ends at {}",
                positions.end()
            );
        }

        Ok(Self {
            code,
            language: directives.language,
            font: directives.font,
            font_size: directives.font_size,
            theme: directives.theme,
            shortcuts: directives.shortcuts,
            format: directives.format,
            run: directives.run,
            start,
            end,
            segments,
            positions,
        })
    }

    /// Range of the code in the body.
    pub fn range(&self) -> DocRange {
        DocRange::body(self.start, self.end)
    }

    /// The current position map.
    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    /// Rebuild the position map over the current code and update `end` from it.
    ///
    /// Must be called after every change of `code`.
    pub fn remap(&mut self) -> Result<(), AnnotateError> {
        if self.code.is_empty() {
            return Err(AnnotateError::EmptyCode);
        }
        self.rebuild_positions();
        self.end = self.positions.end();
        Ok(())
    }

    /// Rebuild the position map without touching `end`.
    pub(crate) fn rebuild_positions(&mut self) {
        self.positions = PositionMap::new(&self.code, self.start);
    }

    /// Replace the code with already-sanitized text and its precomputed map.
    ///
    /// Unlike [`remap`](Self::remap) the code may become empty here (e.g. code made only of
    /// comments) and `end` is left untouched.
    pub(crate) fn set_sanitized(&mut self, code: String, positions: PositionMap) {
        self.code = code;
        self.positions = positions;
    }
}

/// Extract with the built-in registry and default configuration.
#[cfg(test)]
pub(crate) fn extract_with_defaults(
    document: &Document,
) -> Result<CodeInstance<'static>, AnnotateError> {
    use crate::config::AnnotatorConfig;

    let registry: &'static Registry = Box::leak(Box::new(Registry::builtin().unwrap()));
    let defaults = AnnotatorConfig::default().resolve(registry).unwrap();
    let grammar = DirectiveGrammar::new().unwrap();
    CodeInstance::extract(document, &grammar, registry, &defaults)
}
