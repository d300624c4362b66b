//! Read-only document snapshot.
//!
//! A snapshot is produced by the (external) fetch layer once per cycle. It is made of
//! independently addressed segments (the body plus headers/footers), each a sequence of
//! styled runs carrying their own UTF-16 start/end offsets.

use serde::Deserialize;

use crate::position::utf16_len;

/// Character attributes of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    /// Bold text.
    pub bold: bool,
    /// Italic text (marks directive tokens in configuration segments).
    pub italic: bool,
    /// Underlined text (marks an active trigger token).
    pub underline: bool,
    /// Small caps.
    pub small_caps: bool,
    /// Strikethrough.
    pub strikethrough: bool,
}

impl TextStyle {
    /// Plain text.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Italic text.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    /// Italic, underlined text.
    pub fn italic_underlined() -> Self {
        Self {
            italic: true,
            underline: true,
            ..Self::default()
        }
    }
}

/// A span of text with uniform style.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    /// Text content (UTF-8).
    pub content: String,
    /// Character attributes.
    #[serde(default)]
    pub style: TextStyle,
    /// Inclusive start offset (UTF-16 units, segment-relative).
    pub start: usize,
    /// Exclusive end offset (UTF-16 units, segment-relative).
    pub end: usize,
}

impl Run {
    /// Create a run at `start`; the end offset is derived from the content.
    pub fn new(content: impl Into<String>, start: usize, style: TextStyle) -> Self {
        let content = content.into();
        let end = start + utf16_len(&content);
        Self {
            content,
            style,
            start,
            end,
        }
    }
}

/// Role of a segment in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    /// The main body; holds the code.
    Body,
    /// A page header; holds configuration directives.
    Header,
    /// A page footer; holds configuration directives.
    Footer,
}

/// An independently addressed region of the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Segment identifier used in ranges; empty for the body.
    #[serde(default)]
    pub id: String,
    /// Body, header or footer.
    pub kind: SegmentKind,
    /// Runs in document order.
    pub runs: Vec<Run>,
}

impl Segment {
    /// The body segment.
    pub fn body(runs: Vec<Run>) -> Self {
        Self {
            id: String::new(),
            kind: SegmentKind::Body,
            runs,
        }
    }

    /// A header segment.
    pub fn header(id: impl Into<String>, runs: Vec<Run>) -> Self {
        Self {
            id: id.into(),
            kind: SegmentKind::Header,
            runs,
        }
    }

    /// A footer segment.
    pub fn footer(id: impl Into<String>, runs: Vec<Run>) -> Self {
        Self {
            id: id.into(),
            kind: SegmentKind::Footer,
            runs,
        }
    }

    /// Whether this segment may carry configuration directives.
    pub fn is_config(&self) -> bool {
        matches!(self.kind, SegmentKind::Header | SegmentKind::Footer)
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.content.as_str()).collect()
    }

    /// Native span from the first run's start to the last run's end.
    pub fn span(&self) -> Option<(usize, usize)> {
        let first = self.runs.first()?;
        let last = self.runs.last()?;
        Some((first.start, last.end))
    }
}

/// A document snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// All segments. Exactly one is expected to be the body.
    pub segments: Vec<Segment>,
}

impl Document {
    /// Create a snapshot from segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The body segment, if present.
    pub fn body(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.kind == SegmentKind::Body)
    }

    /// Header and footer segments, in document order.
    pub fn config_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_config())
    }
}
