//! Style and text operations handed to the document-mutation layer.
//!
//! The pipeline never mutates the document itself. It produces a list of [`Operation`]s in the
//! document's native (UTF-16) addressing; the caller submits them as one all-or-nothing batch.

use annotator_core_lang::Color;
use serde::Serialize;

/// A half-open native range inside one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRange {
    /// Inclusive start offset (UTF-16 units).
    pub start: usize,
    /// Exclusive end offset (UTF-16 units).
    pub end: usize,
    /// Owning segment; empty for the body.
    pub segment_id: String,
}

impl DocRange {
    /// Create a range in `segment_id`.
    pub fn new(start: usize, end: usize, segment_id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            segment_id: segment_id.into(),
        }
    }

    /// Create a range in the body segment.
    pub fn body(start: usize, end: usize) -> Self {
        Self::new(start, end, "")
    }

    /// Length in UTF-16 units.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the range covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Boolean text attributes that can be toggled on a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAttribute {
    /// Bold.
    Bold,
    /// Italic.
    Italic,
    /// Underline.
    Underline,
    /// Small caps.
    SmallCaps,
    /// Strikethrough.
    Strikethrough,
}

/// One style or text mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    /// Text color of a range.
    #[serde(rename_all = "camelCase")]
    SetForegroundColor {
        /// Target range.
        range: DocRange,
        /// New color.
        color: Color,
    },
    /// Paragraph shading of a range (`None` = transparent).
    #[serde(rename_all = "camelCase")]
    SetBackgroundColor {
        /// Target range.
        range: DocRange,
        /// New color.
        color: Option<Color>,
    },
    /// Text highlight of a range (`None` = transparent).
    #[serde(rename_all = "camelCase")]
    SetHighlightColor {
        /// Target range.
        range: DocRange,
        /// New color.
        color: Option<Color>,
    },
    /// Background of the whole document.
    #[serde(rename_all = "camelCase")]
    SetDocumentBackground {
        /// New color.
        color: Color,
    },
    /// Font family and size (points) of a range.
    #[serde(rename_all = "camelCase")]
    SetFont {
        /// Target range.
        range: DocRange,
        /// Font family name.
        family: String,
        /// Size in points.
        size: f64,
    },
    /// Toggle a boolean attribute on a range.
    #[serde(rename_all = "camelCase")]
    SetAttribute {
        /// Target range.
        range: DocRange,
        /// Attribute being set.
        attribute: TextAttribute,
        /// New value.
        enabled: bool,
    },
    /// Reset every text style attribute of a range.
    #[serde(rename_all = "camelCase")]
    ClearTextFormatting {
        /// Target range.
        range: DocRange,
    },
    /// Delete a range of text.
    #[serde(rename_all = "camelCase")]
    DeleteText {
        /// Target range.
        range: DocRange,
    },
    /// Insert text at a native offset.
    #[serde(rename_all = "camelCase")]
    InsertText {
        /// Insertion offset (UTF-16 units).
        index: usize,
        /// Owning segment; empty for the body.
        segment_id: String,
        /// Inserted text.
        text: String,
    },
}

impl Operation {
    /// The range this operation targets, if it has one.
    pub fn range(&self) -> Option<&DocRange> {
        match self {
            Self::SetForegroundColor { range, .. }
            | Self::SetBackgroundColor { range, .. }
            | Self::SetHighlightColor { range, .. }
            | Self::SetFont { range, .. }
            | Self::SetAttribute { range, .. }
            | Self::ClearTextFormatting { range }
            | Self::DeleteText { range } => Some(range),
            Self::SetDocumentBackground { .. } | Self::InsertText { .. } => None,
        }
    }
}
