//! Position codec: UTF-8 code string ↔ UTF-16 document offsets.
//!
//! The code string is manipulated as UTF-8 and addressed by **byte offsets at character
//! boundaries** ("natural" indices). The host document addresses text in UTF-16 code units
//! ("native" offsets). A [`PositionMap`] records the native offset of every character of a code
//! string, plus an end sentinel at `code.len()`.
//!
//! Maps are rebuilt from scratch after every change of the code string; the only in-place
//! update is [`PositionMap::apply_edit`], which shifts offsets after an external edit of known
//! size.

use std::collections::BTreeMap;
use std::ops::Range;

/// Number of UTF-16 code units needed to encode `text`.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Convert a byte offset inside `text` to a UTF-16 offset relative to the start of `text`.
///
/// Offsets past the end are clamped; offsets inside a character count the whole character.
pub fn byte_to_utf16(text: &str, byte_offset: usize) -> usize {
    text.char_indices()
        .take_while(|(i, _)| *i < byte_offset)
        .map(|(_, ch)| ch.len_utf16())
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    natural: usize,
    native: usize,
    width: usize,
}

/// Natural index → native offset table for one code string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMap {
    entries: Vec<Entry>,
    start: usize,
}

impl PositionMap {
    /// Map `code` whose first character sits at native offset `start`.
    pub fn new(code: &str, start: usize) -> Self {
        Self::with_offsets(code, start, &BTreeMap::new())
    }

    /// Map `code`, inserting extra native width before the characters at the given natural
    /// indices.
    ///
    /// This is how text excised from the code string (see [`crate::literals`]) keeps occupying
    /// its space in the document: `offsets[i]` units are skipped right before the character at
    /// byte `i` of the new string. A key equal to `code.len()` shifts only the end sentinel.
    pub fn with_offsets(code: &str, start: usize, offsets: &BTreeMap<usize, usize>) -> Self {
        let mut entries = Vec::with_capacity(code.len() + 1);
        let mut native = start;

        for (natural, ch) in code.char_indices() {
            if let Some(extra) = offsets.get(&natural) {
                native += extra;
            }
            let width = ch.len_utf16();
            entries.push(Entry {
                natural,
                native,
                width,
            });
            native += width;
        }

        if let Some(extra) = offsets.get(&code.len()) {
            native += extra;
        }
        entries.push(Entry {
            natural: code.len(),
            native,
            width: 0,
        });

        Self { entries, start }
    }

    fn position(&self, natural: usize) -> Option<usize> {
        self.entries
            .binary_search_by_key(&natural, |e| e.natural)
            .ok()
    }

    /// Native offset of the character starting at byte `natural`, or of the end sentinel.
    ///
    /// Returns `None` if `natural` is not a character boundary of the mapped string.
    pub fn native(&self, natural: usize) -> Option<usize> {
        self.position(natural).map(|idx| self.entries[idx].native)
    }

    /// Native span covered by the characters in `natural` (`start..end` byte range).
    ///
    /// The span runs from the first character's offset to the end of the last character, so
    /// it includes any excised text sitting between them.
    pub fn native_span(&self, natural: Range<usize>) -> Option<Range<usize>> {
        let first = self.position(natural.start)?;
        let last = self.position(natural.end)?;
        let start = self.entries[first].native;
        if last <= first {
            return Some(start..start);
        }
        let tail = &self.entries[last - 1];
        Some(start..tail.native + tail.width)
    }

    /// Whether the characters in `natural` are contiguous in the document (no excised text
    /// between any two of them).
    pub fn is_contiguous(&self, natural: Range<usize>) -> bool {
        let (Some(first), Some(last)) = (self.position(natural.start), self.position(natural.end))
        else {
            return false;
        };
        self.entries[first..last.max(first)]
            .windows(2)
            .all(|pair| pair[0].native + pair[0].width == pair[1].native)
    }

    /// Maximal non-empty byte ranges of the mapped string whose characters are contiguous in
    /// the document. Excised text always separates two ranges.
    pub fn contiguous_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;
        for pair in self.entries.windows(2) {
            if pair[0].native + pair[0].width != pair[1].native {
                ranges.push(start..pair[1].natural);
                start = pair[1].natural;
            }
        }
        if let Some(last) = self.entries.last()
            && start < last.natural
        {
            ranges.push(start..last.natural);
        }
        ranges
    }

    /// Shift every entry after byte `natural` by `delta` native units.
    ///
    /// Used to replay an external edit of known size without rebuilding the table. Entries at
    /// or before `natural` are unchanged.
    pub fn apply_edit(&mut self, natural: usize, delta: isize) {
        for entry in self.entries.iter_mut().filter(|e| e.natural > natural) {
            entry.native = entry.native.saturating_add_signed(delta);
        }
    }

    /// Native offset of the first character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Native offset just past the last character (including trailing excised text).
    pub fn end(&self) -> usize {
        self.entries.last().map_or(self.start, |e| e.native)
    }

    /// Number of mapped characters (the end sentinel is not counted).
    pub fn len(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Returns `true` if the mapped string was empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
