//! Shortcut substitution.
//!
//! Each replacement is mirrored in the document as a delete/insert pair placed with the map of
//! the moment, and the map is rebuilt before the next match is looked up.

use crate::error::AnnotateError;
use crate::instance::CodeInstance;
use crate::operations::{DocRange, Operation};
use crate::position::utf16_len;

impl CodeInstance<'_> {
    /// Apply the language's shortcut rules until none of them matches.
    ///
    /// Rules run in list order; each rule replaces its first match until it has no match left,
    /// and the whole list is retried while any rule changed the code. Empty matches are ignored.
    /// More than `limit` replacements fail with [`AnnotateError::SubstitutionLimit`].
    pub fn apply_shortcuts(&mut self, limit: usize) -> Result<Vec<Operation>, AnnotateError> {
        let language = self.language;
        let rules = language.shortcuts();
        let mut operations = Vec::new();
        let mut replaced = 0;

        loop {
            let before = replaced;
            for rule in rules {
                while let Some(found) = rule
                    .regex()
                    .find_iter(&self.code)
                    .find(|m| !m.is_empty())
                    .map(|m| m.range())
                {
                    if replaced == limit {
                        return Err(AnnotateError::SubstitutionLimit { limit });
                    }
                    replaced += 1;

                    let span = self
                        .positions()
                        .native_span(found.clone())
                        .ok_or(AnnotateError::UnmappedIndex { index: found.start })?;
                    let replacement = rule.replacement();
                    let matched_width = span.len();

                    operations.push(Operation::DeleteText {
                        range: DocRange::body(span.start, span.end),
                    });
                    if !replacement.is_empty() {
                        operations.push(Operation::InsertText {
                            index: span.start,
                            segment_id: String::new(),
                            text: replacement.to_string(),
                        });
                    }

                    self.code.replace_range(found, replacement);
                    self.end = (self.end + utf16_len(replacement)).saturating_sub(matched_width);
                    self.rebuild_positions();
                }
            }
            if replaced == before {
                break;
            }
        }

        if replaced > 0 {
            log::debug!("Applied {replaced} shortcut replacements");
        }
        Ok(operations)
    }
}
