//! Regex keyword highlighting over sanitized code.

use annotator_core_lang::{KeywordRule, Theme};
use regex::Match;

use crate::operations::{DocRange, Operation};
use crate::position::PositionMap;

/// Colors keyword matches.
///
/// Meant to run on code whose literal ranges were already removed, with the map rebuilt for it.
#[derive(Debug, Clone, Copy)]
pub struct RegexHighlighter<'a> {
    rules: &'a [KeywordRule],
}

impl<'a> RegexHighlighter<'a> {
    /// Highlighter applying `rules` in order.
    pub fn new(rules: &'a [KeywordRule]) -> Self {
        Self { rules }
    }

    /// The rules.
    pub fn rules(&self) -> &'a [KeywordRule] {
        self.rules
    }

    /// Run every rule over `code` and return one foreground-color operation per match.
    ///
    /// Each piece of `code` that is contiguous in the document is matched on its own, so a
    /// removed literal acts as a text boundary: no match spans it, and `\b` holds at both
    /// of its sides. Matches of one rule never overlap each other; matches of different rules
    /// may.
    pub fn highlight(&self, code: &str, positions: &PositionMap, theme: &Theme) -> Vec<Operation> {
        let pieces = positions.contiguous_ranges();
        let mut operations = Vec::new();

        for rule in self.rules {
            let color = theme.color(rule.style());
            for piece in &pieces {
                let Some(text) = code.get(piece.clone()) else {
                    continue;
                };
                for m in rule.regex().find_iter(text) {
                    if let Some(range) = range_from_match(positions, piece.start, &m) {
                        operations.push(Operation::SetForegroundColor { range, color });
                    }
                }
            }
        }

        operations
    }
}

fn range_from_match(positions: &PositionMap, piece_start: usize, m: &Match<'_>) -> Option<DocRange> {
    if m.is_empty() {
        return None;
    }

    let natural = piece_start + m.start()..piece_start + m.end();
    let span = positions.native_span(natural)?;
    if span.is_empty() {
        return None;
    }

    Some(DocRange::body(span.start, span.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotator_core_lang::{TokenStyle, go_language};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_go_keywords_map_to_document_offsets() {
        let go = go_language().unwrap();
        let theme = Theme::dark();
        // '👋' takes two units, so "return" starts at 1 + 1 + 2 + 1 = 5.
        let code = "x👋 return 42\n";
        let positions = PositionMap::new(code, 1);
        let ops = RegexHighlighter::new(go.keywords()).highlight(code, &positions, &theme);

        assert_eq!(
            ops,
            vec![
                Operation::SetForegroundColor {
                    range: DocRange::body(5, 11),
                    color: theme.color(TokenStyle::Control),
                },
                Operation::SetForegroundColor {
                    range: DocRange::body(12, 14),
                    color: theme.color(TokenStyle::Number),
                },
            ]
        );
    }

    #[test]
    fn test_match_across_removed_literal_is_skipped() {
        let go = go_language().unwrap();
        let theme = Theme::dark();
        // "re/**/turn" in the document, sanitized to "return".
        let code = "return";
        let positions = PositionMap::with_offsets(code, 0, &BTreeMap::from([(2, 4)]));
        let ops = RegexHighlighter::new(go.keywords()).highlight(code, &positions, &theme);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_removed_literal_is_a_word_boundary() {
        let go = go_language().unwrap();
        let theme = Theme::dark();
        // "return err// bad\nif x {}\n" sanitized: the comment and its newline are gone.
        let code = "return errif x {}\n";
        let positions = PositionMap::with_offsets(code, 1, &BTreeMap::from([(10, 7)]));
        let ops = RegexHighlighter::new(go.keywords()).highlight(code, &positions, &theme);
        assert_eq!(
            ops,
            vec![
                Operation::SetForegroundColor {
                    range: DocRange::body(1, 7),
                    color: theme.color(TokenStyle::Control),
                },
                Operation::SetForegroundColor {
                    range: DocRange::body(18, 20),
                    color: theme.color(TokenStyle::Control),
                },
            ]
        );
    }

    #[test]
    fn test_match_after_removed_literal_is_shifted() {
        let go = go_language().unwrap();
        let theme = Theme::dark();
        // `"s" if` in the document, sanitized to ` if`.
        let code = " if";
        let positions = PositionMap::with_offsets(code, 10, &BTreeMap::from([(0, 3)]));
        let ops = RegexHighlighter::new(go.keywords()).highlight(code, &positions, &theme);
        assert_eq!(
            ops,
            vec![Operation::SetForegroundColor {
                range: DocRange::body(14, 16),
                color: theme.color(TokenStyle::Control),
            }]
        );
    }
}
