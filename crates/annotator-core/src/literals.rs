//! Literal-range scanning (comments and quoted strings).
//!
//! Literal ranges are colored as a whole and then cut out of the code string, so keyword rules
//! never match inside a comment or a string. Cutting text out shifts every following character
//! to the left in the code string but not in the document. The width of each cut is therefore
//! recorded at the index where the cut now sits, and the [`PositionMap`] is rebuilt with those
//! widths re-inserted.
//!
//! Matching uses small parser combinators over a [`Cursor`]. Rules are tried in order at each
//! position and the first rule that matches wins.

use std::collections::BTreeMap;
use std::ops::Range;

use annotator_core_lang::{LiteralRule, Theme};

use crate::error::AnnotateError;
use crate::instance::CodeInstance;
use crate::operations::{DocRange, Operation};
use crate::position::{PositionMap, utf16_len};

/// Read-only position in a character sequence.
pub trait Cursor: Clone {
    /// Character under the cursor, or `None` at end of input.
    fn current(&self) -> Option<char>;
    /// The cursor moved past the current character. At end of input it stays put.
    fn advance(&self) -> Self;
    /// Byte offset of the cursor.
    fn offset(&self) -> usize;
}

/// A [`Cursor`] over a `&str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> StrCursor<'a> {
    /// A cursor at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Cursor for StrCursor<'_> {
    fn current(&self) -> Option<char> {
        self.text.get(self.pos..)?.chars().next()
    }

    fn advance(&self) -> Self {
        match self.current() {
            Some(ch) => Self {
                text: self.text,
                pos: self.pos + ch.len_utf8(),
            },
            None => *self,
        }
    }

    fn offset(&self) -> usize {
        self.pos
    }
}

/// A parser: on success, the parsed value and the cursor after it.
pub type Parser<'p, C, T> = Box<dyn Fn(C) -> Option<(T, C)> + 'p>;

/// Match one character satisfying `pred`.
pub fn expect_char<'p, C: Cursor + 'p>(pred: impl Fn(char) -> bool + 'p) -> Parser<'p, C, char> {
    Box::new(move |input: C| {
        let ch = input.current().filter(|ch| pred(*ch))?;
        Some((ch, input.advance()))
    })
}

/// Match `word` literally.
pub fn expect_word<'p, C: Cursor + 'p>(word: &'p str) -> Parser<'p, C, &'p str> {
    Box::new(move |input: C| {
        let mut cursor = input;
        for expected in word.chars() {
            let (_, next) = expect_char(move |ch| ch == expected)(cursor)?;
            cursor = next;
        }
        Some((word, cursor))
    })
}

/// Consume characters until `target` matches, or until input ends.
///
/// Always succeeds. The value is `Some` with the target's value if it was found (the target is
/// consumed too), or `None` if input ran out first.
pub fn search_until<'p, C: Cursor + 'p, T: 'p>(
    target: Parser<'p, C, T>,
) -> Parser<'p, C, Option<T>> {
    Box::new(move |input: C| {
        let mut cursor = input;
        loop {
            if let Some((value, next)) = target(cursor.clone()) {
                return Some((Some(value), next));
            }
            if cursor.current().is_none() {
                return Some((None, cursor));
            }
            cursor = cursor.advance();
        }
    })
}

/// Try each parser in order and return the first success.
pub fn select_any<'p, C: Cursor + 'p, T: 'p>(parsers: Vec<Parser<'p, C, T>>) -> Parser<'p, C, T> {
    Box::new(move |input: C| parsers.iter().find_map(|p| p(input.clone())))
}

/// Match a whole literal range of `rule`: its start symbol, then everything up to and including
/// its end symbol (or to end of input).
pub fn expect_literal<'p, C: Cursor + 'p>(rule: &'p LiteralRule) -> Parser<'p, C, &'p LiteralRule> {
    let open = expect_word::<C>(&rule.start);
    let body = search_until(expect_word::<C>(&rule.end));
    Box::new(move |input: C| {
        let (_, after_open) = open(input)?;
        let (_, after_body) = body(after_open)?;
        Some((rule, after_body))
    })
}

/// Result of [`scan_literals`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiteralScan {
    /// One color operation per literal range, in the document's coordinates.
    pub operations: Vec<Operation>,
    /// Byte ranges of the literals in the scanned code.
    pub removed: Vec<Range<usize>>,
    /// Native width of the removed text, keyed by where it sits in the sanitized code.
    pub offsets: BTreeMap<usize, usize>,
}

/// Find all literal ranges in `code`.
///
/// `positions` must map `code`; it is used to place the color operations. Adjacent literals (no
/// character between them) add their widths to the same offset key.
pub fn scan_literals(
    code: &str,
    positions: &PositionMap,
    rules: &[LiteralRule],
    theme: &Theme,
) -> Result<LiteralScan, AnnotateError> {
    let parser = select_any(rules.iter().map(expect_literal::<StrCursor>).collect());

    let mut scan = LiteralScan::default();
    let mut removed_bytes = 0;
    let mut adjacent_key: Option<usize> = None;
    let mut cursor = StrCursor::new(code);

    while cursor.current().is_some() {
        let start = cursor.offset();
        match parser(cursor) {
            Some((rule, next)) if next.offset() > start => {
                let end = next.offset();
                let width = utf16_len(&code[start..end]);
                let native = positions
                    .native(start)
                    .ok_or(AnnotateError::LiteralNotMapped { start, end })?;

                let key = *adjacent_key.get_or_insert(start - removed_bytes);
                *scan.offsets.entry(key).or_insert(0) += width;
                removed_bytes += end - start;

                scan.operations.push(Operation::SetForegroundColor {
                    range: DocRange::body(native, native + width),
                    color: theme.color(rule.style),
                });
                scan.removed.push(start..end);
                cursor = next;
            }
            _ => {
                adjacent_key = None;
                cursor = cursor.advance();
            }
        }
    }

    Ok(scan)
}

/// `code` with every range in `removed` (sorted, non-overlapping) cut out.
pub fn remove_ranges(code: &str, removed: &[Range<usize>]) -> String {
    let mut sanitized = String::with_capacity(code.len());
    let mut last = 0;
    for range in removed {
        sanitized.push_str(&code[last..range.start]);
        last = range.end;
    }
    sanitized.push_str(&code[last..]);
    sanitized
}

impl CodeInstance<'_> {
    /// Color every literal range and cut it out of the code.
    ///
    /// The returned operations are placed with the map as it was before the cut. Afterwards the
    /// code holds only non-literal text and the map keeps it at its original document position.
    pub fn remove_literals(&mut self) -> Result<Vec<Operation>, AnnotateError> {
        let scan = scan_literals(
            &self.code,
            self.positions(),
            self.language.literals(),
            self.theme,
        )?;
        if scan.removed.is_empty() {
            return Ok(scan.operations);
        }

        let sanitized = remove_ranges(&self.code, &scan.removed);
        let positions = PositionMap::with_offsets(&sanitized, self.start, &scan.offsets);
        log::debug!(
            "Removed {} literal ranges, {} of {} bytes left",
            scan.removed.len(),
            sanitized.len(),
            self.code.len()
        );
        self.set_sanitized(sanitized, positions);
        Ok(scan.operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotator_core_lang::{TokenStyle, go_language};
    use pretty_assertions::assert_eq;

    fn cursor_at(text: &str, pos: usize) -> StrCursor<'_> {
        StrCursor { text, pos }
    }

    #[test]
    fn test_cursor_walks_characters() {
        let c = StrCursor::new("é👋");
        assert_eq!(c.current(), Some('é'));
        let c = c.advance();
        assert_eq!(c.offset(), 2);
        let c = c.advance();
        assert_eq!(c.offset(), 6);
        assert_eq!(c.current(), None);
        assert_eq!(c.advance().offset(), 6);
    }

    #[test]
    fn test_expect_word() {
        let p = expect_word::<StrCursor>("/*");
        let (_, rest) = p(StrCursor::new("/* x")).unwrap();
        assert_eq!(rest.offset(), 2);
        assert!(p(StrCursor::new("/ *")).is_none());
        assert!(p(StrCursor::new("/")).is_none());
    }

    #[test]
    fn test_search_until_stops_after_target_or_at_end() {
        let p = search_until(expect_word::<StrCursor>("*/"));
        let (found, rest) = p(StrCursor::new("abc*/d")).unwrap();
        assert_eq!(found, Some("*/"));
        assert_eq!(rest.offset(), 5);

        let (found, rest) = p(StrCursor::new("abc")).unwrap();
        assert_eq!(found, None);
        assert_eq!(rest.offset(), 3);
    }

    #[test]
    fn test_unterminated_literal_runs_to_end() {
        let rule = LiteralRule::block_comment("/*", "*/").unwrap();
        let p = expect_literal::<StrCursor>(&rule);
        let (_, rest) = p(cursor_at("x /* never closed", 2)).unwrap();
        assert_eq!(rest.offset(), 17);
    }

    #[test]
    fn test_no_literals_is_identity() {
        let go = go_language().unwrap();
        let theme = Theme::dark();
        let code = "x := 1 + y\n";
        let positions = PositionMap::new(code, 1);
        let scan = scan_literals(code, &positions, go.literals(), &theme).unwrap();
        assert_eq!(scan, LiteralScan::default());
        assert_eq!(remove_ranges(code, &scan.removed), code);
    }

    #[test]
    fn test_single_literal_conservation() {
        let go = go_language().unwrap();
        let theme = Theme::dark();
        let code = "a /* 👋 */ b";
        let positions = PositionMap::new(code, 0);
        let scan = scan_literals(code, &positions, go.literals(), &theme).unwrap();

        assert_eq!(scan.removed, vec![2..12]);
        let sanitized = remove_ranges(code, &scan.removed);
        assert_eq!(sanitized, "a  b");
        assert_eq!(sanitized.len(), code.len() - 10);
        // "/* 👋 */" is 6 one-unit chars plus a two-unit emoji.
        assert_eq!(scan.offsets, BTreeMap::from([(2, 8)]));
        assert_eq!(
            scan.operations,
            vec![Operation::SetForegroundColor {
                range: DocRange::body(2, 10),
                color: theme.color(TokenStyle::Comment),
            }]
        );
    }

    #[test]
    fn test_adjacent_literals_share_one_offset_key() {
        let go = go_language().unwrap();
        let theme = Theme::dark();
        let code = "x\"a\"'b'// c\ny";
        let positions = PositionMap::new(code, 0);
        let scan = scan_literals(code, &positions, go.literals(), &theme).unwrap();

        assert_eq!(scan.removed, vec![1..4, 4..7, 7..12]);
        assert_eq!(scan.offsets, BTreeMap::from([(1, 11)]));
        assert_eq!(remove_ranges(code, &scan.removed), "xy");

        let rebuilt = PositionMap::with_offsets("xy", 0, &scan.offsets);
        assert_eq!(rebuilt.native(1), Some(12));
        assert_eq!(rebuilt.end(), positions.end());
    }

    #[test]
    fn test_first_rule_in_list_wins() {
        let theme = Theme::dark();
        // Both rules start with '/'; the string rule is listed first.
        let rules = vec![
            LiteralRule::new("/", "/", TokenStyle::String).unwrap(),
            LiteralRule::line_comment("//").unwrap(),
        ];
        let code = "//x/ y";
        let positions = PositionMap::new(code, 0);
        let scan = scan_literals(code, &positions, &rules, &theme).unwrap();
        // "//" is a complete string literal, then "/ y" is unterminated and runs to the end.
        assert_eq!(scan.removed, vec![0..2, 3..6]);

        let reversed: Vec<_> = rules.into_iter().rev().collect();
        let scan = scan_literals(code, &positions, &reversed, &theme).unwrap();
        assert_eq!(scan.removed, vec![0..6]);
        assert_eq!(
            scan.operations[0],
            Operation::SetForegroundColor {
                range: DocRange::body(0, 6),
                color: theme.color(TokenStyle::Comment),
            }
        );
    }

    #[test]
    fn test_unmapped_literal_is_an_error() {
        let go = go_language().unwrap();
        let theme = Theme::dark();
        let positions = PositionMap::new("x", 0);
        assert!(matches!(
            scan_literals("x // y", &positions, go.literals(), &theme),
            Err(AnnotateError::LiteralNotMapped { start: 2, end: 6 })
        ));
    }
}
