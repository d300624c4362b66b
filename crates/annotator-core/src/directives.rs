//! Configuration directives.
//!
//! Directives are whitespace-delimited tokens inside **italic** runs of configuration segments:
//!
//! - `#lang=<name>`, `#font=<alias>`, `#size=<number>`, `#theme=<name>`
//! - `#shortcuts=enabled|disabled`
//! - `#format`, `#run`: trigger tokens whose on/off state is the token's **underline**
//!
//! Each directive is taken from its first valid occurrence. Unknown tokens and unknown values are
//! logged and skipped; defaults are applied once, in [`DirectiveSet::resolve`].

use annotator_core_lang::{Language, Registry, Theme};
use regex::Regex;

use crate::config::Defaults;
use crate::document::Run;
use crate::operations::DocRange;
use crate::position::{byte_to_utf16, utf16_len};

/// The format trigger token.
pub const FORMAT_TOKEN: &str = "#format";
/// The run trigger token.
pub const RUN_TOKEN: &str = "#run";

/// Compiled directive grammar.
#[derive(Debug, Clone)]
pub struct DirectiveGrammar {
    lang: Regex,
    font: Regex,
    size: Regex,
    theme: Regex,
    shortcuts: Regex,
}

impl DirectiveGrammar {
    /// Compile the directive patterns.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            lang: Regex::new(r"^#lang=([\w_]+)$")?,
            font: Regex::new(r"^#font=([\w_]+)$")?,
            size: Regex::new(r"^#size=(\d+(\.\d+)?)$")?,
            theme: Regex::new(r"^#theme=([\w_]+)$")?,
            shortcuts: Regex::new(r"^#shortcuts=(enabled|disabled)$")?,
        })
    }
}

/// A trigger token and its toggle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Whether the author switched the trigger on (token underlined).
    pub active: bool,
    /// Exact span of the token, used to switch it off again.
    pub range: DocRange,
}

/// Directive values collected from configuration segments, before defaults.
#[derive(Debug, Clone, Default)]
pub struct DirectiveSet<'r> {
    /// `#lang=`
    pub language: Option<&'r Language>,
    /// `#font=` (resolved family name)
    pub font: Option<String>,
    /// `#size=`
    pub font_size: Option<f64>,
    /// `#theme=`
    pub theme: Option<&'r Theme>,
    /// `#shortcuts=`
    pub shortcuts: Option<bool>,
    /// `#format`
    pub format: Option<Trigger>,
    /// `#run`
    pub run: Option<Trigger>,
}

/// Directive values with every default applied.
#[derive(Debug, Clone)]
pub struct ResolvedDirectives<'r> {
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
    /// Format trigger, if present.
    pub format: Option<Trigger>,
    /// Run trigger, if present.
    pub run: Option<Trigger>,
}

impl<'r> DirectiveSet<'r> {
    /// Fill every unset field from `defaults`.
    pub fn resolve(self, defaults: &Defaults<'r>) -> ResolvedDirectives<'r> {
        ResolvedDirectives {
            language: self.language.unwrap_or(defaults.language),
            font: self.font.unwrap_or_else(|| defaults.font.clone()),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            theme: self.theme.unwrap_or(defaults.theme),
            shortcuts: self.shortcuts.unwrap_or(defaults.shortcuts),
            format: self.format,
            run: self.run,
        }
    }
}

/// Whitespace-delimited tokens of `text` with their byte offsets.
pub fn tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text;
    let mut consumed = 0;
    std::iter::from_fn(move || {
        let trimmed = rest.trim_start();
        consumed += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            return None;
        }
        let len = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let token = &trimmed[..len];
        let offset = consumed;
        consumed += len;
        rest = &trimmed[len..];
        Some((offset, token))
    })
}

/// Text after the last whitespace of `content`, if `content` does not end in whitespace.
fn trailing_fragment(content: &str) -> Option<&str> {
    content
        .rsplit(char::is_whitespace)
        .next()
        .filter(|fragment| !fragment.is_empty())
}

/// Text before the first whitespace of `content`.
fn leading_fragment(content: &str) -> &str {
    let end = content.find(char::is_whitespace).unwrap_or(content.len());
    &content[..end]
}

/// The directive-like token formed by `fragment` followed by the start of `content`.
fn joined_token(fragment: &str, content: &str) -> Option<String> {
    let head = leading_fragment(content);
    if head.is_empty() {
        return None;
    }
    let joined = format!("{fragment}{head}");
    joined.starts_with('#').then_some(joined)
}

/// Accumulates directives while the extractor walks configuration segments.
#[derive(Debug)]
pub struct DirectiveParser<'g, 'r> {
    grammar: &'g DirectiveGrammar,
    registry: &'r Registry,
    set: DirectiveSet<'r>,
    /// Segment id and unterminated last token of the previous run.
    tail: Option<(String, String)>,
}

impl<'g, 'r> DirectiveParser<'g, 'r> {
    /// Start with an empty directive set.
    pub fn new(grammar: &'g DirectiveGrammar, registry: &'r Registry) -> Self {
        Self {
            grammar,
            registry,
            set: DirectiveSet::default(),
            tail: None,
        }
    }

    /// Scan the tokens of one run. Non-italic runs are ignored.
    ///
    /// Tokens never span runs. A token cut by a style change (a partly underlined `#format`)
    /// is reported with a warning naming both fragments.
    pub fn scan_run(&mut self, run: &Run, segment_id: &str) {
        let previous = self
            .tail
            .take()
            .filter(|(id, _)| id == segment_id)
            .map(|(_, fragment)| fragment);
        if let Some(fragment) = &previous
            && let Some(token) = joined_token(fragment, &run.content)
        {
            log::warn!(
                "Token `{token}` is split at offset {} into `{fragment}` and `{}`",
                run.start,
                leading_fragment(&run.content)
            );
        }
        self.tail = match trailing_fragment(&run.content) {
            Some(fragment) if fragment.len() == run.content.len() => {
                Some(previous.unwrap_or_default() + fragment)
            }
            Some(fragment) => Some(fragment.to_string()),
            None => None,
        }
        .map(|fragment| (segment_id.to_string(), fragment));

        if !run.style.italic {
            return;
        }
        for (offset, token) in tokens(&run.content) {
            let start = run.start + byte_to_utf16(&run.content, offset);
            let range = DocRange::new(start, start + utf16_len(token), segment_id);
            self.scan_token(token, range, run.style.underline);
        }
    }

    /// Interpret one token located at `range`; `underlined` is the token's toggle attribute.
    pub fn scan_token(&mut self, token: &str, range: DocRange, underlined: bool) {
        if token.eq_ignore_ascii_case(FORMAT_TOKEN) {
            record_trigger(&mut self.set.format, token, range, underlined);
            return;
        }
        if token.eq_ignore_ascii_case(RUN_TOKEN) {
            record_trigger(&mut self.set.run, token, range, underlined);
            return;
        }

        let grammar = self.grammar;
        if let Some(caps) = grammar.shortcuts.captures(token) {
            if self.set.shortcuts.is_some() {
                log::debug!("Ignoring duplicate directive `{token}`");
            } else {
                self.set.shortcuts = Some(&caps[1] == "enabled");
            }
            return;
        }

        if let Some(caps) = grammar.lang.captures(token) {
            if self.set.language.is_some() {
                log::debug!("Ignoring duplicate directive `{token}`");
            } else if let Some(language) = self.registry.language(&caps[1]) {
                self.set.language = Some(language);
            } else {
                log::warn!("Unknown language: `{}`", &caps[1]);
            }
            return;
        }

        if let Some(caps) = grammar.font.captures(token) {
            if self.set.font.is_some() {
                log::debug!("Ignoring duplicate directive `{token}`");
            } else if let Some(family) = self.registry.font(&caps[1]) {
                self.set.font = Some(family.to_string());
            } else {
                log::warn!("Unknown font: `{}`", &caps[1]);
            }
            return;
        }

        if let Some(caps) = grammar.size.captures(token) {
            if self.set.font_size.is_some() {
                log::debug!("Ignoring duplicate directive `{token}`");
            } else {
                match caps[1].parse::<f64>() {
                    Ok(size) if size > 0.0 && size.is_finite() => self.set.font_size = Some(size),
                    Ok(size) => log::warn!("Font size out of range: `{size}`"),
                    Err(e) => log::warn!("Failed to parse font size `{}`: {e}", &caps[1]),
                }
            }
            return;
        }

        if let Some(caps) = grammar.theme.captures(token) {
            if self.set.theme.is_some() {
                log::debug!("Ignoring duplicate directive `{token}`");
            } else if let Some(theme) = self.registry.theme(&caps[1]) {
                self.set.theme = Some(theme);
            } else {
                log::warn!("Unknown theme: `{}`", &caps[1]);
            }
            return;
        }

        log::warn!("Unexpected config token: `{token}`");
    }

    /// The directives collected so far.
    pub fn directives(&self) -> &DirectiveSet<'r> {
        &self.set
    }

    /// Finish scanning and apply defaults.
    pub fn finish(self, defaults: &Defaults<'r>) -> ResolvedDirectives<'r> {
        self.set.resolve(defaults)
    }
}

fn record_trigger(slot: &mut Option<Trigger>, token: &str, range: DocRange, underlined: bool) {
    if slot.is_some() {
        log::debug!("Ignoring duplicate trigger `{token}`");
        return;
    }
    *slot = Some(Trigger {
        active: underlined,
        range,
    });
}
