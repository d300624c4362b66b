//! Language capability records.

use std::fmt;
use std::sync::Arc;

use crate::handler::{Formatter, Runner};
use crate::rules::{KeywordRule, LiteralRule, ShortcutRule};

/// A programming language and the capabilities the pipeline can use for it.
///
/// Missing capabilities are `None`; callers must check before invoking them.
#[derive(Clone)]
pub struct Language {
    name: String,
    literals: Vec<LiteralRule>,
    keywords: Vec<KeywordRule>,
    shortcuts: Vec<ShortcutRule>,
    formatter: Option<Arc<dyn Formatter>>,
    runner: Option<Arc<dyn Runner>>,
}

impl Language {
    /// Create a language with no rules and no handlers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            literals: Vec::new(),
            keywords: Vec::new(),
            shortcuts: Vec::new(),
            formatter: None,
            runner: None,
        }
    }

    /// Set the literal-range rules. Order matters: the first rule matching at a position wins.
    pub fn with_literals(mut self, literals: Vec<LiteralRule>) -> Self {
        self.literals = literals;
        self
    }

    /// Set the keyword rules.
    pub fn with_keywords(mut self, keywords: Vec<KeywordRule>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Set the shortcut rules, applied in order.
    pub fn with_shortcuts(mut self, shortcuts: Vec<ShortcutRule>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Attach a formatter.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Attach a runner.
    pub fn with_runner(mut self, runner: impl Runner + 'static) -> Self {
        self.runner = Some(Arc::new(runner));
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Literal-range rules in precedence order.
    pub fn literals(&self) -> &[LiteralRule] {
        &self.literals
    }

    /// Keyword rules.
    pub fn keywords(&self) -> &[KeywordRule] {
        &self.keywords
    }

    /// Shortcut rules.
    pub fn shortcuts(&self) -> &[ShortcutRule] {
        &self.shortcuts
    }

    /// The formatter, if the language has one.
    pub fn formatter(&self) -> Option<&dyn Formatter> {
        self.formatter.as_deref()
    }

    /// The runner, if the language has one.
    pub fn runner(&self) -> Option<&dyn Runner> {
        self.runner.as_deref()
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.name)
            .field("literals", &self.literals)
            .field("keywords", &self.keywords.len())
            .field("shortcuts", &self.shortcuts.len())
            .field("formatter", &self.formatter.is_some())
            .field("runner", &self.runner.is_some())
            .finish()
    }
}
