use thiserror::Error;

use crate::config::ConfigError;

/// Which trigger directive asked for a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// `#format`
    Format,
    /// `#run`
    Run,
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format => write!(f, "format"),
            Self::Run => write!(f, "run"),
        }
    }
}

#[derive(Debug, Error)]
/// Errors that abort an annotation cycle.
///
/// No operations are produced for an aborted cycle, so the document keeps the state of the last
/// successful one.
pub enum AnnotateError {
    #[error("document has no body segment")]
    /// The snapshot has no body to take code from.
    MissingBody,

    #[error("code must not be empty")]
    /// The code region is empty (the host always keeps at least a newline).
    EmptyCode,

    #[error("natural index {index} is not mapped to a document offset")]
    /// A consumer asked for a position the current map does not hold.
    UnmappedIndex {
        /// Byte offset into the code string.
        index: usize,
    },

    #[error("literal range {start}..{end} is not mapped to a document offset")]
    /// A recognized literal range could not be located in the position map.
    LiteralNotMapped {
        /// Start byte offset.
        start: usize,
        /// End byte offset.
        end: usize,
    },

    #[error("no {trigger} handler registered for language `{language}`")]
    /// A trigger was activated for a language lacking the matching handler.
    MissingHandler {
        /// Language display name.
        language: String,
        /// The activated trigger.
        trigger: TriggerKind,
    },

    #[error("shortcut substitution did not settle after {limit} replacements")]
    /// Shortcut rules kept matching their own output.
    SubstitutionLimit {
        /// Configured replacement limit.
        limit: usize,
    },

    #[error("regex error: {0}")]
    /// A built-in pattern failed to compile.
    Regex(#[from] regex::Error),

    #[error(transparent)]
    /// The configuration could not be loaded or resolved.
    Config(#[from] ConfigError),
}

impl AnnotateError {
    /// Returns `true` for misconfiguration that the polling loop should stop on, rather than
    /// retrying on the next cycle.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingHandler { .. } | Self::Regex(_) | Self::Config(_)
        )
    }
}
