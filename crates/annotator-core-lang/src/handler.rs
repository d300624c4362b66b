//! Pluggable format/run handlers.
//!
//! Formatting and sandboxed execution live outside this workspace. A [`Language`](crate::Language)
//! only holds trait objects implementing these contracts.

use thiserror::Error;

#[derive(Debug, Error)]
/// A handler could not produce a result (invalid code, unreachable sandbox, ...).
pub enum HandlerError {
    #[error("{0}")]
    /// The handler rejected the input; the message is meant for the document author.
    Failed(String),

    #[error("I/O error: {0}")]
    /// Spawning or talking to an external tool failed.
    Io(#[from] std::io::Error),
}

/// Output of running a program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Combined program output.
    pub output: String,
    /// Compiler or runtime errors.
    pub errors: String,
    /// Exit status reported by the sandbox.
    pub status_code: i32,
}

/// Rewrites a program into its canonical formatting.
pub trait Formatter: Send + Sync {
    /// Format `code`, returning the formatted program.
    fn format(&self, code: &str) -> Result<String, HandlerError>;
}

/// Runs a program in a sandbox.
pub trait Runner: Send + Sync {
    /// Run `code` and collect its output.
    fn run(&self, code: &str) -> Result<RunResult, HandlerError>;
}

impl<F> Formatter for F
where
    F: Fn(&str) -> Result<String, HandlerError> + Send + Sync,
{
    fn format(&self, code: &str) -> Result<String, HandlerError> {
        self(code)
    }
}

impl<F> Runner for F
where
    F: Fn(&str) -> Result<RunResult, HandlerError> + Send + Sync,
{
    fn run(&self, code: &str) -> Result<RunResult, HandlerError> {
        self(code)
    }
}
