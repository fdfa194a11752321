use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all pincer operations.
#[derive(Debug, Error, Diagnostic)]
pub enum PincerError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable manifest file.
    #[error("Manifest error: {message}")]
    Manifest { message: String },

    /// A manifest line that could not be parsed. Malformed lines are fatal
    /// and reported with the offending line content.
    #[error("Parse error at line {line}: {message}\n  {content}")]
    #[diagnostic(help(
        "Each entry must follow `<package> <comparator><version>[, ...][; <marker>]`"
    ))]
    Parse {
        line: usize,
        content: String,
        message: String,
    },

    /// A constraint invariant was violated (e.g. contradictory bounds).
    #[error("Constraint error: {message}")]
    Constraint { message: String },

    /// Invalid or unreadable tool configuration.
    #[error("Config error: {message}")]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type PincerResult<T> = miette::Result<T>;
