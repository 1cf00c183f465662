//! Error types for cmdline_launch.
//!
//! This module defines two error categories:
//! - [`EncodeError`]: an argument or command line cannot be represented in the
//!   native command-line buffer - no process is created
//! - [`ExecError`]: the `?`-friendly form of every failing [`ExecOutcome`]
//!
//! [`ExecOutcome`]: crate::ExecOutcome

use thiserror::Error;

/// Encoding failure detected before any process is created.
///
/// All error messages are safe to log (argument contents are never included).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Argument is not valid Unicode and cannot be converted to UTF-16
    #[error("argument {index} is not valid unicode")]
    NotUnicode { index: usize },

    /// Argument contains a NUL character that would truncate the command line
    #[error("argument {index} contains an interior NUL character")]
    InteriorNul { index: usize },

    /// Pre-built command line contains a NUL character
    #[error("command line contains a NUL character at byte offset {offset}")]
    CommandLineNul { offset: usize },
}

/// Execution failure, mirroring the failing variants of `ExecOutcome`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// Argument list or command line was empty
    #[error("command or argument list is empty")]
    EmptyCommand,

    /// Command line could not be built
    #[error("failed to build command line: {0}")]
    Encoding(#[from] EncodeError),

    /// The operating system refused to create the process
    #[error("failed to create process (os error {code})")]
    LaunchFailed { code: i32 },

    /// The process was created but waiting for it failed
    #[error("failed to wait for process (os error {code})")]
    WaitFailed { code: i32 },
}
