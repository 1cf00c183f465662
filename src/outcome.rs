//! Result of a single execution attempt.

use crate::error::{EncodeError, ExecError};
use std::fmt;

/// Outcome of one `run` / `run_raw` call.
///
/// Failures are values: the launcher never panics or retries, and every
/// variant is produced after all OS handles for the call have been released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The process was created and waited for.
    ///
    /// `exit_code` is `None` if it could not be retrieved (on Unix, also when
    /// the child was terminated by a signal).
    Success { exit_code: Option<i32> },

    /// The argument list or command line was empty; nothing was created.
    EmptyCommand,

    /// The command line could not be built; nothing was created.
    EncodingFailure(EncodeError),

    /// The OS refused to create the process.
    LaunchFailure { code: i32 },

    /// The process was created but waiting for it failed.
    WaitFailure { code: i32 },
}

impl ExecOutcome {
    /// Human-readable description of the variant.
    pub fn message(&self) -> &'static str {
        match self {
            ExecOutcome::Success { .. } => "Command executed successfully.",
            ExecOutcome::EmptyCommand => {
                "Execution failed: The command or argument list was empty."
            }
            ExecOutcome::EncodingFailure(_) => {
                "Execution failed: Could not build the command line string (e.g., encoding error)."
            }
            ExecOutcome::LaunchFailure { .. } => {
                "Execution failed: The process could not be created. Check system error logs."
            }
            ExecOutcome::WaitFailure { .. } => {
                "Execution failed: Waiting for the child process failed."
            }
        }
    }

    /// True only for `Success`, regardless of the child's exit code.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecOutcome::Success { .. })
    }

    /// The child's exit code, if the process ran and it was retrieved.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecOutcome::Success { exit_code } => *exit_code,
            _ => None,
        }
    }

    /// Convert into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<Option<i32>, ExecError> {
        match self {
            ExecOutcome::Success { exit_code } => Ok(exit_code),
            ExecOutcome::EmptyCommand => Err(ExecError::EmptyCommand),
            ExecOutcome::EncodingFailure(e) => Err(ExecError::Encoding(e)),
            ExecOutcome::LaunchFailure { code } => Err(ExecError::LaunchFailed { code }),
            ExecOutcome::WaitFailure { code } => Err(ExecError::WaitFailed { code }),
        }
    }
}

impl fmt::Display for ExecOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;
        match self {
            ExecOutcome::Success {
                exit_code: Some(code),
            } => write!(f, " (exit code {})", code),
            ExecOutcome::EncodingFailure(e) => write!(f, " ({})", e),
            ExecOutcome::LaunchFailure { code } | ExecOutcome::WaitFailure { code } => {
                write!(f, " (os error {})", code)
            }
            _ => Ok(()),
        }
    }
}

impl From<EncodeError> for ExecOutcome {
    fn from(e: EncodeError) -> Self {
        ExecOutcome::EncodingFailure(e)
    }
}
