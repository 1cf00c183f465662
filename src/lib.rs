//! # cmdline_launch
//!
//! Round-trip-safe command-line encoding and synchronous process launching.
//!
//! Windows passes a child its arguments as a single string that the child's
//! C runtime splits again. `cmdline_launch` builds that string so the split
//! reproduces the original argument list exactly, including empty arguments,
//! embedded quotes and trailing backslashes, then creates the process, waits
//! for it and reports an [`ExecOutcome`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cmdline_launch::{encode, ExecOutcome, Launcher};
//!
//! let args = ["cmd", "/c", "echo", "say \"hi\""];
//! assert_eq!(encode(args).unwrap(), r#"cmd /c echo "say \"hi\"""#);
//!
//! let launcher = Launcher::builder().build();
//! match launcher.run(args) {
//!     ExecOutcome::Success { exit_code } => println!("exited with {:?}", exit_code),
//!     failure => eprintln!("{}", failure.message()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **Failures are values**: every call returns one of five [`ExecOutcome`] variants
//! - **No shell interpretation**: the string is split by the child's argument parser only
//! - **No leaks**: process and thread handles are released on every path
//! - **Single shot**: no retries, no timeout; the wait is unbounded
//!
//! ## Platform Support
//!
//! Windows hands the command line to `CreateProcessW` unchanged. On Unix the
//! same string is split with the MSVC runtime argument rules (see
//! [`decoder::parse_args`]) and the program is executed with the resulting
//! argv. The program token uses the argument rules as well, since `"` is a
//! legal character in Unix paths.

pub mod decoder;
pub mod encoder;
mod error;
mod launcher;
mod observer;
mod outcome;
mod sys;

// Public API
pub use decoder::{parse_args, parse_command_line};
pub use encoder::{encode, needs_quoting, quote_arg};
pub use error::{EncodeError, ExecError};
pub use launcher::{run, run_raw, Launcher, LauncherBuilder};
pub use observer::{Event, NullObserver, Observer, TracingObserver};
pub use outcome::ExecOutcome;
