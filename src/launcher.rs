//! Synchronous process launching.
//!
//! The main entry point for cmdline_launch. A [`Launcher`] encodes an
//! argument list (or takes a pre-built command line), creates one child
//! process, blocks until it exits and reports an [`ExecOutcome`].

use crate::encoder::encode;
use crate::error::EncodeError;
use crate::observer::{Event, NullObserver, Observer, TracingObserver};
use crate::outcome::ExecOutcome;
use crate::sys;
use std::ffi::OsStr;
use std::fmt;
use std::sync::Arc;

/// Reported by the async wrappers when the runtime shut down before the
/// blocking task could start; no process was created.
const CANCELLED_CODE: i32 = -1;

/// Process launcher.
///
/// Holds no per-call state: each call encodes into its own buffer and owns
/// its process handles exclusively, so a `Launcher` can be cloned and shared
/// across threads freely.
///
/// Create using `Launcher::builder()` or `Launcher::default()`.
#[derive(Clone)]
pub struct Launcher {
    /// Receiver of diagnostics for every stage of a call.
    observer: Arc<dyn Observer>,
}

impl Launcher {
    /// Create a launcher that reports through `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new launcher builder.
    pub fn builder() -> LauncherBuilder {
        LauncherBuilder::new()
    }

    /// Encode `args` and run the resulting command line.
    ///
    /// The first element is the program. Blocks until the child exits; there
    /// is no timeout.
    ///
    /// # Returns
    ///
    /// - `EmptyCommand` if `args` is empty
    /// - `EncodingFailure` if an argument cannot be encoded
    /// - otherwise, the result of [`Launcher::run_raw`]
    pub fn run<I>(&self, args: I) -> ExecOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        match self.encode_args(args) {
            Ok(command_line) => self.execute(&command_line),
            Err(outcome) => self.fail(outcome),
        }
    }

    /// Run a pre-built command line.
    ///
    /// The string must already follow the quoting convention of
    /// [`crate::encode`]; its first token is the program.
    ///
    /// # Returns
    ///
    /// - `EmptyCommand` if `command_line` is empty
    /// - `EncodingFailure` if `command_line` contains a NUL character
    /// - `LaunchFailure` if the process could not be created
    /// - `WaitFailure` if waiting for the process failed
    /// - `Success` otherwise, even when the exit code is unavailable
    pub fn run_raw(&self, command_line: &str) -> ExecOutcome {
        if command_line.is_empty() {
            return self.fail(ExecOutcome::EmptyCommand);
        }
        if let Some(offset) = command_line.find('\0') {
            return self.fail(EncodeError::CommandLineNul { offset }.into());
        }
        self.execute(command_line)
    }

    /// Like [`Launcher::run`], but waits on tokio's blocking thread pool.
    ///
    /// Arguments are encoded before the task is scheduled.
    pub async fn run_async<I>(&self, args: I) -> ExecOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let command_line = match self.encode_args(args) {
            Ok(command_line) => command_line,
            Err(outcome) => return self.fail(outcome),
        };
        self.blocking(move |launcher| launcher.execute(&command_line))
            .await
    }

    /// Like [`Launcher::run_raw`], but waits on tokio's blocking thread pool.
    pub async fn run_raw_async(&self, command_line: impl Into<String>) -> ExecOutcome {
        let command_line = command_line.into();
        self.blocking(move |launcher| launcher.run_raw(&command_line))
            .await
    }

    fn encode_args<I>(&self, args: I) -> Result<String, ExecOutcome>
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let mut args = args.into_iter().peekable();
        if args.peek().is_none() {
            return Err(ExecOutcome::EmptyCommand);
        }
        encode(args).map_err(ExecOutcome::EncodingFailure)
    }

    fn execute(&self, command_line: &str) -> ExecOutcome {
        self.observer.observe(&Event::Executing { command_line });

        let outcome = sys::spawn_and_wait(command_line, self.observer.as_ref());
        if outcome.is_success() {
            self.observer.observe(&Event::Finished);
            outcome
        } else {
            self.fail(outcome)
        }
    }

    fn fail(&self, outcome: ExecOutcome) -> ExecOutcome {
        self.observer.observe(&Event::Failed { outcome: &outcome });
        outcome
    }

    async fn blocking<F>(&self, f: F) -> ExecOutcome
    where
        F: FnOnce(&Launcher) -> ExecOutcome + Send + 'static,
    {
        let launcher = self.clone();
        match tokio::task::spawn_blocking(move || f(&launcher)).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => self.fail(ExecOutcome::LaunchFailure {
                code: CANCELLED_CODE,
            }),
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self {
            observer: Arc::new(TracingObserver),
        }
    }
}

impl fmt::Debug for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Launcher").finish_non_exhaustive()
    }
}

/// Builder for `Launcher`.
#[derive(Clone)]
pub struct LauncherBuilder {
    /// Observer for the built launcher.
    observer: Arc<dyn Observer>,
}

impl LauncherBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            observer: Arc::new(TracingObserver),
        }
    }

    /// Set the observer that receives launcher diagnostics.
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Discard all diagnostics.
    pub fn null_observer(self) -> Self {
        self.observer(NullObserver)
    }

    /// Build the launcher.
    pub fn build(self) -> Launcher {
        Launcher {
            observer: self.observer,
        }
    }
}

impl Default for LauncherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LauncherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LauncherBuilder").finish_non_exhaustive()
    }
}

/// Encode `args` and run them with a default [`Launcher`].
pub fn run<I>(args: I) -> ExecOutcome
where
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    Launcher::default().run(args)
}

/// Run a pre-built command line with a default [`Launcher`].
pub fn run_raw(command_line: &str) -> ExecOutcome {
    Launcher::default().run_raw(command_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording() -> (Launcher, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let launcher = Launcher::builder()
            .observer(move |event: &Event<'_>| {
                sink.lock().unwrap().push(format!("{:?}", event));
            })
            .build();
        (launcher, log)
    }

    #[test]
    fn test_empty_args_rejected_without_spawning() {
        let (launcher, log) = recording();
        let none: Vec<String> = Vec::new();

        assert_eq!(launcher.run(&none), ExecOutcome::EmptyCommand);

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert!(log[0].starts_with("Failed"));
    }

    #[test]
    fn test_empty_command_line_rejected() {
        let launcher = Launcher::builder().null_observer().build();
        assert_eq!(launcher.run_raw(""), ExecOutcome::EmptyCommand);
    }

    #[test]
    fn test_encoding_failure_short_circuits() {
        let (launcher, log) = recording();

        let outcome = launcher.run(["prog", "a\0b"]);
        assert_eq!(
            outcome,
            ExecOutcome::EncodingFailure(EncodeError::InteriorNul { index: 1 })
        );
        assert!(!log.lock().unwrap().iter().any(|e| e.starts_with("Executing")));
    }

    #[test]
    fn test_raw_nul_rejected() {
        let launcher = Launcher::builder().null_observer().build();
        assert_eq!(
            launcher.run_raw("prog\0evil"),
            ExecOutcome::EncodingFailure(EncodeError::CommandLineNul { offset: 4 })
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_event_sequence_on_success() {
        let (launcher, log) = recording();

        let outcome = launcher.run(["true"]);
        assert_eq!(outcome, ExecOutcome::Success { exit_code: Some(0) });

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 4, "{:?}", log);
        assert_eq!(log[0], "Executing { command_line: \"true\" }");
        assert!(log[1].starts_with("Spawned"));
        assert!(log[2].starts_with("Exited"));
        assert!(log[2].ends_with("exit_code: 0 }"));
        assert_eq!(log[3], "Finished");
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_failure_reported() {
        let (launcher, log) = recording();

        let outcome = launcher.run(["/nonexistent/cmdline_launch/prog"]);
        assert!(matches!(outcome, ExecOutcome::LaunchFailure { code } if code != 0));

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 2, "{:?}", log);
        assert!(log[1].starts_with("Failed"));
    }

    #[test]
    fn test_launcher_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Launcher>();
    }
}
