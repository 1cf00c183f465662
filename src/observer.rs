//! Diagnostics for the launcher.
//!
//! The launcher reports each stage of a call as an [`Event`] instead of
//! printing. The default [`TracingObserver`] turns events into `tracing`
//! records; tests can pass a closure or [`NullObserver`].

use crate::outcome::ExecOutcome;

/// A stage of one execution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    /// About to create a process for this command line.
    Executing { command_line: &'a str },

    /// Process created.
    Spawned { pid: u32 },

    /// Process exited and its exit code was retrieved.
    Exited { pid: u32, exit_code: i32 },

    /// Process exited but its exit code is unknown.
    ///
    /// `code` is the OS error from the retrieval call, when there was one.
    ExitCodeUnavailable { pid: u32, code: Option<i32> },

    /// The call is returning a failure outcome.
    Failed { outcome: &'a ExecOutcome },

    /// The call completed successfully and all handles are closed.
    Finished,
}

/// Receiver of launcher diagnostics.
pub trait Observer: Send + Sync {
    fn observe(&self, event: &Event<'_>);
}

impl<F> Observer for F
where
    F: Fn(&Event<'_>) + Send + Sync,
{
    fn observe(&self, event: &Event<'_>) {
        self(event)
    }
}

/// Emits every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &Event<'_>) {
        match event {
            Event::Executing { command_line } => {
                tracing::info!(command_line = %command_line, "Executing command line");
            }
            Event::Spawned { pid } => {
                tracing::info!(pid, "Process created");
            }
            Event::Exited { pid, exit_code } => {
                tracing::info!(pid, exit_code, "Process exited");
            }
            Event::ExitCodeUnavailable { pid, code } => {
                tracing::warn!(pid, code = ?code, "Failed to get process exit code");
            }
            Event::Failed { outcome } => {
                tracing::error!(outcome = %outcome, "Command execution failed");
            }
            Event::Finished => {
                tracing::info!("Command execution finished");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&self, _event: &Event<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_observer() {
        let seen = Mutex::new(Vec::new());
        let observer = |event: &Event<'_>| {
            seen.lock().unwrap().push(format!("{:?}", event));
        };

        observer.observe(&Event::Spawned { pid: 42 });
        observer.observe(&Event::Finished);

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["Spawned { pid: 42 }".to_string(), "Finished".to_string()]
        );
    }

    #[test]
    fn test_builtin_observers_accept_all_events() {
        let outcome = ExecOutcome::WaitFailure { code: 6 };
        let events = [
            Event::Executing { command_line: "prog \"a b\"" },
            Event::Spawned { pid: 1 },
            Event::Exited { pid: 1, exit_code: 0 },
            Event::ExitCodeUnavailable { pid: 1, code: None },
            Event::Failed { outcome: &outcome },
            Event::Finished,
        ];
        for event in &events {
            TracingObserver.observe(event);
            NullObserver.observe(event);
        }
    }
}
