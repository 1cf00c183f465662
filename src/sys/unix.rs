use crate::decoder::parse_args;
use crate::observer::{Event, Observer};
use crate::outcome::ExecOutcome;
use std::io;
use std::process::Command;

/// Reported when an I/O error carries no OS error code.
const UNKNOWN_OS_ERROR: i32 = -1;

/// Split `command_line` with the CRT argument rules, then execute the first
/// token with the rest as its argv.
///
/// The program token is split with the argument rules too: they are the exact
/// inverse of `encode`, and `"` is a legal character in Unix paths.
pub(crate) fn spawn_and_wait(command_line: &str, observer: &dyn Observer) -> ExecOutcome {
    let argv = parse_args(command_line);
    let Some((program, args)) = argv.split_first() else {
        return ExecOutcome::EmptyCommand;
    };

    let mut child = match Command::new(program).args(args).spawn() {
        Ok(child) => child,
        Err(e) => {
            return ExecOutcome::LaunchFailure {
                code: os_code(&e),
            }
        }
    };

    let pid = child.id();
    observer.observe(&Event::Spawned { pid });

    // `child` is dropped on both paths below, closing anything it holds.
    let status = match child.wait() {
        Ok(status) => status,
        Err(e) => {
            return ExecOutcome::WaitFailure {
                code: os_code(&e),
            }
        }
    };

    let exit_code = status.code();
    match exit_code {
        Some(exit_code) => observer.observe(&Event::Exited { pid, exit_code }),
        // Terminated by a signal
        None => observer.observe(&Event::ExitCodeUnavailable { pid, code: None }),
    }

    ExecOutcome::Success { exit_code }
}

fn os_code(e: &io::Error) -> i32 {
    e.raw_os_error().unwrap_or(UNKNOWN_OS_ERROR)
}
