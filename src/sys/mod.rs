//! Native process creation.
//!
//! Each backend exposes `spawn_and_wait`, which creates exactly one child from
//! a command-line string, blocks until it exits and releases every handle it
//! acquired before returning. It only ever returns `Success`,
//! `LaunchFailure` or `WaitFailure`.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub(crate) use unix::spawn_and_wait;
#[cfg(windows)]
pub(crate) use windows::spawn_and_wait;

#[cfg(not(any(unix, windows)))]
compile_error!("cmdline_launch supports only Windows and Unix targets");
