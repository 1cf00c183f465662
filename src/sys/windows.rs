use crate::observer::{Event, Observer};
use crate::outcome::ExecOutcome;
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::os::windows::io::{AsRawHandle, FromRawHandle, OwnedHandle};
use windows_sys::Win32::Foundation::{GetLastError, WAIT_FAILED};
use windows_sys::Win32::System::Threading::{
    CreateProcessW, GetExitCodeProcess, WaitForSingleObject, INFINITE, PROCESS_INFORMATION,
    STARTUPINFOW,
};

pub(crate) fn spawn_and_wait(command_line: &str, observer: &dyn Observer) -> ExecOutcome {
    // CreateProcessW may write into lpCommandLine, so every call owns its buffer.
    let mut buffer: Vec<u16> = OsStr::new(command_line)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    // SAFETY: both structs are plain C data for which all-zero is a valid value.
    let mut startup: STARTUPINFOW = unsafe { std::mem::zeroed() };
    startup.cb = std::mem::size_of::<STARTUPINFOW>() as u32;
    let mut info: PROCESS_INFORMATION = unsafe { std::mem::zeroed() };

    // SAFETY: `buffer` is NUL-terminated and outlives the call; every other
    // pointer is either null or points at a live local.
    let created = unsafe {
        CreateProcessW(
            std::ptr::null(),
            buffer.as_mut_ptr(),
            std::ptr::null(),
            std::ptr::null(),
            0,
            0,
            std::ptr::null(),
            std::ptr::null(),
            &startup,
            &mut info,
        )
    };
    if created == 0 {
        return ExecOutcome::LaunchFailure { code: last_error() };
    }

    // SAFETY: CreateProcessW succeeded, so both handles are open and owned by
    // this call. Dropping the wrappers closes them on every return below.
    let process = unsafe { OwnedHandle::from_raw_handle(info.hProcess) };
    let _thread = unsafe { OwnedHandle::from_raw_handle(info.hThread) };

    let pid = info.dwProcessId;
    observer.observe(&Event::Spawned { pid });

    let raw = process.as_raw_handle();
    // SAFETY: `raw` is valid while `process` is alive.
    if unsafe { WaitForSingleObject(raw, INFINITE) } == WAIT_FAILED {
        return ExecOutcome::WaitFailure { code: last_error() };
    }

    let mut exit_code: u32 = 0;
    // SAFETY: `raw` is valid and `exit_code` is a live local.
    let exit_code = if unsafe { GetExitCodeProcess(raw, &mut exit_code) } != 0 {
        let exit_code = exit_code as i32;
        observer.observe(&Event::Exited { pid, exit_code });
        Some(exit_code)
    } else {
        let code = last_error();
        observer.observe(&Event::ExitCodeUnavailable {
            pid,
            code: Some(code),
        });
        None
    };

    ExecOutcome::Success { exit_code }
}

fn last_error() -> i32 {
    // SAFETY: GetLastError only reads thread-local state.
    unsafe { GetLastError() as i32 }
}
