//! Command-line encoding following the MSVC C runtime convention.
//!
//! Windows hands a child process its arguments as one string, and the child's
//! runtime splits it again. The rules implemented here are the inverse of
//! that split (see [`crate::decoder`]), so every argument list survives the
//! round trip with its boundaries intact:
//!
//! - An argument that is non-empty and has no space, tab or `"` is emitted verbatim.
//! - Anything else is wrapped in `"`; a run of `n` backslashes becomes `2n+1`
//!   backslashes before a literal `"`, `2n` before the closing quote, and
//!   stays `n` before any other character.

use crate::error::EncodeError;
use std::borrow::Cow;
use std::ffi::OsStr;

/// Returns true if `arg` must be wrapped in double quotes.
pub fn needs_quoting(arg: &str) -> bool {
    arg.is_empty() || arg.contains([' ', '\t', '"'])
}

/// Quote a single argument.
///
/// Borrows the input when it can be emitted verbatim.
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if !needs_quoting(arg) {
        return Cow::Borrowed(arg);
    }
    let mut out = String::with_capacity(arg.len() + 2);
    push_quoted(arg, &mut out);
    Cow::Owned(out)
}

/// Encode an argument list into a single command-line string.
///
/// The first element is the program. Arguments are joined with a single
/// space; an empty list yields an empty string, which launchers treat as
/// an empty command.
///
/// # Errors
///
/// - `EncodeError::NotUnicode` if an argument is not valid Unicode
/// - `EncodeError::InteriorNul` if an argument contains a NUL character
pub fn encode<I>(args: I) -> Result<String, EncodeError>
where
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    let mut line = String::new();

    for (index, arg) in args.into_iter().enumerate() {
        let arg = arg
            .as_ref()
            .to_str()
            .ok_or(EncodeError::NotUnicode { index })?;
        if arg.contains('\0') {
            return Err(EncodeError::InteriorNul { index });
        }

        if index > 0 {
            line.push(' ');
        }
        if needs_quoting(arg) {
            push_quoted(arg, &mut line);
        } else {
            line.push_str(arg);
        }
    }

    Ok(line)
}

fn push_quoted(arg: &str, out: &mut String) {
    out.push('"');

    let mut chars = arg.chars().peekable();
    loop {
        let mut backslashes = 0;
        while chars.next_if_eq(&'\\').is_some() {
            backslashes += 1;
        }

        match chars.next() {
            None => {
                // Doubled so the closing quote stays a delimiter.
                push_backslashes(out, backslashes * 2);
                break;
            }
            Some('"') => {
                push_backslashes(out, backslashes * 2 + 1);
                out.push('"');
            }
            Some(c) => {
                push_backslashes(out, backslashes);
                out.push(c);
            }
        }
    }

    out.push('"');
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('\\').take(count));
}
