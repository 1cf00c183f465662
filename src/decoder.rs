//! Command-line splitting following the MSVC C runtime convention.
//!
//! This is the parser a Windows child runs on the string it receives, and the
//! inverse of [`crate::encoder::encode`]. The program name uses simpler rules
//! than the arguments that follow it: quotes toggle and backslashes are
//! always literal.

use std::iter::Peekable;
use std::str::Chars;

/// Split a full command line into program name and arguments.
///
/// An empty line yields an empty list.
pub fn parse_command_line(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut chars = line.chars().peekable();
    let mut program = String::new();
    let mut in_quotes = false;
    for c in chars.by_ref() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => break,
            c => program.push(c),
        }
    }

    let mut args = vec![program];
    push_args(&mut chars, &mut args);
    args
}

/// Split a string using only the argument rules (no program-name token).
///
/// This is the exact inverse of [`crate::encoder::encode`] for every token.
pub fn parse_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    push_args(&mut line.chars().peekable(), &mut args);
    args
}

fn push_args(chars: &mut Peekable<Chars<'_>>, args: &mut Vec<String>) {
    loop {
        while chars.next_if(|&c| matches!(c, ' ' | '\t')).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut arg = String::new();
        let mut in_quotes = false;
        loop {
            let mut backslashes = 0;
            while chars.next_if_eq(&'\\').is_some() {
                backslashes += 1;
            }

            match chars.peek().copied() {
                Some('"') => {
                    chars.next();
                    push_backslashes(&mut arg, backslashes / 2);
                    if backslashes % 2 == 1 {
                        arg.push('"');
                    } else if in_quotes && chars.next_if_eq(&'"').is_some() {
                        // "" inside quotes is a literal quote
                        arg.push('"');
                    } else {
                        in_quotes = !in_quotes;
                    }
                }
                Some(' ' | '\t') if !in_quotes => {
                    push_backslashes(&mut arg, backslashes);
                    break;
                }
                None => {
                    push_backslashes(&mut arg, backslashes);
                    break;
                }
                Some(c) => {
                    chars.next();
                    push_backslashes(&mut arg, backslashes);
                    arg.push(c);
                }
            }
        }
        args.push(arg);
    }
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('\\').take(count));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line() {
        assert!(parse_command_line("").is_empty());
        assert!(parse_args("   \t ").is_empty());
    }

    #[test]
    fn test_simple_split() {
        assert_eq!(
            parse_command_line("git  commit\t-m msg"),
            vec!["git", "commit", "-m", "msg"]
        );
    }

    #[test]
    fn test_quoted_program_keeps_backslashes() {
        assert_eq!(
            parse_command_line("\"C:\\Program Files\\app.exe\" /S"),
            vec!["C:\\Program Files\\app.exe", "/S"]
        );
    }

    #[test]
    fn test_empty_quoted_argument() {
        assert_eq!(parse_args("a \"\" b"), vec!["a", "", "b"]);
        assert_eq!(parse_args("\"\""), vec![""]);
    }

    #[test]
    fn test_backslash_rules() {
        // Backslashes not followed by a quote are literal.
        assert_eq!(parse_args("a\\\\b"), vec!["a\\\\b"]);
        // 2n backslashes + quote: n backslashes, quote toggles.
        assert_eq!(parse_args("\"a\\\\\" b"), vec!["a\\", "b"]);
        // 2n+1 backslashes + quote: n backslashes and a literal quote.
        assert_eq!(parse_args("a\\\\\\\"b"), vec!["a\\\"b"]);
    }

    #[test]
    fn test_double_quote_inside_quotes() {
        assert_eq!(parse_args("\"a\"\"b\""), vec!["a\"b"]);
    }

    #[test]
    fn test_quotes_join_adjacent_text() {
        assert_eq!(parse_args("pre\"fix suf\"fix"), vec!["prefix suffix"]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(parse_args("\"a b"), vec!["a b"]);
    }
}
