//! Plain-text rendering for the default (non-JSON) output mode.

use std::io::{self, Write};

use anysweep::{Error, Result};

use super::response::exit_code_for_error;

/// Human-readable form of a command's output.
pub trait TextReport {
    fn stdout_lines(&self) -> Vec<String>;

    fn stderr_lines(&self) -> Vec<String> {
        Vec::new()
    }
}

fn error_lines(err: &Error) -> Vec<String> {
    let mut lines = vec![format!("Error [{}]: {}", err.code.as_str(), err.describe())];
    lines.extend(err.hints.iter().map(|h| format!("  hint: {}", h.message)));
    lines
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Print a command result as text and return the process exit code.
pub fn print_text_result<T: TextReport>(result: Result<(T, i32)>) -> i32 {
    let (stdout_lines, stderr_lines, exit_code) = match result {
        Ok((report, exit_code)) => (report.stdout_lines(), report.stderr_lines(), exit_code),
        Err(err) => (Vec::new(), error_lines(&err), exit_code_for_error(err.code)),
    };

    if let Err(e) = write_lines(&mut io::stdout().lock(), &stdout_lines) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("Failed to write stdout: {}", e);
            return 1;
        }
    }
    let _ = write_lines(&mut io::stderr().lock(), &stderr_lines);

    exit_code
}
