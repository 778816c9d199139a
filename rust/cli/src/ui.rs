//! UI helper functions for terminal output.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Section header in the box-drawing style used by every report.
pub fn write_header(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "\n{}", title)?;
    writeln!(out, "═══════════════════════════════════════")
}
