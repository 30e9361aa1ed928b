//! Line-by-line script replay

use std::io::{self, BufRead, Write};
use lrukv::Cache;
use tracing::{debug, warn};

use crate::command::Command;

/// Counts from one replay run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub executed: usize,
    pub failed: usize,
}

/// Execute every command in `reader` against `cache`, writing replies to `out`
///
/// Blank lines and `#` comments are skipped. A malformed line is reported as
/// `ERR line N: ...` and replay moves on to the next line.
pub fn replay<R: BufRead, W: Write>(
    cache: &Cache,
    reader: R,
    out: &mut W,
    quiet: bool,
) -> io::Result<Summary> {
    let mut summary = Summary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match Command::parse(trimmed) {
            Ok(cmd) => {
                debug!(line = line_no, ?cmd, "executing");
                let reply = cmd.execute(cache);
                summary.executed += 1;
                if !quiet {
                    writeln!(out, "{}", reply)?;
                }
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed command");
                summary.failed += 1;
                writeln!(out, "ERR line {}: {}", line_no, e)?;
            }
        }
    }

    out.flush()?;
    Ok(summary)
}
