use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::DbjsonError;

/// Buffered sink for export output: the file at `path`, or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>, DbjsonError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                return Err(DbjsonError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("parent directory does not exist: {}", parent.display()),
                )));
            }
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Print error to stderr in the contract format: error: <category>: <message>
pub fn print_error(err: &DbjsonError) {
    eprintln!("error: {}", err);
}

const MB: f64 = 1024.0 * 1024.0;

/// Resident and virtual size of this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub physical_bytes: usize,
    pub virtual_bytes: usize,
}

impl MemoryUsage {
    /// `None` where the platform does not report it.
    pub fn current() -> Option<Self> {
        memory_stats::memory_stats().map(|stats| Self {
            physical_bytes: stats.physical_mem,
            virtual_bytes: stats.virtual_mem,
        })
    }
}

/// One-line export summary: elapsed time, records read and, when known,
/// process memory in MB.
pub fn summary_line(elapsed_ms: u128, records: usize, memory: Option<MemoryUsage>) -> String {
    let mut line = format!("elapsed time: {} ms, {} records read", elapsed_ms, records);
    if let Some(mem) = memory {
        line.push_str(&format!(
            ", physical = {:.3} MB, virtual = {:.3} MB",
            mem.physical_bytes as f64 / MB,
            mem.virtual_bytes as f64 / MB
        ));
    }
    line
}

/// Print the export summary to stderr so it never mixes with JSON on stdout.
pub fn print_summary(elapsed_ms: u128, records: usize) {
    eprintln!("{}", summary_line(elapsed_ms, records, MemoryUsage::current()));
}

/// Text of the warning shown when the row limit cut a result.
pub fn truncation_message(limit: usize) -> String {
    format!("Showing {} rows. Use --no-limit to return all rows.", limit)
}

/// Print a truncation warning to stderr for interactive visibility.
/// Format: "warning: {message}"
pub fn print_truncation_warning(message: &str) {
    eprintln!("warning: {}", message);
}

/// Print the seeding result to stderr.
pub fn print_inserted(rows: usize, table: &str, elapsed_ms: u128) {
    eprintln!("{} rows inserted into {} ({} ms)", rows, table, elapsed_ms);
}
