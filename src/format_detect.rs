use std::path::{Path, PathBuf};

use crate::error::DbjsonError;

/// How encoded rows are composed into an output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `[row,row,...]`
    #[default]
    JsonArray,
    /// One row per line.
    JsonLines,
}

impl OutputFormat {
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::JsonArray => "JSON array",
            OutputFormat::JsonLines => "JSON Lines",
        }
    }
}

/// Detect the output format from a file path extension.
/// Returns the format and the (possibly normalized) path.
///
/// - `.json` → JsonArray
/// - `.jsonl`, `.ndjson` → JsonLines
/// - No extension → appends `.json`, returns JsonArray
/// - Unrecognized → error with supported format list
pub fn detect_format(path: &Path) -> Result<(OutputFormat, PathBuf), DbjsonError> {
    let ext = match path.extension() {
        Some(e) => e.to_ascii_lowercase(),
        None => {
            let mut p = path.to_path_buf();
            p.set_extension("json");
            return Ok((OutputFormat::JsonArray, p));
        }
    };

    let format = match ext.to_str().unwrap_or("") {
        "json" => OutputFormat::JsonArray,
        "jsonl" | "ndjson" => OutputFormat::JsonLines,
        other => {
            return Err(DbjsonError::Format {
                message: format!(
                    "unsupported output format \".{other}\" \
                     (supported: .json, .jsonl, .ndjson)"
                ),
            });
        }
    };

    Ok((format, path.to_path_buf()))
}
