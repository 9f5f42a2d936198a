use std::io::Write;

use crate::backend::{ColumnMeta, RawCell, RowSink};
use crate::error::DbjsonError;
use crate::format::{encode_row, encode_row_map};
use crate::format_detect::OutputFormat;

/// Which row encoder an export runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeMode {
    /// Column metadata decides quoting; keys keep column order.
    #[default]
    Typed,
    /// Decoded values decide JSON types; keys are sorted.
    Map,
}

/// Streams encoded rows into a writer as a JSON array or JSON Lines.
///
/// The first encoding failure aborts the export. Call [`JsonRowSink::finish`]
/// once the backend is done; an array is unterminated until then.
pub struct JsonRowSink<W: Write> {
    out: W,
    format: OutputFormat,
    mode: EncodeMode,
    columns: Vec<ColumnMeta>,
    names: Vec<String>,
    rows: usize,
    started: bool,
}

impl<W: Write> JsonRowSink<W> {
    pub fn new(out: W, format: OutputFormat, mode: EncodeMode) -> Self {
        Self {
            out,
            format,
            mode,
            columns: Vec::new(),
            names: Vec::new(),
            rows: 0,
            started: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn open(&mut self) -> Result<(), DbjsonError> {
        if !self.started {
            if self.format == OutputFormat::JsonArray {
                self.out.write_all(b"[")?;
            }
            self.started = true;
        }
        Ok(())
    }

    /// Close the array (if any), flush, and hand the writer back.
    pub fn finish(mut self) -> Result<W, DbjsonError> {
        self.open()?;
        match self.format {
            OutputFormat::JsonArray => self.out.write_all(b"]\n")?,
            OutputFormat::JsonLines => {}
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> RowSink for JsonRowSink<W> {
    fn begin(&mut self, columns: &[ColumnMeta]) -> Result<(), DbjsonError> {
        self.columns = columns.to_vec();
        self.names = columns.iter().map(|c| c.name.clone()).collect();
        self.open()
    }

    fn row(&mut self, cells: &[RawCell]) -> Result<(), DbjsonError> {
        let encoded = match self.mode {
            EncodeMode::Typed => encode_row(&self.columns, cells)?,
            EncodeMode::Map => encode_row_map(&self.names, cells)?,
        };

        match self.format {
            OutputFormat::JsonArray => {
                if self.rows > 0 {
                    self.out.write_all(b",")?;
                }
                self.out.write_all(encoded.as_bytes())?;
            }
            OutputFormat::JsonLines => {
                self.out.write_all(encoded.as_bytes())?;
                self.out.write_all(b"\n")?;
            }
        }
        self.rows += 1;
        Ok(())
    }
}
