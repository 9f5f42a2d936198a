use std::borrow::Cow;

use serde::Serialize;

use crate::backend::{ColumnMeta, RawCell};
use crate::error::{DbjsonError, EncodeError};
use crate::format_escape::escape_into;
use crate::format_types::is_numeric;

fn check_arity(columns: usize, values: usize) -> Result<(), EncodeError> {
    if values == 0 {
        return Err(EncodeError::EmptyInput);
    }
    if columns != values {
        return Err(EncodeError::ArityMismatch { columns, values });
    }
    Ok(())
}

/// Encode one row as a JSON object, keys in column order.
///
/// Absent cells become `null` whatever the column type. Present cells under a
/// numeric column are written bare and unchecked: the driver's text for such
/// columns is trusted to be a valid JSON number. Everything else is quoted and
/// escaped. Column names are written verbatim.
pub fn encode_row(columns: &[ColumnMeta], cells: &[RawCell]) -> Result<String, EncodeError> {
    check_arity(columns.len(), cells.len())?;

    let mut buf: Vec<u8> = Vec::with_capacity(columns.len() * 16);
    buf.push(b'{');
    for (i, (col, cell)) in columns.iter().zip(cells).enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        buf.push(b'"');
        buf.extend_from_slice(col.name.as_bytes());
        buf.extend_from_slice(b"\":");

        let bytes: Option<Cow<'_, [u8]>> = match cell {
            _ if cell.is_absent() => None,
            RawCell::Bytes(b) => Some(Cow::Borrowed(b.as_slice())),
            RawCell::Value(v) => v.lexeme().map(Cow::Owned),
            RawCell::Null => None,
        };
        match bytes {
            None => buf.extend_from_slice(b"null"),
            Some(bytes) if is_numeric(col) => buf.extend_from_slice(&bytes),
            Some(bytes) => {
                buf.push(b'"');
                escape_into(&mut buf, &bytes);
                buf.push(b'"');
            }
        }
    }
    buf.push(b'}');

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Encode one row through a name-to-value map, typing each cell by its
/// decoded value instead of column metadata.
///
/// Raw bytes that parse as a number become a JSON number. Keys come out
/// sorted, not in column order.
pub fn encode_row_map<S: AsRef<str>>(names: &[S], cells: &[RawCell]) -> Result<String, EncodeError> {
    check_arity(names.len(), cells.len())?;

    let map: serde_json::Map<String, serde_json::Value> = names
        .iter()
        .zip(cells)
        .map(|(name, cell)| (name.as_ref().to_string(), cell.to_value().to_json()))
        .collect();

    Ok(serde_json::Value::Object(map).to_string())
}

/// Serialize any value with the general-purpose JSON rules.
pub fn encode_any<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, DbjsonError> {
    serde_json::to_vec(value).map_err(|e| DbjsonError::Format {
        message: e.to_string(),
    })
}
