pub mod odbc;

use serde_json::Number;

use crate::error::DbjsonError;
use crate::format_types::RuntimeKind;
use crate::seed::Product;

/// Metadata for a single result column.
///
/// An empty `type_name` means the driver reported no declared type; the
/// classifier then looks at `runtime_kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub type_name: String,
    pub runtime_kind: Option<RuntimeKind>,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            runtime_kind: None,
        }
    }

    /// A column known only by the native kind of its decoded values.
    pub fn with_kind(name: impl Into<String>, kind: RuntimeKind) -> Self {
        Self {
            name: name.into(),
            type_name: String::new(),
            runtime_kind: Some(kind),
        }
    }
}

/// A decoded cell value. Its JSON type is fixed when it is built.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Number(Number),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Decode an uninterpreted cell.
    ///
    /// Numeric-looking text becomes a number, so `"007"` turns into `7`.
    /// Empty input is SQL NULL.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return CellValue::Null;
        }
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => return CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        };
        if let Ok(i) = text.parse::<i64>() {
            return CellValue::Number(Number::from(i));
        }
        if let Ok(f) = text.parse::<f64>()
            && let Some(n) = Number::from_f64(f)
        {
            return CellValue::Number(n);
        }
        CellValue::Text(text.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Textual form written into the metadata-driven row output.
    pub fn lexeme(&self) -> Option<Vec<u8>> {
        match self {
            CellValue::Null => None,
            CellValue::Number(n) => Some(n.to_string().into_bytes()),
            CellValue::Text(s) => Some(s.as_bytes().to_vec()),
            CellValue::Bool(b) => Some(if *b { b"true".to_vec() } else { b"false".to_vec() }),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Number(n) => serde_json::Value::Number(n.clone()),
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(Number::from(v))
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Number::from_f64(v).map_or(CellValue::Null, CellValue::Number)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

/// One cell as handed over by a backend, before JSON typing is decided.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Null,
    Bytes(Vec<u8>),
    Value(CellValue),
}

impl RawCell {
    /// NULL, empty bytes and a decoded null all serialize as `null`.
    pub fn is_absent(&self) -> bool {
        match self {
            RawCell::Null => true,
            RawCell::Bytes(b) => b.is_empty(),
            RawCell::Value(v) => v.is_null(),
        }
    }

    pub fn to_value(&self) -> CellValue {
        match self {
            RawCell::Null => CellValue::Null,
            RawCell::Bytes(b) => CellValue::from_bytes(b),
            RawCell::Value(v) => v.clone(),
        }
    }
}

impl From<&[u8]> for RawCell {
    fn from(b: &[u8]) -> Self {
        RawCell::Bytes(b.to_vec())
    }
}

impl From<Option<&[u8]>> for RawCell {
    fn from(b: Option<&[u8]>) -> Self {
        b.map_or(RawCell::Null, RawCell::from)
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Bytes(s.as_bytes().to_vec())
    }
}

impl From<CellValue> for RawCell {
    fn from(v: CellValue) -> Self {
        RawCell::Value(v)
    }
}

/// Receives a result set one row at a time, in fetch order.
pub trait RowSink {
    fn begin(&mut self, columns: &[ColumnMeta]) -> Result<(), DbjsonError>;
    fn row(&mut self, cells: &[RawCell]) -> Result<(), DbjsonError>;
}

/// What a finished query reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryStats {
    pub rows: usize,
    pub truncated: bool,
}

/// Trait for database backends. Calls block; run them off the async runtime.
pub trait Backend {
    fn query(
        &self,
        sql: &str,
        limit: Option<usize>,
        timeout_secs: u64,
        sink: &mut dyn RowSink,
    ) -> Result<QueryStats, DbjsonError>;

    /// Insert all products in one transaction. Returns the number inserted.
    fn insert_products(
        &self,
        table: &str,
        products: &mut dyn Iterator<Item = Product>,
    ) -> Result<usize, DbjsonError>;
}
