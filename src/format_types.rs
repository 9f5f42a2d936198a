use odbc_api::DataType;

use crate::backend::ColumnMeta;

/// Native representation of a decoded value, used to classify columns that
/// carry no declared type name.
///
/// Discriminants are stable codes. All signed/unsigned integer widths and both
/// float widths form the contiguous range `2..=14`; that range is what counts
/// as numeric. `Bool` sits just below it and is quoted like any other text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RuntimeKind {
    Invalid = 0,
    Bool = 1,
    Int = 2,
    I8 = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Uint = 7,
    U8 = 8,
    U16 = 9,
    U32 = 10,
    U64 = 11,
    Usize = 12,
    F32 = 13,
    F64 = 14,
    Bytes = 23,
    Text = 24,
    Temporal = 25,
    Other = 26,
}

impl RuntimeKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_numeric(self) -> bool {
        let code = self.code();
        code > 1 && code < 15
    }
}

/// Declared type names whose values are already valid JSON number lexemes.
///
/// Matching is exact: `int` or `DECIMAL(10,2)` are not on the list and end up
/// quoted, which is always valid JSON.
pub fn is_numeric_type(type_name: &str) -> bool {
    matches!(
        type_name,
        "TINYINT"
            | "SMALLINT"
            | "MEDIUMINT"
            | "BIGINT"
            | "INT"
            | "INT1"
            | "INT2"
            | "INT3"
            | "INT4"
            | "INT8"
            | "BOOL"
            | "BOOLEAN"
            | "DECIMAL"
            | "DEC"
            | "NUMERIC"
            | "FIXED"
            | "NUMBER"
            | "FLOAT"
            | "DOUBLE"
    )
}

/// Decide whether a column's values are emitted bare (`true`) or quoted.
///
/// The declared type name wins when present; an empty name falls back to the
/// runtime kind. A column with neither is quoted.
pub fn is_numeric(column: &ColumnMeta) -> bool {
    if !column.type_name.is_empty() {
        return is_numeric_type(&column.type_name);
    }
    column.runtime_kind.is_some_and(RuntimeKind::is_numeric)
}

/// Map an ODBC column type onto the declared type names the classifier knows.
pub fn normalize_odbc_type(data_type: &DataType) -> String {
    let name = match data_type {
        DataType::TinyInt => "TINYINT",
        DataType::SmallInt => "SMALLINT",
        DataType::Integer => "INT",
        DataType::BigInt => "BIGINT",
        DataType::Bit => "BOOLEAN",
        DataType::Decimal { .. } => "DECIMAL",
        DataType::Numeric { .. } => "NUMERIC",
        DataType::Real | DataType::Float { .. } => "FLOAT",
        DataType::Double => "DOUBLE",
        DataType::Char { .. } | DataType::WChar { .. } => "CHAR",
        DataType::Varchar { .. } | DataType::WVarchar { .. } => "VARCHAR",
        DataType::LongVarchar { .. } => "TEXT",
        DataType::Binary { .. } => "BINARY",
        DataType::Varbinary { .. } => "VARBINARY",
        DataType::LongVarbinary { .. } => "BLOB",
        DataType::Date => "DATE",
        DataType::Time { .. } => "TIME",
        DataType::Timestamp { .. } => "DATETIME",
        _ => "UNKNOWN",
    };
    name.to_string()
}

/// Native kind an ODBC driver decodes a column into.
pub fn odbc_runtime_kind(data_type: &DataType) -> RuntimeKind {
    match data_type {
        DataType::TinyInt => RuntimeKind::I8,
        DataType::SmallInt => RuntimeKind::I16,
        DataType::Integer => RuntimeKind::I32,
        DataType::BigInt => RuntimeKind::I64,
        DataType::Bit => RuntimeKind::Bool,
        DataType::Real => RuntimeKind::F32,
        DataType::Float { .. } | DataType::Double => RuntimeKind::F64,
        // Exact numerics arrive as text to keep their scale.
        DataType::Decimal { .. } | DataType::Numeric { .. } => RuntimeKind::Text,
        DataType::Char { .. }
        | DataType::WChar { .. }
        | DataType::Varchar { .. }
        | DataType::WVarchar { .. }
        | DataType::LongVarchar { .. } => RuntimeKind::Text,
        DataType::Binary { .. } | DataType::Varbinary { .. } | DataType::LongVarbinary { .. } => {
            RuntimeKind::Bytes
        }
        DataType::Date | DataType::Time { .. } | DataType::Timestamp { .. } => {
            RuntimeKind::Temporal
        }
        _ => RuntimeKind::Other,
    }
}
