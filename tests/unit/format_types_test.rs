use dbjson::backend::ColumnMeta;
use dbjson::format_types::{
    is_numeric, is_numeric_type, normalize_odbc_type, odbc_runtime_kind, RuntimeKind,
};
use odbc_api::DataType;
use std::num::NonZeroUsize;

#[test]
fn test_numeric_type_names() {
    for name in [
        "TINYINT", "SMALLINT", "MEDIUMINT", "INT", "INT1", "INT2", "INT3", "INT4", "INT8",
        "BIGINT", "BOOL", "BOOLEAN", "DECIMAL", "DEC", "NUMERIC", "FIXED", "NUMBER", "FLOAT",
        "DOUBLE",
    ] {
        assert!(is_numeric_type(name), "{} should be numeric", name);
    }
}

#[test]
fn test_non_numeric_type_names() {
    for name in [
        "VARCHAR", "TEXT", "DATE", "DATETIME", "TIMESTAMP", "CHAR", "BLOB", "JSON", "", "int",
        "Double", "DECIMAL(10,2)",
    ] {
        assert!(!is_numeric_type(name), "{:?} should be quoted", name);
    }
}

#[test]
fn test_runtime_kind_range() {
    let numeric = [
        RuntimeKind::Int,
        RuntimeKind::I8,
        RuntimeKind::I16,
        RuntimeKind::I32,
        RuntimeKind::I64,
        RuntimeKind::Uint,
        RuntimeKind::U8,
        RuntimeKind::U16,
        RuntimeKind::U32,
        RuntimeKind::U64,
        RuntimeKind::Usize,
        RuntimeKind::F32,
        RuntimeKind::F64,
    ];
    for kind in numeric {
        assert!(kind.is_numeric(), "{:?} should be numeric", kind);
        assert!((2..=14).contains(&kind.code()));
    }
    for kind in [
        RuntimeKind::Invalid,
        RuntimeKind::Bool,
        RuntimeKind::Bytes,
        RuntimeKind::Text,
        RuntimeKind::Temporal,
        RuntimeKind::Other,
    ] {
        assert!(!kind.is_numeric(), "{:?} should not be numeric", kind);
    }
}

#[test]
fn test_declared_type_wins_over_runtime_kind() {
    let col = ColumnMeta {
        name: "v".to_string(),
        type_name: "VARCHAR".to_string(),
        runtime_kind: Some(RuntimeKind::I64),
    };
    assert!(!is_numeric(&col));

    let col = ColumnMeta {
        name: "v".to_string(),
        type_name: "INT".to_string(),
        runtime_kind: Some(RuntimeKind::Text),
    };
    assert!(is_numeric(&col));
}

#[test]
fn test_runtime_kind_fallback() {
    assert!(is_numeric(&ColumnMeta::with_kind("v", RuntimeKind::F64)));
    assert!(!is_numeric(&ColumnMeta::with_kind("v", RuntimeKind::Bool)));
}

#[test]
fn test_no_metadata_is_quoted() {
    assert!(!is_numeric(&ColumnMeta::new("v", "")));
}

#[test]
fn test_normalize_odbc_numeric_types() {
    assert_eq!(normalize_odbc_type(&DataType::Integer), "INT");
    assert_eq!(normalize_odbc_type(&DataType::BigInt), "BIGINT");
    assert_eq!(normalize_odbc_type(&DataType::SmallInt), "SMALLINT");
    assert_eq!(normalize_odbc_type(&DataType::TinyInt), "TINYINT");
    assert_eq!(normalize_odbc_type(&DataType::Double), "DOUBLE");
    assert_eq!(normalize_odbc_type(&DataType::Real), "FLOAT");
    assert_eq!(normalize_odbc_type(&DataType::Bit), "BOOLEAN");
    assert_eq!(
        normalize_odbc_type(&DataType::Decimal { precision: 10, scale: 2 }),
        "DECIMAL"
    );
}

#[test]
fn test_normalize_odbc_text_and_temporal_types() {
    let length = NonZeroUsize::new(255);
    assert_eq!(normalize_odbc_type(&DataType::Varchar { length }), "VARCHAR");
    assert_eq!(normalize_odbc_type(&DataType::WVarchar { length }), "VARCHAR");
    assert_eq!(normalize_odbc_type(&DataType::Char { length }), "CHAR");
    assert_eq!(normalize_odbc_type(&DataType::Date), "DATE");
    assert_eq!(normalize_odbc_type(&DataType::Timestamp { precision: 0 }), "DATETIME");
    assert_eq!(normalize_odbc_type(&DataType::Unknown), "UNKNOWN");
}

#[test]
fn test_odbc_types_classify_consistently() {
    let length = NonZeroUsize::new(64);
    for dt in [DataType::Integer, DataType::BigInt, DataType::Double] {
        let col = ColumnMeta {
            name: "v".to_string(),
            type_name: normalize_odbc_type(&dt),
            runtime_kind: Some(odbc_runtime_kind(&dt)),
        };
        assert!(is_numeric(&col), "{:?}", dt);
        assert!(odbc_runtime_kind(&dt).is_numeric(), "{:?}", dt);
    }
    assert!(!odbc_runtime_kind(&DataType::Varchar { length }).is_numeric());
    assert_eq!(odbc_runtime_kind(&DataType::Bit), RuntimeKind::Bool);
    assert_eq!(odbc_runtime_kind(&DataType::Date), RuntimeKind::Temporal);
}
