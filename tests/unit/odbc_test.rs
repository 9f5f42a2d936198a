use dbjson::backend::odbc::{text_buffer_len, MAX_STR_LEN};
use odbc_api::DataType;
use std::num::NonZeroUsize;

#[test]
fn test_text_buffer_uses_declared_length() {
    let length = NonZeroUsize::new(255);
    assert_eq!(text_buffer_len(&DataType::Varchar { length }), 255);
    assert_eq!(text_buffer_len(&DataType::Char { length }), 255);
}

#[test]
fn test_text_buffer_capped_for_long_columns() {
    let length = NonZeroUsize::new(16 * 1024 * 1024);
    assert_eq!(text_buffer_len(&DataType::LongVarchar { length }), MAX_STR_LEN);
    assert_eq!(text_buffer_len(&DataType::Varchar { length }), MAX_STR_LEN);
}

#[test]
fn test_text_buffer_never_exceeds_cap() {
    let length = NonZeroUsize::new(MAX_STR_LEN + 1);
    for dt in [
        DataType::Integer,
        DataType::BigInt,
        DataType::Double,
        DataType::Date,
        DataType::Unknown,
        DataType::LongVarchar { length: None },
        DataType::WVarchar { length },
    ] {
        let len = text_buffer_len(&dt);
        assert!(len > 0 && len <= MAX_STR_LEN, "{:?} -> {}", dt, len);
    }
}
