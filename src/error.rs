use thiserror::Error;

/// Precondition failures of the row encoders. Nothing else in encoding can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("no data in values")]
    EmptyInput,

    #[error("columns and values length mismatch: {columns} columns, {values} values")]
    ArityMismatch { columns: usize, values: usize },
}

#[derive(Debug, Error)]
pub enum DbjsonError {
    #[error("encode: {0}")]
    Encode(#[from] EncodeError),

    #[error("connection: {message}")]
    Connection { message: String },

    #[error("query: {message}")]
    Query { message: String },

    #[error("config: {message}")]
    Config { message: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("format: {message}")]
    Format { message: String },
}
