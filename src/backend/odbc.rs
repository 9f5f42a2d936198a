use std::num::NonZeroUsize;

use odbc_api::buffers::{BufferDesc, ColumnarAnyBuffer};
use odbc_api::{
    ColumnDescription, Connection, ConnectionOptions, Cursor, DataType, Environment,
    IntoParameter, ResultSetMetadata,
};
use secrecy::ExposeSecret;

use crate::backend::{Backend, ColumnMeta, QueryStats, RawCell, RowSink};
use crate::config::ConnectionConfig;
use crate::error::DbjsonError;
use crate::format_types::{normalize_odbc_type, odbc_runtime_kind};
use crate::masking::{format_secret, mask_connection_string};
use crate::seed::{self, Product, PROGRESS_EVERY};

const BATCH_SIZE: usize = 5000;
const DEFAULT_STR_LEN: usize = 4096;
/// Largest text buffer bound per column. Longer values fail the fetch.
pub const MAX_STR_LEN: usize = 65_536;

/// Bytes reserved per cell for a column of this type.
pub fn text_buffer_len(data_type: &DataType) -> usize {
    data_type
        .display_size()
        .map(NonZeroUsize::get)
        .unwrap_or(DEFAULT_STR_LEN)
        .min(MAX_STR_LEN)
}

/// Any database reachable through an ODBC driver. Every column is fetched as
/// text so cells reach the encoder as the driver's raw lexemes.
pub struct OdbcBackend {
    connection: ConnectionConfig,
}

impl OdbcBackend {
    pub fn new(connection: ConnectionConfig) -> Self {
        Self { connection }
    }

    fn connection_string(&self) -> String {
        match &self.connection {
            ConnectionConfig::ConnectionString(s) => s.expose_secret().to_string(),
            ConnectionConfig::Parts { .. } => self.parts_string(true),
        }
    }

    /// Connection string safe for diagnostics.
    pub fn describe(&self, show_secrets: bool) -> String {
        match &self.connection {
            ConnectionConfig::ConnectionString(s) => mask_connection_string(s, show_secrets),
            ConnectionConfig::Parts { .. } => self.parts_string(show_secrets),
        }
    }

    fn parts_string(&self, show_secrets: bool) -> String {
        let ConnectionConfig::Parts {
            driver,
            server,
            port,
            database,
            username,
            password,
        } = &self.connection
        else {
            return String::new();
        };

        let mut parts = vec![format!("Driver={{{}}}", driver), format!("Server={}", server)];
        if let Some(port) = port {
            parts.push(format!("Port={}", port));
        }
        if let Some(db) = database {
            parts.push(format!("Database={}", db));
        }
        if let Some(user) = username {
            parts.push(format!("UID={}", user));
        }
        if let Some(pwd) = password {
            let shown = if show_secrets {
                odbc_api::escape_attribute_value(pwd.expose_secret()).into_owned()
            } else {
                format_secret(pwd, false)
            };
            parts.push(format!("PWD={}", shown));
        }

        parts.join(";") + ";"
    }

    fn connect<'env>(&self, env: &'env Environment) -> Result<Connection<'env>, DbjsonError> {
        env.connect_with_connection_string(
            &self.connection_string(),
            ConnectionOptions {
                login_timeout_sec: Some(30),
                ..Default::default()
            },
        )
        .map_err(|e| DbjsonError::Connection {
            message: format!("connection failed: {}", e),
        })
    }
}

fn environment() -> Result<Environment, DbjsonError> {
    Environment::new().map_err(|e| DbjsonError::Connection {
        message: format!("ODBC environment error: {}", e),
    })
}

impl Backend for OdbcBackend {
    fn query(
        &self,
        sql: &str,
        limit: Option<usize>,
        timeout_secs: u64,
        sink: &mut dyn RowSink,
    ) -> Result<QueryStats, DbjsonError> {
        let env = environment()?;
        let conn = self.connect(&env)?;
        tracing::debug!("connected");

        let mut statement = conn.preallocate().map_err(|e| DbjsonError::Query {
            message: format!("cannot allocate statement: {}", e),
        })?;
        statement
            .set_query_timeout_sec(timeout_secs as usize)
            .map_err(|e| DbjsonError::Query {
                message: format!("cannot set query timeout: {}", e),
            })?;

        let cursor = statement.execute(sql, ()).map_err(|e| DbjsonError::Query {
            message: format!("query execution failed: {}", e),
        })?;

        let Some(mut cursor) = cursor else {
            sink.begin(&[])?;
            return Ok(QueryStats::default());
        };

        let num_cols = cursor.num_result_cols().map_err(|e| DbjsonError::Query {
            message: format!("failed to get column count: {}", e),
        })? as usize;

        let mut columns = Vec::with_capacity(num_cols);
        let mut buffer_descs = Vec::with_capacity(num_cols);

        for i in 1..=num_cols as u16 {
            let mut col_desc = ColumnDescription::default();
            cursor
                .describe_col(i, &mut col_desc)
                .map_err(|e| DbjsonError::Query {
                    message: format!("failed to describe column {}: {}", i, e),
                })?;

            let name = col_desc.name_to_string().map_err(|e| DbjsonError::Query {
                message: format!("failed to decode column name {}: {}", i, e),
            })?;

            let max_str_len = text_buffer_len(&col_desc.data_type);

            columns.push(ColumnMeta {
                name,
                type_name: normalize_odbc_type(&col_desc.data_type),
                runtime_kind: Some(odbc_runtime_kind(&col_desc.data_type)),
            });
            buffer_descs.push(BufferDesc::Text { max_str_len });
        }
        tracing::debug!(?columns, "result set described");
        sink.begin(&columns)?;

        let buffer = ColumnarAnyBuffer::try_from_descs(BATCH_SIZE, buffer_descs).map_err(|e| {
            DbjsonError::Query {
                message: format!("failed to create buffer: {}", e),
            }
        })?;

        let mut row_set_cursor = cursor.bind_buffer(buffer).map_err(|e| DbjsonError::Query {
            message: format!("failed to bind buffer: {}", e),
        })?;

        let mut stats = QueryStats::default();
        let mut cells: Vec<RawCell> = Vec::with_capacity(num_cols);

        while let Some(batch) = row_set_cursor
            .fetch_with_truncation_check(true)
            .map_err(|e| DbjsonError::Query {
                message: format!(
                    "fetch error (values are limited to {} bytes per cell): {}",
                    MAX_STR_LEN, e
                ),
            })?
        {
            for row_idx in 0..batch.num_rows() {
                if let Some(lim) = limit
                    && stats.rows >= lim
                {
                    stats.truncated = true;
                    break;
                }

                cells.clear();
                for col_idx in 0..num_cols {
                    let cell = match batch.column(col_idx).as_text_view() {
                        Some(view) => RawCell::from(view.get(row_idx)),
                        None => RawCell::Null,
                    };
                    cells.push(cell);
                }
                sink.row(&cells)?;
                stats.rows += 1;
            }

            if stats.truncated {
                break;
            }
        }

        Ok(stats)
    }

    fn insert_products(
        &self,
        table: &str,
        products: &mut dyn Iterator<Item = Product>,
    ) -> Result<usize, DbjsonError> {
        let sql = seed::insert_sql(table)?;
        let env = environment()?;
        let conn = self.connect(&env)?;

        conn.set_autocommit(false).map_err(|e| DbjsonError::Connection {
            message: format!("cannot begin transaction: {}", e),
        })?;

        match insert_all(&conn, &sql, products) {
            Ok(count) => {
                conn.commit().map_err(|e| DbjsonError::Query {
                    message: format!("commit failed: {}", e),
                })?;
                Ok(count)
            }
            Err(err) => {
                if let Err(e) = conn.rollback() {
                    tracing::warn!("rollback failed: {}", e);
                }
                Err(err)
            }
        }
    }
}

fn insert_all(
    conn: &Connection<'_>,
    sql: &str,
    products: &mut dyn Iterator<Item = Product>,
) -> Result<usize, DbjsonError> {
    let mut prepared = conn.prepare(sql).map_err(|e| DbjsonError::Query {
        message: format!("prepare failed: {}", e),
    })?;

    let mut count = 0;
    for p in products {
        let description = p.description_text();
        prepared
            .execute((
                &p.id,
                &p.product.as_str().into_parameter(),
                &description.as_deref().into_parameter(),
                &p.price,
                &p.qty,
                &p.date.as_str().into_parameter(),
            ))
            .map_err(|e| DbjsonError::Query {
                message: format!("insert of id {} failed: {}", p.id, e),
            })?;
        count += 1;
        if count % PROGRESS_EVERY == 0 {
            tracing::info!("{} rows inserted", count);
        }
    }
    Ok(count)
}
