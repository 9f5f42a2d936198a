use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dbjson", about = "Stream SQL query results as typed JSON rows")]
pub struct Cli {
    /// Path to config file
    #[arg(short = 'c', long, global = true, env = "DBJSON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit diagnostics to stderr
    #[arg(short = 'v', long, global = true, env = "DBJSON_VERBOSE")]
    pub verbose: bool,

    /// Disable credential masking
    #[arg(long, global = true, env = "DBJSON_SHOW_SECRETS")]
    pub show_secrets: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a query and write every row as a JSON object
    Export(ExportArgs),

    /// Fill a products table with generated rows
    Seed(SeedArgs),
}

/// Where to connect. Either a full ODBC connection string or its parts.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Full ODBC connection string (overrides the individual parts)
    #[arg(long, env = "DBJSON_CONNECTION_STRING")]
    pub connection_string: Option<String>,

    /// ODBC driver name
    #[arg(long, env = "DBJSON_DRIVER")]
    pub driver: Option<String>,

    /// Database server hostname
    #[arg(short = 's', long, env = "DBJSON_SERVER")]
    pub server: Option<String>,

    /// Database server port
    #[arg(long, env = "DBJSON_PORT")]
    pub port: Option<u16>,

    /// Database name
    #[arg(short = 'd', long, env = "DBJSON_DATABASE")]
    pub database: Option<String>,

    /// Login user name
    #[arg(short = 'u', long, env = "DBJSON_USERNAME")]
    pub username: Option<String>,

    /// Login password
    #[arg(short = 'p', long, env = "DBJSON_PASSWORD")]
    pub password: Option<String>,

    /// Config file profile name
    #[arg(short = 'P', long, env = "DBJSON_PROFILE")]
    pub profile: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// SQL query text
    pub sql: Option<String>,

    /// Read SQL from file
    #[arg(short = 'f', long = "file", conflicts_with = "sql")]
    pub sql_file: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Type values by their decoded form instead of column types (keys sorted)
    #[arg(long)]
    pub map: bool,

    /// Max rows to return (default: 500)
    #[arg(short = 'l', long, env = "DBJSON_ROW_LIMIT")]
    pub limit: Option<usize>,

    /// Disable row limit
    #[arg(long)]
    pub no_limit: bool,

    /// Query timeout in seconds (default: 60)
    #[arg(short = 't', long, env = "DBJSON_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Write results to file instead of stdout (.json, .jsonl, .ndjson)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct SeedArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Table to insert into
    #[arg(long, default_value = "dummy")]
    pub table: String,

    /// Number of rows to insert
    #[arg(short = 'n', long, default_value_t = 3)]
    pub rows: usize,

    /// Id of the first inserted row
    #[arg(long, default_value_t = 1)]
    pub start_id: i64,

    /// Generate varied product data instead of the fixed fixture rows
    #[arg(long)]
    pub bulk: bool,
}
