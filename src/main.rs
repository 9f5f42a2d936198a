use clap::Parser;
use dbjson::backend::odbc::OdbcBackend;
use dbjson::backend::{Backend, QueryStats};
use dbjson::cli::{self, Cli, Command};
use dbjson::error::DbjsonError;
use dbjson::export::{EncodeMode, JsonRowSink};
use dbjson::format_detect::{self, OutputFormat};
use dbjson::seed::{self, SeedMode};
use dbjson::verbose::{self, Timer};
use dbjson::{config, format, output};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Load .env file (optional, ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Export(ref args) => {
            export(args, cli.verbose, cli.show_secrets, cli.config.as_ref()).await
        }
        Command::Seed(ref args) => {
            seed(args, cli.verbose, cli.show_secrets, cli.config.as_ref()).await
        }
    };

    if let Err(err) = result {
        output::print_error(&err);
        process::exit(1);
    }
}

async fn export(
    args: &cli::ExportArgs,
    verbose: bool,
    show_secrets: bool,
    config_path: Option<&PathBuf>,
) -> Result<(), DbjsonError> {
    let app_config = config::load_from_export_args(args, verbose, show_secrets, config_path)?;
    verbose::init(app_config.verbose);

    let sql = resolve_sql(args)?;

    // Detect output format before query (fail-fast on bad extension)
    let (format, path) = match app_config.output_file.as_deref() {
        Some(path) => {
            let (format, path) = format_detect::detect_format(path)?;
            (format, Some(path))
        }
        None => (OutputFormat::JsonArray, None),
    };
    let mode = if args.map { EncodeMode::Map } else { EncodeMode::Typed };
    let limit = app_config.default_row_limit;
    let timeout_secs = app_config.query_timeout_secs;

    let backend = OdbcBackend::new(app_config.connection);
    tracing::debug!("connecting with {}", backend.describe(app_config.show_secrets));
    tracing::debug!(
        "writing {} ({:?} rows) to {}",
        format.label(),
        mode,
        path.as_ref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
    );

    let timer = Timer::start();
    let stats = tokio::task::spawn_blocking(move || -> Result<QueryStats, DbjsonError> {
        let out = output::open_output(path.as_deref())?;
        let mut sink = JsonRowSink::new(out, format, mode);
        let stats = backend.query(&sql, limit, timeout_secs, &mut sink)?;
        sink.finish()?;
        Ok(stats)
    })
    .await
    .map_err(|e| DbjsonError::Query {
        message: format!("task join error: {}", e),
    })??;

    output::print_summary(timer.elapsed_ms(), stats.rows);
    if stats.truncated
        && let Some(limit) = limit
    {
        output::print_truncation_warning(&output::truncation_message(limit));
    }

    Ok(())
}

async fn seed(
    args: &cli::SeedArgs,
    verbose: bool,
    show_secrets: bool,
    config_path: Option<&PathBuf>,
) -> Result<(), DbjsonError> {
    let app_config = config::load_from_seed_args(args, verbose, show_secrets, config_path)?;
    verbose::init(app_config.verbose);

    seed::check_id_range(args.start_id, args.rows)?;
    let mode = if args.bulk { SeedMode::Bulk } else { SeedMode::Fixture };
    let sample = seed::product(mode, args.start_id);
    tracing::debug!(
        "first row: {}",
        String::from_utf8_lossy(&format::encode_any(&sample)?)
    );

    let backend = OdbcBackend::new(app_config.connection);
    tracing::debug!("connecting with {}", backend.describe(app_config.show_secrets));

    let table = args.table.clone();
    let (start_id, rows) = (args.start_id, args.rows);
    let timer = Timer::start();
    let inserted = tokio::task::spawn_blocking(move || {
        backend.insert_products(&table, &mut seed::products(mode, start_id, rows))
    })
    .await
    .map_err(|e| DbjsonError::Query {
        message: format!("task join error: {}", e),
    })??;

    output::print_inserted(inserted, &args.table, timer.elapsed_ms());
    Ok(())
}

// --- Helpers ---

fn resolve_sql(args: &cli::ExportArgs) -> Result<String, DbjsonError> {
    if let Some(ref sql) = args.sql {
        return Ok(sql.clone());
    }
    if let Some(ref path) = args.sql_file {
        let content = std::fs::read_to_string(path).map_err(|e| DbjsonError::Config {
            message: format!("cannot read SQL file {}: {}", path.display(), e),
        })?;
        return Ok(content);
    }
    Err(DbjsonError::Config {
        message: "no SQL provided; use positional argument or --file".to_string(),
    })
}
