use crate::cli::{ConnectionArgs, ExportArgs, SeedArgs};
use crate::error::DbjsonError;
use directories::ProjectDirs;
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// ODBC driver used when neither the command line nor the config names one.
pub const DEFAULT_DRIVER: &str = "MySQL ODBC 8.0 Unicode Driver";
pub const DEFAULT_ROW_LIMIT: usize = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub default_row_limit: Option<usize>,
    pub query_timeout_secs: u64,
    pub verbose: bool,
    pub show_secrets: bool,
    pub output_file: Option<PathBuf>,
}

/// Configured database connection target.
#[derive(Debug)]
pub enum ConnectionConfig {
    /// Passed to the driver manager untouched.
    ConnectionString(SecretString),
    Parts {
        driver: String,
        server: String,
        port: Option<u16>,
        database: Option<String>,
        username: Option<String>,
        password: Option<SecretString>,
    },
}

// --- TOML config file structs ---

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    defaults: TomlDefaults,
    #[serde(default)]
    profiles: HashMap<String, TomlProfile>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDefaults {
    row_limit: Option<usize>,
    timeout: Option<u64>,
    verbose: Option<bool>,
    driver: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
struct TomlProfile {
    connection_string: Option<String>,
    connection_string_env: Option<String>,
    driver: Option<String>,
    server: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    password_env: Option<String>,
}

/// Config path resolution result: distinguishes explicit vs auto-resolved paths.
struct ResolvedConfigPath {
    path: PathBuf,
    /// true if user explicitly specified via --config or DBJSON_CONFIG
    explicit: bool,
}

/// `None` for missing or empty values.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Read an environment variable, treating empty as unset.
pub fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Resolve the config file path: --config flag > env var > platform default.
fn resolve_config_path(cli_config: Option<&PathBuf>) -> Option<ResolvedConfigPath> {
    if let Some(path) = cli_config {
        return Some(ResolvedConfigPath { path: path.clone(), explicit: true });
    }
    if let Some(path) = env_non_empty("DBJSON_CONFIG") {
        return Some(ResolvedConfigPath { path: PathBuf::from(path), explicit: true });
    }
    ProjectDirs::from("", "", "dbjson").map(|dirs| ResolvedConfigPath {
        path: dirs.config_dir().join("config.toml"),
        explicit: false,
    })
}

/// Load and parse the TOML config file (if it exists).
fn load_toml_config(resolved: Option<&ResolvedConfigPath>) -> Result<TomlConfig, DbjsonError> {
    let resolved = match resolved {
        Some(r) => r,
        None => return Ok(TomlConfig::default()),
    };

    if !resolved.path.exists() {
        if resolved.explicit {
            return Err(DbjsonError::Config {
                message: format!("config file not found: {}", resolved.path.display()),
            });
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&resolved.path).map_err(|e| DbjsonError::Config {
        message: format!("cannot read config file {}: {}", resolved.path.display(), e),
    })?;

    toml::from_str(&content).map_err(|e| DbjsonError::Config {
        message: format!("invalid config file {}: {}", resolved.path.display(), e),
    })
}

/// Resolve a secret from direct value, env indirection, or env var.
fn resolve_secret(
    direct: Option<&str>,
    env_key: Option<&str>,
    fallback_env: &str,
) -> Option<SecretString> {
    if let Some(val) = non_empty(direct) {
        return Some(SecretString::from(val.to_string()));
    }
    // Env indirection (e.g., password_env = "MY_SECRET")
    if let Some(val) = non_empty(env_key).and_then(env_non_empty) {
        return Some(SecretString::from(val));
    }
    env_non_empty(fallback_env).map(SecretString::from)
}

fn load_profile(
    toml_config: &TomlConfig,
    profile: Option<&String>,
) -> Result<TomlProfile, DbjsonError> {
    let profile = profile
        .map(|name| {
            toml_config.profiles.get(name).cloned().ok_or_else(|| DbjsonError::Config {
                message: format!("profile '{}' not found in config file", name),
            })
        })
        .transpose()?;
    Ok(profile.unwrap_or_default())
}

/// Connection target: CLI/env > profile > defaults.
fn resolve_connection(
    args: &ConnectionArgs,
    profile: &TomlProfile,
    defaults: &TomlDefaults,
) -> Result<ConnectionConfig, DbjsonError> {
    if let Some(conn_str) = resolve_secret(
        args.connection_string.as_deref(),
        profile.connection_string_env.as_deref(),
        "DBJSON_CONNECTION_STRING",
    )
    .or_else(|| {
        non_empty(profile.connection_string.as_deref())
            .map(|s| SecretString::from(s.to_string()))
    }) {
        return Ok(ConnectionConfig::ConnectionString(conn_str));
    }

    let server = non_empty(args.server.as_deref())
        .or(non_empty(profile.server.as_deref()))
        .ok_or_else(|| DbjsonError::Config {
            message: "no server specified; use --server, --connection-string or a profile"
                .to_string(),
        })?
        .to_string();

    let driver = non_empty(args.driver.as_deref())
        .or(non_empty(profile.driver.as_deref()))
        .or(non_empty(defaults.driver.as_deref()))
        .unwrap_or(DEFAULT_DRIVER)
        .to_string();

    let database = non_empty(args.database.as_deref())
        .or(non_empty(profile.database.as_deref()))
        .map(|s| s.to_string());

    let username = non_empty(args.username.as_deref())
        .or(non_empty(profile.username.as_deref()))
        .map(|s| s.to_string());

    let password = resolve_secret(
        args.password.as_deref(),
        profile.password_env.as_deref(),
        "DBJSON_PASSWORD",
    )
    .or_else(|| {
        non_empty(profile.password.as_deref()).map(|p| SecretString::from(p.to_string()))
    });

    Ok(ConnectionConfig::Parts {
        driver,
        server,
        port: args.port.or(profile.port),
        database,
        username,
        password,
    })
}

/// Build AppConfig from export CLI args.
pub fn load_from_export_args(
    args: &ExportArgs,
    verbose: bool,
    show_secrets: bool,
    config_path: Option<&PathBuf>,
) -> Result<AppConfig, DbjsonError> {
    let resolved_path = resolve_config_path(config_path);
    let toml_config = load_toml_config(resolved_path.as_ref())?;
    let profile = load_profile(&toml_config, args.connection.profile.as_ref())?;
    let connection = resolve_connection(&args.connection, &profile, &toml_config.defaults)?;

    // row_limit: --no-limit > CLI/ENV > TOML > 500
    let default_row_limit = if args.no_limit {
        None
    } else {
        Some(
            args.limit
                .unwrap_or_else(|| toml_config.defaults.row_limit.unwrap_or(DEFAULT_ROW_LIMIT)),
        )
    };

    // timeout: CLI/ENV > TOML > 60
    let query_timeout_secs = args
        .timeout
        .unwrap_or_else(|| toml_config.defaults.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS));

    let verbose = verbose || toml_config.defaults.verbose.unwrap_or(false);

    Ok(AppConfig {
        connection,
        default_row_limit,
        query_timeout_secs,
        verbose,
        show_secrets,
        output_file: args.output.clone(),
    })
}

/// Build AppConfig for the seed subcommand.
pub fn load_from_seed_args(
    args: &SeedArgs,
    verbose: bool,
    show_secrets: bool,
    config_path: Option<&PathBuf>,
) -> Result<AppConfig, DbjsonError> {
    let resolved_path = resolve_config_path(config_path);
    let toml_config = load_toml_config(resolved_path.as_ref())?;
    let profile = load_profile(&toml_config, args.connection.profile.as_ref())?;
    let connection = resolve_connection(&args.connection, &profile, &toml_config.defaults)?;

    let verbose = verbose || toml_config.defaults.verbose.unwrap_or(false);

    Ok(AppConfig {
        connection,
        default_row_limit: None,
        query_timeout_secs: toml_config.defaults.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        verbose,
        show_secrets,
        output_file: None,
    })
}
