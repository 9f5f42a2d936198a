use secrecy::{ExposeSecret, SecretString};

const REDACTED: &str = "[REDACTED]";

/// Format a secret value, respecting the show_secrets flag.
pub fn format_secret(secret: &SecretString, show_secrets: bool) -> String {
    if show_secrets {
        secret.expose_secret().to_string()
    } else {
        REDACTED.to_string()
    }
}

/// Mask the password attributes (`PWD`, `Password`) of an ODBC connection
/// string, keeping every other attribute readable.
pub fn mask_connection_string(conn_str: &SecretString, show_secrets: bool) -> String {
    let raw = conn_str.expose_secret();
    if show_secrets {
        return raw.to_string();
    }

    raw.split(';')
        .map(|attr| match attr.split_once('=') {
            Some((key, _)) if is_password_key(key) => format!("{}={}", key, REDACTED),
            _ => attr.to_string(),
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn is_password_key(key: &str) -> bool {
    let key = key.trim();
    key.eq_ignore_ascii_case("pwd") || key.eq_ignore_ascii_case("password")
}
