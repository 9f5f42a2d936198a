use chrono::{DateTime, TimeZone, Utc};
use fake::Fake;
use fake::faker::chrono::en::DateTimeBetween;
use fake::faker::commerce::en::ProductName;
use serde::Serialize;
use serde_json::Value;

use crate::error::DbjsonError;

/// Rows between progress log lines while seeding.
pub const PROGRESS_EVERY: usize = 100_000;

const FIXTURE_DATE: &str = "2021-01-01 00:00:00";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the `dummy` products table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub product: String,
    /// Free-form; any JSON value marshals through `encode_any`.
    pub description: Option<Value>,
    pub price: f64,
    pub qty: i64,
    pub date: String,
}

impl Product {
    /// Description as bound to the text column: strings as-is, anything else as JSON.
    pub fn description_text(&self) -> Option<String> {
        match &self.description {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// How product rows are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// `product_{i}`, price `i + 0.23`, qty `i * 10`, one fixed date.
    #[default]
    Fixture,
    /// Random product names, prices, quantities and dates.
    Bulk,
}

/// Build the product with the given id. Fixture products depend on the id only.
pub fn product(mode: SeedMode, id: i64) -> Product {
    match mode {
        SeedMode::Fixture => Product {
            id,
            product: format!("product_{id}"),
            description: None,
            price: id as f64 + 0.23,
            qty: id.saturating_mul(10),
            date: FIXTURE_DATE.to_string(),
        },
        SeedMode::Bulk => {
            let date: DateTime<Utc> = DateTimeBetween(bulk_date_start(), bulk_date_end()).fake();
            let cents: i64 = (100..100_000).fake();
            Product {
                id,
                product: ProductName().fake(),
                description: None,
                price: cents as f64 / 100.0,
                qty: (10..=1000).fake(),
                date: date.format(DATE_FORMAT).to_string(),
            }
        }
    }
}

// 2000-01-01 .. 2024-09-01, exclusive upper bound
fn bulk_date_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn bulk_date_end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 31, 23, 59, 59)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Reject a run whose ids would leave the `i64` range.
pub fn check_id_range(start_id: i64, count: usize) -> Result<(), DbjsonError> {
    let last = i64::try_from(count)
        .ok()
        .and_then(|n| start_id.checked_add(n.saturating_sub(1)));
    match last {
        Some(_) => Ok(()),
        None => Err(DbjsonError::Config {
            message: format!("{count} rows starting at id {start_id} overflow the id range"),
        }),
    }
}

/// `count` products with consecutive ids starting at `start_id`.
pub fn products(mode: SeedMode, start_id: i64, count: usize) -> impl Iterator<Item = Product> {
    (0..count).map(move |i| product(mode, start_id.saturating_add(i as i64)))
}

/// Parameterized insert for the six product columns.
pub fn insert_sql(table: &str) -> Result<String, DbjsonError> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if !valid {
        return Err(DbjsonError::Config {
            message: format!("invalid table name: '{table}'"),
        });
    }
    Ok(format!("INSERT INTO {table} VALUES (?, ?, ?, ?, ?, ?)"))
}
