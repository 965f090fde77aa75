use std::fs;
use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use crate::errors::LoaderError;
use crate::schema;

pub const ORDERS_FILE: &str = "fact_orders.csv";
pub const RESTAURANTS_FILE: &str = "dim_restaurant.csv";
pub const CUSTOMERS_FILE: &str = "dim_customer.csv";
pub const RATINGS_FILE: &str = "fact_ratings.csv";
pub const DELIVERY_FILE: &str = "fact_delivery_performance.csv";

/// The five input tables the dashboard consumes, loaded and dtype-normalized.
#[derive(Debug, Clone)]
pub struct DashboardTables {
    pub orders: DataFrame,
    pub restaurants: DataFrame,
    pub customers: DataFrame,
    pub ratings: DataFrame,
    pub delivery: DataFrame,
}

impl DashboardTables {
    pub fn load_dir(dir: &Path) -> Result<Self, LoaderError> {
        Ok(Self {
            orders: orders_from_path(&dir.join(ORDERS_FILE))?,
            restaurants: restaurants_from_path(&dir.join(RESTAURANTS_FILE))?,
            customers: customers_from_path(&dir.join(CUSTOMERS_FILE))?,
            ratings: ratings_from_path(&dir.join(RATINGS_FILE))?,
            delivery: delivery_from_path(&dir.join(DELIVERY_FILE))?,
        })
    }
}

pub fn orders_from_path(path: &Path) -> Result<DataFrame, LoaderError> {
    orders_from_bytes(&read_file(schema::ORDERS, path)?)
}

pub fn orders_from_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
    let df = read_csv(schema::ORDERS, bytes)?;
    schema::ensure_columns(&df, schema::ORDERS, schema::ORDERS_COLUMNS)?;
    normalize(
        schema::ORDERS,
        df,
        &["order_id", "customer_id", "restaurant_id"],
        &["subtotal_amount", "delivery_fee", "discount_amount"],
        &[],
        Some("order_timestamp"),
    )
}

pub fn restaurants_from_path(path: &Path) -> Result<DataFrame, LoaderError> {
    restaurants_from_bytes(&read_file(schema::RESTAURANTS, path)?)
}

pub fn restaurants_from_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
    let df = read_csv(schema::RESTAURANTS, bytes)?;
    schema::ensure_columns(&df, schema::RESTAURANTS, schema::RESTAURANTS_COLUMNS)?;
    normalize(
        schema::RESTAURANTS,
        df,
        &["restaurant_id"],
        &[],
        &["restaurant_name", "city"],
        None,
    )
}

pub fn customers_from_path(path: &Path) -> Result<DataFrame, LoaderError> {
    customers_from_bytes(&read_file(schema::CUSTOMERS, path)?)
}

pub fn customers_from_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
    let df = read_csv(schema::CUSTOMERS, bytes)?;
    schema::ensure_columns(&df, schema::CUSTOMERS, schema::CUSTOMERS_COLUMNS)?;
    normalize(
        schema::CUSTOMERS,
        df,
        &["customer_id"],
        &[],
        &["customer_name"],
        None,
    )
}

pub fn ratings_from_path(path: &Path) -> Result<DataFrame, LoaderError> {
    ratings_from_bytes(&read_file(schema::RATINGS, path)?)
}

pub fn ratings_from_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
    let df = read_csv(schema::RATINGS, bytes)?;
    schema::ensure_columns(&df, schema::RATINGS, schema::RATINGS_COLUMNS)?;
    normalize(
        schema::RATINGS,
        df,
        &["order_id"],
        &["rating", "sentiment_score"],
        &["review_text"],
        None,
    )
}

pub fn delivery_from_path(path: &Path) -> Result<DataFrame, LoaderError> {
    delivery_from_bytes(&read_file(schema::DELIVERY, path)?)
}

pub fn delivery_from_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
    let df = read_csv(schema::DELIVERY, bytes)?;
    schema::ensure_columns(&df, schema::DELIVERY, schema::DELIVERY_COLUMNS)?;
    normalize(
        schema::DELIVERY,
        df,
        &["order_id"],
        &["actual_delivery_time_mins", "expected_delivery_time_mins"],
        &["is_cancelled"],
        None,
    )
}

fn read_file(table: &'static str, path: &Path) -> Result<Vec<u8>, LoaderError> {
    fs::read(path).map_err(|source| LoaderError::Io {
        table,
        path: path.display().to_string(),
        source,
    })
}

fn read_csv(table: &'static str, bytes: &[u8]) -> Result<DataFrame, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(200))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source| LoaderError::Read { table, source })?;

    if df.height() == 0 {
        return Err(LoaderError::EmptyTable { table });
    }
    Ok(df)
}

/// Cast every key column to String so joins never fail on inferred dtypes,
/// measures to Float64, and the timestamp to a millisecond Datetime.
fn normalize(
    table: &'static str,
    df: DataFrame,
    keys: &[&str],
    measures: &[&str],
    text: &[&str],
    timestamp: Option<&str>,
) -> Result<DataFrame, LoaderError> {
    let mut exprs: Vec<Expr> = Vec::new();
    for name in keys {
        exprs.push(col(*name).cast(DataType::String));
    }
    for name in measures {
        exprs.push(col(*name).cast(DataType::Float64));
    }
    for name in text {
        exprs.push(col(*name).cast(DataType::String));
    }
    if let Some(name) = timestamp {
        exprs.push(col(name).cast(DataType::Datetime(TimeUnit::Milliseconds, None)));
    }

    df.lazy()
        .with_columns(exprs)
        .collect()
        .map_err(|source| LoaderError::Normalize { table, source })
}
