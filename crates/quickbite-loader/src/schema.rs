use polars::prelude::DataFrame;

use crate::errors::LoaderError;

pub const ORDERS: &str = "orders";
pub const RESTAURANTS: &str = "restaurants";
pub const CUSTOMERS: &str = "customers";
pub const RATINGS: &str = "ratings";
pub const DELIVERY: &str = "delivery";

pub const ORDERS_COLUMNS: &[&str] = &[
    "order_id",
    "customer_id",
    "restaurant_id",
    "order_timestamp",
    "subtotal_amount",
    "delivery_fee",
    "discount_amount",
];

pub const RESTAURANTS_COLUMNS: &[&str] = &["restaurant_id", "restaurant_name", "city"];

pub const CUSTOMERS_COLUMNS: &[&str] = &["customer_id", "customer_name"];

pub const RATINGS_COLUMNS: &[&str] = &["order_id", "rating", "sentiment_score", "review_text"];

pub const DELIVERY_COLUMNS: &[&str] = &[
    "order_id",
    "actual_delivery_time_mins",
    "expected_delivery_time_mins",
    "is_cancelled",
];

/// The input schema is externally defined; missing columns are a load error,
/// extra columns pass through untouched.
pub fn ensure_columns(
    df: &DataFrame,
    table: &'static str,
    required: &[&str],
) -> Result<(), LoaderError> {
    let present = df.get_column_names_str();
    for column in required {
        if !present.iter().any(|name| name == column) {
            return Err(LoaderError::MissingColumn {
                table,
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}
