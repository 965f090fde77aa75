use std::path::Path;

use polars::prelude::*;

use crate::errors::LoaderError;
use crate::tables::{
    delivery_from_bytes, orders_from_bytes, ratings_from_bytes, restaurants_from_bytes,
    DashboardTables,
};

const ORDERS_CSV: &str = "\
order_id,customer_id,restaurant_id,order_timestamp,subtotal_amount,delivery_fee,discount_amount
1,101,9,2025-05-15 12:00:00,100.0,10.0,0.0
2,102,9,2025-06-15 18:30:00,80,10,5
";

#[test]
fn orders_normalize_dtypes() {
    let df = orders_from_bytes(ORDERS_CSV.as_bytes()).expect("orders load");

    assert_eq!(df.height(), 2);
    assert_eq!(df.column("order_id").unwrap().dtype(), &DataType::String);
    assert_eq!(df.column("customer_id").unwrap().dtype(), &DataType::String);
    assert_eq!(
        df.column("subtotal_amount").unwrap().dtype(),
        &DataType::Float64
    );
    assert_eq!(
        df.column("order_timestamp").unwrap().dtype(),
        &DataType::Datetime(TimeUnit::Milliseconds, None)
    );

    // integer-looking money columns still land as floats
    let subtotal = df.column("subtotal_amount").unwrap().f64().unwrap();
    assert_eq!(subtotal.get(1), Some(80.0));
}

#[test]
fn orders_missing_column_is_typed_error() {
    let csv = "order_id,customer_id,order_timestamp\n1,101,2025-05-15 12:00:00\n";
    let err = orders_from_bytes(csv.as_bytes()).unwrap_err();
    match err {
        LoaderError::MissingColumn { table, column } => {
            assert_eq!(table, "orders");
            assert_eq!(column, "restaurant_id");
        }
        other => panic!("expected MissingColumn, got {other}"),
    }
}

#[test]
fn header_only_file_is_empty_table_error() {
    let csv = "restaurant_id,restaurant_name,city\n";
    let err = restaurants_from_bytes(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoaderError::EmptyTable { table: "restaurants" }));
}

#[test]
fn ratings_keep_null_review_text() {
    let csv = "\
order_id,rating,sentiment_score,review_text
1,4.5,0.8,Great food
2,1.0,-0.9,
";
    let df = ratings_from_bytes(csv.as_bytes()).expect("ratings load");
    let reviews = df.column("review_text").unwrap().str().unwrap();
    assert_eq!(reviews.get(0), Some("Great food"));
    assert_eq!(reviews.get(1), None);
}

#[test]
fn delivery_keeps_cancel_flag_as_text() {
    let csv = "\
order_id,actual_delivery_time_mins,expected_delivery_time_mins,is_cancelled
1,35,30,N
2,,30,Y
";
    let df = delivery_from_bytes(csv.as_bytes()).expect("delivery load");
    let flag = df.column("is_cancelled").unwrap().str().unwrap();
    assert_eq!(flag.get(1), Some("Y"));
    let actual = df.column("actual_delivery_time_mins").unwrap().f64().unwrap();
    assert_eq!(actual.get(1), None);
}

#[test]
fn load_dir_reports_missing_file() {
    let err = DashboardTables::load_dir(Path::new("/nonexistent/quickbite-data")).unwrap_err();
    assert!(matches!(err, LoaderError::Io { table: "orders", .. }));
}
