use polars::prelude::*;

use quickbite_core::joins::{attach_phase, join_orders_restaurants};
use quickbite_core::phase::{MONTH_COL, PHASE_COL};

fn timestamps(values: &[&str]) -> Series {
    Series::new("order_timestamp".into(), values)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .expect("timestamps parse")
}

fn orders() -> DataFrame {
    let mut df = df!(
        "order_id" => &["1", "2", "3"],
        "customer_id" => &["c1", "c1", "c2"],
        "restaurant_id" => &["r1", "r2", "missing"],
        "subtotal_amount" => &[100.0, 80.0, 50.0],
        "delivery_fee" => &[10.0, 10.0, 5.0],
        "discount_amount" => &[0.0, 5.0, 0.0],
    )
    .unwrap();
    df.with_column(timestamps(&[
        "2025-05-15 12:00:00",
        "2025-06-15 18:30:00",
        "2025-06-01 00:00:00",
    ]))
    .unwrap();
    df
}

fn restaurants() -> DataFrame {
    df!(
        "restaurant_id" => &["r1", "r2"],
        "restaurant_name" => &["Spice Route", "Biryani House"],
        "city" => &["Mumbai", "Delhi"],
    )
    .unwrap()
}

#[test]
fn attach_phase_labels_months_and_phases() {
    let df = attach_phase(&orders()).expect("attach phase");

    let months = df.column(MONTH_COL).unwrap().str().unwrap();
    assert_eq!(months.get(0), Some("2025-05"));
    assert_eq!(months.get(1), Some("2025-06"));

    let phases = df.column(PHASE_COL).unwrap().str().unwrap();
    assert_eq!(phases.get(0), Some("Pre-Crisis"));
    assert_eq!(phases.get(1), Some("Crisis"));
    // the cutoff instant itself is Crisis (strict <)
    assert_eq!(phases.get(2), Some("Crisis"));
}

#[test]
fn inner_join_drops_orders_with_unknown_restaurant() {
    let orders = attach_phase(&orders()).unwrap();
    let joined = join_orders_restaurants(&orders, &restaurants(), None).expect("join");

    assert_eq!(joined.height(), 2);
    let cities = joined.column("city").unwrap().str().unwrap();
    assert!(cities.into_iter().flatten().all(|c| c == "Mumbai" || c == "Delhi"));
}

#[test]
fn city_selection_restricts_rows() {
    let orders = attach_phase(&orders()).unwrap();
    let selection = vec!["Mumbai".to_string()];
    let joined = join_orders_restaurants(&orders, &restaurants(), Some(&selection)).expect("join");

    assert_eq!(joined.height(), 1);
    let ids = joined.column("order_id").unwrap().str().unwrap();
    assert_eq!(ids.get(0), Some("1"));
}

#[test]
fn empty_city_selection_yields_empty_frame_not_error() {
    let orders = attach_phase(&orders()).unwrap();
    let selection: Vec<String> = Vec::new();
    let joined = join_orders_restaurants(&orders, &restaurants(), Some(&selection)).expect("join");
    assert_eq!(joined.height(), 0);
}
