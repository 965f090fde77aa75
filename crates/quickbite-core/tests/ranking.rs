use polars::prelude::*;

use quickbite_core::ranking::{
    restaurant_decline_ranking, CRISIS_ORDERS_COL, DECLINE_PCT_COL, PRE_CRISIS_ORDERS_COL,
};

fn counts_frame(volumes: &[(&str, usize, usize)]) -> DataFrame {
    let mut names: Vec<&str> = Vec::new();
    let mut phases: Vec<&str> = Vec::new();
    for (name, pre, crisis) in volumes {
        for _ in 0..*pre {
            names.push(name);
            phases.push("Pre-Crisis");
        }
        for _ in 0..*crisis {
            names.push(name);
            phases.push("Crisis");
        }
    }
    df!("restaurant_name" => names, "phase" => phases).unwrap()
}

#[test]
fn fifty_pre_and_25_crisis_orders_is_minus_fifty_percent() {
    let df = counts_frame(&[("Spice Route", 50, 25)]);
    let ranking = restaurant_decline_ranking(&df, 50, 10).expect("ranking");

    assert_eq!(ranking.height(), 1);
    let pre = ranking.column(PRE_CRISIS_ORDERS_COL).unwrap().i64().unwrap();
    let crisis = ranking.column(CRISIS_ORDERS_COL).unwrap().i64().unwrap();
    let decline = ranking.column(DECLINE_PCT_COL).unwrap().f64().unwrap();
    assert_eq!(pre.get(0), Some(50));
    assert_eq!(crisis.get(0), Some(25));
    assert!((decline.get(0).unwrap() + 50.0).abs() < 1e-9);
}

#[test]
fn low_volume_and_crisis_only_restaurants_are_excluded() {
    let df = counts_frame(&[
        ("Spice Route", 50, 25),
        ("Biryani House", 49, 0),
        ("Crisis Popup", 0, 30),
    ]);
    let ranking = restaurant_decline_ranking(&df, 50, 10).expect("ranking");

    assert_eq!(ranking.height(), 1);
    let names = ranking.column("restaurant_name").unwrap().str().unwrap();
    assert_eq!(names.get(0), Some("Spice Route"));
}

#[test]
fn ranking_sorts_decline_descending_and_truncates() {
    let df = counts_frame(&[
        ("Worst", 100, 10),   // -90%
        ("Held Up", 60, 60),  // 0%
        ("Mild", 80, 60),     // -25%
    ]);
    let ranking = restaurant_decline_ranking(&df, 50, 2).expect("ranking");

    assert_eq!(ranking.height(), 2);
    let names = ranking.column("restaurant_name").unwrap().str().unwrap();
    assert_eq!(names.get(0), Some("Held Up"));
    assert_eq!(names.get(1), Some("Mild"));
}
