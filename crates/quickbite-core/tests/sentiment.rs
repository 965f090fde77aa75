use polars::prelude::*;

use quickbite_core::joins::attach_phase;
use quickbite_core::sentiment::sentiment_extraction;

fn timestamps(values: &[&str]) -> Series {
    Series::new("order_timestamp".into(), values)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .expect("timestamps parse")
}

fn orders() -> DataFrame {
    let mut df = df!("order_id" => &["1", "2", "3", "4"]).unwrap();
    df.with_column(timestamps(&[
        "2025-05-15 12:00:00",
        "2025-06-10 12:00:00",
        "2025-06-20 12:00:00",
        "2025-07-01 12:00:00",
    ]))
    .unwrap();
    attach_phase(&df).expect("attach phase")
}

#[test]
fn corpus_holds_only_negative_crisis_reviews() {
    let ratings = df!(
        "order_id" => &["1", "2", "3", "4"],
        "rating" => &[2.0, 1.5, 4.5, 2.0],
        "sentiment_score" => &[-0.8, -0.6, 0.7, -0.5],
        "review_text" => &[
            Some("awful pre crisis meal"), // Pre-Crisis: excluded
            Some("Cold food arrived late"),
            Some("lovely biryani"),         // positive: excluded
            None,                            // negative but no text
        ],
    )
    .unwrap();

    let summary = sentiment_extraction(&ratings, &orders(), 10).expect("sentiment");
    assert!(summary.has_reviews());
    assert_eq!(summary.negative_review_corpus, "Cold food arrived late");
    assert!(summary.keywords.iter().any(|k| k.keyword == "cold"));
    assert!(!summary.keywords.iter().any(|k| k.keyword == "awful"));
}

#[test]
fn ratings_referencing_unknown_orders_are_dropped() {
    let ratings = df!(
        "order_id" => &["2", "nope"],
        "rating" => &[1.0, 1.0],
        "sentiment_score" => &[-0.9, -0.9],
        "review_text" => &[Some("late delivery"), Some("phantom order")],
    )
    .unwrap();

    let summary = sentiment_extraction(&ratings, &orders(), 10).expect("sentiment");
    assert_eq!(summary.negative_review_corpus, "late delivery");
}

#[test]
fn empty_corpus_is_a_no_data_state() {
    let ratings = df!(
        "order_id" => &["1", "3"],
        "rating" => &[4.0, 5.0],
        "sentiment_score" => &[0.5, 0.9],
        "review_text" => &[Some("fine"), Some("great")],
    )
    .unwrap();

    let summary = sentiment_extraction(&ratings, &orders(), 10).expect("sentiment");
    assert!(!summary.has_reviews());
    assert!(summary.keywords.is_empty());
}

#[test]
fn average_rating_is_computed_per_phase() {
    let ratings = df!(
        "order_id" => &["1", "2", "3"],
        "rating" => &[4.0, 1.0, 3.0],
        "sentiment_score" => &[0.5, -0.9, 0.1],
        "review_text" => &[None::<&str>, Some("cold"), None::<&str>],
    )
    .unwrap();

    let summary = sentiment_extraction(&ratings, &orders(), 10).expect("sentiment");
    assert_eq!(summary.pre_crisis_avg_rating, Some(4.0));
    assert!((summary.crisis_avg_rating.unwrap() - 2.0).abs() < 1e-9);
}
