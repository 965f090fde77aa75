use polars::prelude::*;

use crate::error::Result;
use crate::phase::{Phase, PHASE_COL};

pub const PRE_CRISIS_ORDERS_COL: &str = "pre_crisis_orders";
pub const CRISIS_ORDERS_COL: &str = "crisis_orders";
pub const DECLINE_PCT_COL: &str = "decline_pct";

/// Per-restaurant order counts per phase with the decline percentage, kept to
/// high-volume partners (Pre-Crisis count >= `min_pre_crisis_orders`), decline
/// descending, top `top_n`.
///
/// A restaurant absent from a phase counts 0 there; a zero Pre-Crisis count
/// leaves the decline null rather than dividing by zero (such rows are dropped
/// by the volume filter anyway, since 0 < the minimum).
pub fn restaurant_decline_ranking(
    filtered_orders: &DataFrame,
    min_pre_crisis_orders: i64,
    top_n: usize,
) -> Result<DataFrame> {
    let phase_count = |phase: Phase, name: &str| {
        col(PHASE_COL)
            .filter(col(PHASE_COL).eq(lit(phase.as_str())))
            .count()
            .cast(DataType::Int64)
            .alias(name)
    };

    let df = filtered_orders
        .clone()
        .lazy()
        .group_by([col("restaurant_name")])
        .agg([
            phase_count(Phase::PreCrisis, PRE_CRISIS_ORDERS_COL),
            phase_count(Phase::Crisis, CRISIS_ORDERS_COL),
        ])
        .with_column(
            when(col(PRE_CRISIS_ORDERS_COL).gt(lit(0)))
                .then(
                    (col(CRISIS_ORDERS_COL) - col(PRE_CRISIS_ORDERS_COL)).cast(DataType::Float64)
                        / col(PRE_CRISIS_ORDERS_COL).cast(DataType::Float64)
                        * lit(100.0),
                )
                .otherwise(lit(NULL).cast(DataType::Float64))
                .alias(DECLINE_PCT_COL),
        )
        .filter(col(PRE_CRISIS_ORDERS_COL).gt_eq(lit(min_pre_crisis_orders)))
        .sort(
            [DECLINE_PCT_COL],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    Ok(df.head(Some(top_n)))
}
