use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::kpi::{pct_change, phase_value};
use crate::phase::{phase_of_month_expr, Phase, MONTH_COL, PHASE_COL};

pub const ORDER_COUNT_COL: &str = "order_count";
pub const CANCEL_RATE_COL: &str = "cancel_rate";
pub const SLA_RATE_COL: &str = "sla_rate";

/// (month, phase) -> order count, ascending by month. The phase here comes from
/// the month-string path, matching how the dashboard labelled this table.
pub fn monthly_order_counts(filtered_orders: &DataFrame) -> Result<DataFrame> {
    let df = filtered_orders
        .clone()
        .lazy()
        .group_by([col(MONTH_COL)])
        .agg([col("order_id")
            .count()
            .cast(DataType::Int64)
            .alias(ORDER_COUNT_COL)])
        .with_column(phase_of_month_expr())
        .sort([MONTH_COL], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PhaseAverages {
    pub pre_crisis: Option<f64>,
    pub crisis: Option<f64>,
    /// `None` when there are no Pre-Crisis months to baseline against.
    pub decline_pct: Option<f64>,
}

/// Mean monthly order count per phase plus the decline percentage.
pub fn phase_order_averages(monthly: &DataFrame) -> Result<PhaseAverages> {
    let grouped = monthly
        .clone()
        .lazy()
        .group_by([col(PHASE_COL)])
        .agg([col(ORDER_COUNT_COL).mean().alias("avg_orders")])
        .collect()?;

    let pre_crisis = phase_value(&grouped, Phase::PreCrisis, "avg_orders")?;
    let crisis = phase_value(&grouped, Phase::Crisis, "avg_orders")?;
    let decline_pct = match (pre_crisis, crisis) {
        (Some(pre), Some(cri)) => pct_change(pre, cri),
        _ => None,
    };

    Ok(PhaseAverages {
        pre_crisis,
        crisis,
        decline_pct,
    })
}

/// Cancellation and SLA-compliance rates per (month, phase).
///
/// Left join keeps orders without a delivery record; their metric columns stay
/// null and drop out of both means, so an orphan order is neither a
/// cancellation nor a missed SLA.
pub fn operational_trends(orders_with_phase: &DataFrame, delivery: &DataFrame) -> Result<DataFrame> {
    let cancelled = when(col("is_cancelled").eq(lit("Y")))
        .then(lit(1.0))
        .when(col("is_cancelled").eq(lit("N")))
        .then(lit(0.0))
        .otherwise(lit(NULL).cast(DataType::Float64))
        .alias("cancelled");

    let on_time = col("actual_delivery_time_mins")
        .lt_eq(col("expected_delivery_time_mins"))
        .cast(DataType::Float64)
        .alias("on_time");

    let df = orders_with_phase
        .clone()
        .lazy()
        .join(
            delivery.clone().lazy(),
            [col("order_id")],
            [col("order_id")],
            JoinArgs::new(JoinType::Left),
        )
        .with_columns([cancelled, on_time])
        .group_by([col(MONTH_COL), col(PHASE_COL)])
        .agg([
            col("cancelled").mean().alias(CANCEL_RATE_COL),
            col("on_time").mean().alias(SLA_RATE_COL),
        ])
        .sort([MONTH_COL], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}
