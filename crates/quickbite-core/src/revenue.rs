use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::kpi::{pct_change, phase_value};
use crate::phase::{Phase, PHASE_COL};

pub const REVENUE_COL: &str = "revenue";

/// revenue = subtotal + delivery fee - discount, per order.
pub fn revenue_expr() -> Expr {
    (col("subtotal_amount") + col("delivery_fee") - col("discount_amount")).alias(REVENUE_COL)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RevenueImpact {
    pub pre_crisis: f64,
    pub crisis: f64,
    /// `None` when there is no Pre-Crisis revenue to baseline against.
    pub change_pct: Option<f64>,
}

/// Total revenue per phase. A phase with no orders contributes 0.0.
pub fn revenue_by_phase(orders_with_phase: &DataFrame) -> Result<RevenueImpact> {
    let grouped = orders_with_phase
        .clone()
        .lazy()
        .with_column(revenue_expr())
        .group_by([col(PHASE_COL)])
        .agg([col(REVENUE_COL).sum().alias("total_revenue")])
        .collect()?;

    let pre_crisis = phase_value(&grouped, Phase::PreCrisis, "total_revenue")?.unwrap_or(0.0);
    let crisis = phase_value(&grouped, Phase::Crisis, "total_revenue")?.unwrap_or(0.0);

    Ok(RevenueImpact {
        pre_crisis,
        crisis,
        change_pct: pct_change(pre_crisis, crisis),
    })
}
