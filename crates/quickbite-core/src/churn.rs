use polars::prelude::*;

use crate::error::Result;
use crate::phase::{Phase, PHASE_COL};
use crate::revenue::{revenue_expr, REVENUE_COL};

/// Share of Pre-Crisis customers considered high-value.
pub const HIGH_VALUE_SHARE: f64 = 0.05;

pub const PRE_CRISIS_REVENUE_COL: &str = "pre_crisis_revenue";

#[derive(Debug, Clone)]
pub struct HighValueChurn {
    /// Top Pre-Crisis spenders, revenue descending.
    pub high_value: DataFrame,
    /// High-value customers with zero Crisis orders, names attached when a
    /// customer table was supplied.
    pub churned: DataFrame,
    pub high_value_count: usize,
    pub churned_count: usize,
    /// `None` when the high-value set is empty (fewer than 20 Pre-Crisis
    /// customers truncates the 5% cutoff to zero).
    pub churn_pct: Option<f64>,
}

/// Identify the top 5% of Pre-Crisis spenders and which of them never ordered
/// again during the Crisis phase.
pub fn high_value_churn(
    orders_with_phase: &DataFrame,
    customers: Option<&DataFrame>,
) -> Result<HighValueChurn> {
    let spend = orders_with_phase
        .clone()
        .lazy()
        .filter(col(PHASE_COL).eq(lit(Phase::PreCrisis.as_str())))
        .with_column(revenue_expr())
        .group_by([col("customer_id")])
        .agg([col(REVENUE_COL).sum().alias(PRE_CRISIS_REVENUE_COL)])
        .sort(
            [PRE_CRISIS_REVENUE_COL],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    // floor(distinct customers x 0.05); truncation to zero is a valid empty set
    let cutoff = (spend.height() as f64 * HIGH_VALUE_SHARE).floor() as usize;
    let high_value = spend.head(Some(cutoff));

    let crisis_customers = orders_with_phase
        .clone()
        .lazy()
        .filter(col(PHASE_COL).eq(lit(Phase::Crisis.as_str())))
        .select([col("customer_id")]);

    let mut churned_lf = high_value.clone().lazy().join(
        crisis_customers,
        [col("customer_id")],
        [col("customer_id")],
        JoinArgs::new(JoinType::Anti),
    );
    if let Some(customers) = customers {
        churned_lf = churned_lf.join(
            customers.clone().lazy(),
            [col("customer_id")],
            [col("customer_id")],
            JoinArgs::new(JoinType::Left),
        );
    }
    let churned = churned_lf.collect()?;

    let high_value_count = high_value.height();
    let churned_count = churned.height();
    let churn_pct = if high_value_count == 0 {
        None
    } else {
        Some(churned_count as f64 / high_value_count as f64 * 100.0)
    };

    Ok(HighValueChurn {
        high_value,
        churned,
        high_value_count,
        churned_count,
        churn_pct,
    })
}
