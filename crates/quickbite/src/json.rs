use polars::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};

use quickbite_core::churn::{HighValueChurn, PRE_CRISIS_REVENUE_COL};
use quickbite_core::error::AnalysisError;
use quickbite_core::phase::{MONTH_COL, PHASE_COL};
use quickbite_core::ranking::{CRISIS_ORDERS_COL, DECLINE_PCT_COL, PRE_CRISIS_ORDERS_COL};
use quickbite_core::report::DashboardReport;
use quickbite_core::trends::{CANCEL_RATE_COL, ORDER_COUNT_COL, SLA_RATE_COL};

/// Machine-readable form of the dashboard. An unavailable section serializes
/// as `null`, mirroring the "N/A" rendering of the table output.
pub fn report_to_value(report: &DashboardReport) -> Value {
    json!({
        "monthly_orders": frame_or_null(&report.monthly_orders, monthly_rows),
        "order_averages": value_or_null(&report.order_averages),
        "operational_trends": frame_or_null(&report.operational_trends, operational_rows),
        "sentiment": value_or_null(&report.sentiment),
        "revenue": value_or_null(&report.revenue),
        "churn": churn_or_null(&report.churn),
        "restaurant_ranking": frame_or_null(&report.restaurant_ranking, ranking_rows),
    })
}

fn value_or_null<T: Serialize>(outcome: &Result<T, AnalysisError>) -> Value {
    match outcome {
        Ok(value) => serde_json::to_value(value).unwrap_or(Value::Null),
        Err(_) => Value::Null,
    }
}

fn frame_or_null(
    outcome: &Result<DataFrame, AnalysisError>,
    rows: impl Fn(&DataFrame) -> PolarsResult<Value>,
) -> Value {
    match outcome {
        Ok(df) => rows(df).unwrap_or(Value::Null),
        Err(_) => Value::Null,
    }
}

fn churn_or_null(outcome: &Result<HighValueChurn, AnalysisError>) -> Value {
    let Ok(churn) = outcome else {
        return Value::Null;
    };
    json!({
        "high_value_count": churn.high_value_count,
        "churned_count": churn.churned_count,
        "churn_pct": churn.churn_pct,
        "churned": churned_rows(&churn.churned).unwrap_or(Value::Null),
    })
}

fn monthly_rows(df: &DataFrame) -> PolarsResult<Value> {
    let months = df.column(MONTH_COL)?.str()?;
    let counts = df.column(ORDER_COUNT_COL)?.i64()?;
    let phases = df.column(PHASE_COL)?.str()?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(json!({
            "month": months.get(idx),
            "order_count": counts.get(idx),
            "phase": phases.get(idx),
        }));
    }
    Ok(Value::Array(rows))
}

fn operational_rows(df: &DataFrame) -> PolarsResult<Value> {
    let months = df.column(MONTH_COL)?.str()?;
    let phases = df.column(PHASE_COL)?.str()?;
    let cancel = df.column(CANCEL_RATE_COL)?.f64()?;
    let sla = df.column(SLA_RATE_COL)?.f64()?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(json!({
            "month": months.get(idx),
            "phase": phases.get(idx),
            "cancel_rate": cancel.get(idx),
            "sla_rate": sla.get(idx),
        }));
    }
    Ok(Value::Array(rows))
}

fn ranking_rows(df: &DataFrame) -> PolarsResult<Value> {
    let names = df.column("restaurant_name")?.str()?;
    let pre = df.column(PRE_CRISIS_ORDERS_COL)?.i64()?;
    let crisis = df.column(CRISIS_ORDERS_COL)?.i64()?;
    let decline = df.column(DECLINE_PCT_COL)?.f64()?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(json!({
            "restaurant_name": names.get(idx),
            "pre_crisis_orders": pre.get(idx),
            "crisis_orders": crisis.get(idx),
            "decline_pct": decline.get(idx),
        }));
    }
    Ok(Value::Array(rows))
}

fn churned_rows(df: &DataFrame) -> PolarsResult<Value> {
    let ids = df.column("customer_id")?.str()?;
    let spend = df.column(PRE_CRISIS_REVENUE_COL)?.f64()?;
    let names = df.column("customer_name").ok().and_then(|c| c.str().ok());

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(json!({
            "customer_id": ids.get(idx),
            "customer_name": names.and_then(|column| column.get(idx)),
            "pre_crisis_revenue": spend.get(idx),
        }));
    }
    Ok(Value::Array(rows))
}
