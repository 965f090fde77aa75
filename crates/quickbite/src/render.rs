use comfy_table::{presets::UTF8_FULL, Table};
use polars::prelude::*;

use quickbite_core::churn::{HighValueChurn, PRE_CRISIS_REVENUE_COL};
use quickbite_core::error::AnalysisError;
use quickbite_core::phase::{MONTH_COL, PHASE_COL};
use quickbite_core::ranking::{CRISIS_ORDERS_COL, DECLINE_PCT_COL, PRE_CRISIS_ORDERS_COL};
use quickbite_core::report::DashboardReport;
use quickbite_core::revenue::RevenueImpact;
use quickbite_core::sentiment::SentimentSummary;
use quickbite_core::trends::{PhaseAverages, CANCEL_RATE_COL, ORDER_COUNT_COL, SLA_RATE_COL};
use tracing::warn;

pub const NOT_AVAILABLE: &str = "N/A";

pub fn print_report(report: &DashboardReport) {
    section("Monthly order trends", &report.monthly_orders, print_monthly);
    section("Order volume KPIs", &report.order_averages, print_averages);
    section(
        "Operational gaps: cancellations & delivery SLA",
        &report.operational_trends,
        print_operational,
    );
    section("Customer sentiment", &report.sentiment, print_sentiment);
    section("Revenue impact", &report.revenue, print_revenue);
    section("High-value customer churn", &report.churn, print_churn);
    section(
        "Restaurant decline ranking",
        &report.restaurant_ranking,
        print_ranking,
    );
}

/// A failed section renders as unavailable; it never suppresses its siblings.
fn section<T>(
    title: &str,
    outcome: &Result<T, AnalysisError>,
    print: impl FnOnce(&T) -> PolarsResult<()>,
) {
    println!("\n== {title} ==");
    match outcome {
        Ok(value) => {
            if let Err(error) = print(value) {
                warn!(%error, section = title, "failed to render section");
                println!("{NOT_AVAILABLE}");
            }
        }
        Err(error) => {
            warn!(%error, section = title, "section unavailable");
            println!("{NOT_AVAILABLE}");
        }
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{pct:.1}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Fractions (0..1) rendered as percentages.
fn format_rate(value: Option<f64>) -> String {
    format_pct(value.map(|fraction| fraction * 100.0))
}

fn format_count(value: Option<f64>) -> String {
    match value {
        Some(count) => format!("{count:.0}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn print_monthly(df: &DataFrame) -> PolarsResult<()> {
    let months = df.column(MONTH_COL)?.str()?;
    let counts = df.column(ORDER_COUNT_COL)?.i64()?;
    let phases = df.column(PHASE_COL)?.str()?;

    let mut table = new_table(&["Month", "Orders", "Phase"]);
    for idx in 0..df.height() {
        table.add_row(vec![
            months.get(idx).unwrap_or("").to_string(),
            counts.get(idx).map(|v| v.to_string()).unwrap_or_default(),
            phases.get(idx).unwrap_or("").to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn print_averages(averages: &PhaseAverages) -> PolarsResult<()> {
    println!(
        "Pre-Crisis avg orders/month: {}",
        format_count(averages.pre_crisis)
    );
    println!("Crisis avg orders/month:     {}", format_count(averages.crisis));
    println!("Order volume change:         {}", format_pct(averages.decline_pct));
    Ok(())
}

fn print_operational(df: &DataFrame) -> PolarsResult<()> {
    let months = df.column(MONTH_COL)?.str()?;
    let phases = df.column(PHASE_COL)?.str()?;
    let cancel = df.column(CANCEL_RATE_COL)?.f64()?;
    let sla = df.column(SLA_RATE_COL)?.f64()?;

    let mut table = new_table(&["Month", "Phase", "Cancel rate", "SLA compliance"]);
    for idx in 0..df.height() {
        table.add_row(vec![
            months.get(idx).unwrap_or("").to_string(),
            phases.get(idx).unwrap_or("").to_string(),
            format_rate(cancel.get(idx)),
            format_rate(sla.get(idx)),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn print_sentiment(summary: &SentimentSummary) -> PolarsResult<()> {
    println!(
        "Avg rating Pre-Crisis: {}   Crisis: {}",
        match summary.pre_crisis_avg_rating {
            Some(avg) => format!("{avg:.2}"),
            None => NOT_AVAILABLE.to_string(),
        },
        match summary.crisis_avg_rating {
            Some(avg) => format!("{avg:.2}"),
            None => NOT_AVAILABLE.to_string(),
        },
    );

    if !summary.has_reviews() {
        println!("No review data available.");
        return Ok(());
    }

    let mut table = new_table(&["Keyword", "Mentions"]);
    for keyword in &summary.keywords {
        table.add_row(vec![keyword.keyword.clone(), keyword.count.to_string()]);
    }
    println!("Top negative keywords (Crisis period):");
    println!("{table}");
    Ok(())
}

fn print_revenue(impact: &RevenueImpact) -> PolarsResult<()> {
    println!("Pre-Crisis total revenue: {:.2}", impact.pre_crisis);
    println!("Crisis total revenue:     {:.2}", impact.crisis);
    println!("Revenue change:           {}", format_pct(impact.change_pct));
    Ok(())
}

fn print_churn(churn: &HighValueChurn) -> PolarsResult<()> {
    println!("High-value customers (top 5% Pre-Crisis spend): {}", churn.high_value_count);
    println!("Churned during Crisis:                          {}", churn.churned_count);
    println!("High-value churn:                               {}", format_pct(churn.churn_pct));

    if churn.churned.height() == 0 {
        return Ok(());
    }

    let ids = churn.churned.column("customer_id")?.str()?;
    let spend = churn.churned.column(PRE_CRISIS_REVENUE_COL)?.f64()?;
    let names = churn.churned.column("customer_name").ok().and_then(|c| c.str().ok());

    let mut table = new_table(&["Customer", "Name", "Pre-Crisis revenue"]);
    for idx in 0..churn.churned.height() {
        table.add_row(vec![
            ids.get(idx).unwrap_or("").to_string(),
            names
                .and_then(|column| column.get(idx))
                .unwrap_or("")
                .to_string(),
            spend.get(idx).map(|v| format!("{v:.2}")).unwrap_or_default(),
        ]);
    }
    println!("Churned high-value customers for outreach:");
    println!("{table}");
    Ok(())
}

fn print_ranking(df: &DataFrame) -> PolarsResult<()> {
    let names = df.column("restaurant_name")?.str()?;
    let pre = df.column(PRE_CRISIS_ORDERS_COL)?.i64()?;
    let crisis = df.column(CRISIS_ORDERS_COL)?.i64()?;
    let decline = df.column(DECLINE_PCT_COL)?.f64()?;

    let mut table = new_table(&["Restaurant", "Pre-Crisis orders", "Crisis orders", "Decline"]);
    for idx in 0..df.height() {
        table.add_row(vec![
            names.get(idx).unwrap_or("").to_string(),
            pre.get(idx).map(|v| v.to_string()).unwrap_or_default(),
            crisis.get(idx).map(|v| v.to_string()).unwrap_or_default(),
            format_pct(decline.get(idx)),
        ]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_percentages_render_as_not_available() {
        assert_eq!(format_pct(None), NOT_AVAILABLE);
        assert_eq!(format_pct(Some(-22.727)), "-22.7%");
        assert_eq!(format_rate(Some(0.5)), "50.0%");
    }
}
