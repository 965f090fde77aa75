use polars::prelude::DataFrame;
use quickbite_loader::DashboardTables;
use tracing::{info, warn};

use crate::churn::{self, HighValueChurn};
use crate::error::{AnalysisError, Result};
use crate::joins;
use crate::ranking;
use crate::revenue::{self, RevenueImpact};
use crate::sentiment::{self, SentimentSummary};
use crate::trends::{self, PhaseAverages};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// `None` keeps every city; an empty list empties the city-scoped sections.
    pub cities: Option<Vec<String>>,
    pub min_pre_crisis_orders: i64,
    pub top_restaurants: usize,
    pub top_keywords: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cities: None,
            min_pre_crisis_orders: 50,
            top_restaurants: 10,
            top_keywords: 15,
        }
    }
}

/// One full dashboard run. Each section carries its own outcome so a failed
/// metric renders as unavailable without hiding the rest.
#[derive(Debug)]
pub struct DashboardReport {
    pub monthly_orders: Result<DataFrame>,
    pub order_averages: Result<PhaseAverages>,
    pub operational_trends: Result<DataFrame>,
    pub sentiment: Result<SentimentSummary>,
    pub revenue: Result<RevenueImpact>,
    pub churn: Result<HighValueChurn>,
    pub restaurant_ranking: Result<DataFrame>,
}

/// Run every dashboard section over freshly supplied tables.
///
/// Phase attachment and the restaurant join are the only shared stages; they
/// run first because every other step requires the phase column to exist.
/// Errors past that point are confined to their section.
pub fn run_pipeline(tables: &DashboardTables, config: &PipelineConfig) -> Result<DashboardReport> {
    let orders = joins::attach_phase(&tables.orders)?;
    let filtered =
        joins::join_orders_restaurants(&orders, &tables.restaurants, config.cities.as_deref())?;
    info!(
        orders = orders.height(),
        filtered = filtered.height(),
        "phase attachment and city filter complete"
    );

    let monthly_orders = trends::monthly_order_counts(&filtered);
    let order_averages = monthly_orders
        .as_ref()
        .map_err(|error| AnalysisError::Metric(format!("monthly order counts unavailable: {error}")))
        .and_then(trends::phase_order_averages);

    let operational_trends = trends::operational_trends(&orders, &tables.delivery);
    let sentiment = sentiment::sentiment_extraction(&tables.ratings, &orders, config.top_keywords);
    let revenue = revenue::revenue_by_phase(&orders);
    let churn = churn::high_value_churn(&orders, Some(&tables.customers));
    let restaurant_ranking = ranking::restaurant_decline_ranking(
        &filtered,
        config.min_pre_crisis_orders,
        config.top_restaurants,
    );

    Ok(DashboardReport {
        monthly_orders: section("monthly_orders", monthly_orders),
        order_averages: section("order_averages", order_averages),
        operational_trends: section("operational_trends", operational_trends),
        sentiment: section("sentiment", sentiment),
        revenue: section("revenue", revenue),
        churn: section("churn", churn),
        restaurant_ranking: section("restaurant_ranking", restaurant_ranking),
    })
}

fn section<T>(name: &str, outcome: Result<T>) -> Result<T> {
    if let Err(error) = &outcome {
        warn!(section = name, %error, "dashboard section failed");
    }
    outcome
}
