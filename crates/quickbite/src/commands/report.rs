use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quickbite_core::report::{run_pipeline, PipelineConfig};
use quickbite_loader::DashboardTables;
use tracing::info;

use crate::config::FileConfig;
use crate::json;
use crate::render;

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Directory holding the input CSV tables
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Restrict the city-scoped sections to this city (repeatable)
    #[arg(long = "city")]
    cities: Vec<String>,

    /// Optional TOML settings file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum Pre-Crisis order volume for the restaurant ranking
    #[arg(long)]
    min_pre_crisis_orders: Option<i64>,

    /// How many restaurants to rank
    #[arg(long)]
    top_restaurants: Option<usize>,

    /// How many negative-review keywords to list
    #[arg(long)]
    top_keywords: Option<usize>,

    /// Emit the report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

pub fn run(args: ReportArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let defaults = PipelineConfig::default();
    let config = PipelineConfig {
        cities: if args.cities.is_empty() {
            file.cities
        } else {
            Some(args.cities)
        },
        min_pre_crisis_orders: args
            .min_pre_crisis_orders
            .or(file.min_pre_crisis_orders)
            .unwrap_or(defaults.min_pre_crisis_orders),
        top_restaurants: args
            .top_restaurants
            .or(file.top_restaurants)
            .unwrap_or(defaults.top_restaurants),
        top_keywords: args
            .top_keywords
            .or(file.top_keywords)
            .unwrap_or(defaults.top_keywords),
    };
    let data_dir = args
        .data_dir
        .or(file.data_dir)
        .unwrap_or_else(|| PathBuf::from("data"));

    let tables = DashboardTables::load_dir(&data_dir)
        .with_context(|| format!("failed to load input tables from {}", data_dir.display()))?;
    info!(path = %data_dir.display(), "input tables loaded");

    let report = run_pipeline(&tables, &config).context("dashboard pipeline failed")?;
    if args.json {
        let value = json::report_to_value(&report);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        render::print_report(&report);
    }
    Ok(())
}
