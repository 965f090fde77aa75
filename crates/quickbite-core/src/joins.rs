use polars::prelude::*;

use crate::error::Result;
use crate::phase::{month_of_timestamp_expr, phase_of_timestamp_expr};

pub const TIMESTAMP_COL: &str = "order_timestamp";

/// First stage of every run: attach `month_year` and `phase` to the raw orders.
/// Downstream steps require these columns; they never derive them ad hoc.
pub fn attach_phase(orders: &DataFrame) -> Result<DataFrame> {
    let df = orders
        .clone()
        .lazy()
        .with_columns([
            month_of_timestamp_expr(TIMESTAMP_COL),
            phase_of_timestamp_expr(TIMESTAMP_COL),
        ])
        .collect()?;
    Ok(df)
}

/// Inner join to restaurants (orders referencing an unknown restaurant drop
/// out), then restrict to the selected cities. `None` keeps every city; an
/// empty selection yields an empty frame, which is a defined result.
pub fn join_orders_restaurants(
    orders: &DataFrame,
    restaurants: &DataFrame,
    cities: Option<&[String]>,
) -> Result<DataFrame> {
    let mut lf = orders.clone().lazy().join(
        restaurants.clone().lazy(),
        [col("restaurant_id")],
        [col("restaurant_id")],
        JoinArgs::new(JoinType::Inner),
    );

    if let Some(selection) = cities {
        let selection_df = df!("city" => selection)?;
        lf = lf.join(
            selection_df.lazy(),
            [col("city")],
            [col("city")],
            JoinArgs::new(JoinType::Semi),
        );
    }

    Ok(lf.collect()?)
}
