use polars::prelude::*;

use crate::error::Result;
use crate::phase::{Phase, PHASE_COL};

/// Percentage change from `pre` to `crisis`. `None` when the baseline is zero
/// or not finite; a missing denominator is an undefined metric, never a NaN.
pub fn pct_change(pre: f64, crisis: f64) -> Option<f64> {
    if pre == 0.0 || !pre.is_finite() || !crisis.is_finite() {
        return None;
    }
    Some((crisis - pre) / pre * 100.0)
}

/// Pull a single per-phase scalar out of a (phase, value) frame. Returns `None`
/// when the phase group is absent or its value is null.
pub(crate) fn phase_value(
    grouped: &DataFrame,
    phase: Phase,
    value_col: &str,
) -> Result<Option<f64>> {
    let phases = grouped.column(PHASE_COL)?.str()?;
    let values = grouped.column(value_col)?.f64()?;
    for idx in 0..grouped.height() {
        if phases.get(idx) == Some(phase.as_str()) {
            return Ok(values.get(idx));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_change_matches_definition() {
        let change = pct_change(110.0, 85.0).unwrap();
        assert!((change - (-22.727272727272727)).abs() < 1e-9);
        assert_eq!(pct_change(100.0, 100.0), Some(0.0));
    }

    #[test]
    fn zero_or_non_finite_baseline_is_undefined() {
        assert_eq!(pct_change(0.0, 85.0), None);
        assert_eq!(pct_change(f64::NAN, 85.0), None);
        assert_eq!(pct_change(100.0, f64::INFINITY), None);
    }
}
