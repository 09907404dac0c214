//! Forecast smoothers
//!
//! Both smoothers start from the first observation and build every value from
//! observations up to that day, so each forecast value is a convex
//! combination of observed data.
//!
//! - **Exponential**: `F_t = α·Y_{t-1} + (1-α)·F_{t-1}`
//! - **Trailing mean**: `F_t = mean(Y_{t-m+1}..=Y_t)`, `m = min(k, t + 1)`

pub mod exponential;
pub mod trailing_mean;

pub use exponential::{ExponentialSmoother, DEFAULT_ALPHA};
pub use trailing_mean::{TrailingMeanSmoother, DEFAULT_TRAILING_WINDOW};

use allocation_spi::{AllocationError, Result};

fn check_series(series: &[f64]) -> Result<()> {
    if series.is_empty() {
        return Err(AllocationError::invalid("series is empty"));
    }
    if let Some(value) = series.iter().find(|v| !v.is_finite()) {
        return Err(AllocationError::invalid(format!(
            "series contains non-finite value {}",
            value
        )));
    }
    Ok(())
}
