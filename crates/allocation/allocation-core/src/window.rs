//! Window aggregation of forecast series

use allocation_spi::{AllocationError, Result};

/// Number of trailing forecast days averaged into the demand figure
pub const DEFAULT_WINDOW: usize = 7;

/// Mean of the last `window` values of `forecast`.
///
/// A forecast shorter than the window is averaged over all of its values.
pub fn window_average(forecast: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(AllocationError::invalid("window must be at least 1"));
    }
    if forecast.is_empty() {
        return Err(AllocationError::invalid("forecast is empty"));
    }

    let tail = &forecast[forecast.len().saturating_sub(window)..];
    Ok(tail.iter().sum::<f64>() / tail.len() as f64)
}
