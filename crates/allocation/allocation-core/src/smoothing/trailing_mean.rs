//! Trailing moving-average forecast

use allocation_spi::{AllocationError, Result, Smoother};
use serde::{Deserialize, Serialize};

use super::check_series;

/// Window used when none is configured
pub const DEFAULT_TRAILING_WINDOW: usize = 3;

/// Forecasts each day as the mean of up to `window` observations ending on
/// that day, so day 0 is the first observation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingMeanSmoother {
    window: usize,
}

impl TrailingMeanSmoother {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(AllocationError::invalid("trailing window must be at least 1"));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for TrailingMeanSmoother {
    fn default() -> Self {
        Self {
            window: DEFAULT_TRAILING_WINDOW,
        }
    }
}

impl Smoother for TrailingMeanSmoother {
    fn smooth(&self, series: &[f64]) -> Result<Vec<f64>> {
        check_series(series)?;

        let forecast = (0..series.len())
            .map(|t| {
                let history = &series[(t + 1).saturating_sub(self.window)..=t];
                history.iter().sum::<f64>() / history.len() as f64
            })
            .collect();
        Ok(forecast)
    }

    fn name(&self) -> &str {
        "trailing_mean"
    }
}
