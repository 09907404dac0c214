//! Exponential smoothing of a daily series
//!
//! Unlike textbook SES, the forecast for day `t` uses the observation of day
//! `t-1`, so `forecast[t]` never sees `series[t]`:
//!
//! ```text
//! F_0 = Y_0
//! F_t = α·Y_{t-1} + (1 - α)·F_{t-1}
//! ```

use allocation_spi::{AllocationError, Result, Smoother};
use serde::{Deserialize, Serialize};

use super::check_series;

/// Smoothing constant used when none is configured
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Exponentially weighted one-step-ahead forecaster
///
/// # Example
///
/// ```rust
/// use allocation_core::smoothing::ExponentialSmoother;
/// use allocation_spi::Smoother;
///
/// let smoother = ExponentialSmoother::new(0.5).unwrap();
/// let forecast = smoother.smooth(&[10.0, 20.0, 10.0]).unwrap();
/// assert_eq!(forecast, vec![10.0, 10.0, 15.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialSmoother {
    /// Smoothing parameter (0 < alpha <= 1)
    alpha: f64,
}

impl ExponentialSmoother {
    /// Create a smoother with smoothing parameter `alpha` in (0, 1].
    ///
    /// `alpha = 1` degenerates to a lag-1 passthrough.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(AllocationError::invalid(format!(
                "alpha must be in (0, 1], got {}",
                alpha
            )));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for ExponentialSmoother {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl Smoother for ExponentialSmoother {
    fn smooth(&self, series: &[f64]) -> Result<Vec<f64>> {
        check_series(series)?;

        let mut forecast = Vec::with_capacity(series.len());
        let mut level = series[0];
        forecast.push(level);
        for &previous in &series[..series.len() - 1] {
            level = self.alpha * previous + (1.0 - self.alpha) * level;
            forecast.push(level);
        }
        Ok(forecast)
    }

    fn name(&self) -> &str {
        "exponential"
    }
}
