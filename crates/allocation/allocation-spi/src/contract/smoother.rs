//! Trait for forecast smoothing

use crate::error::Result;

/// Converts one entity's observations into a forecast series.
///
/// Implementations are pure: the same input always yields the same forecast
/// and no state is carried between calls. The output has the same length as
/// the input and `forecast[0] == series[0]`.
pub trait Smoother: Send + Sync {
    /// Smooth a non-empty series into a forecast of equal length
    fn smooth(&self, series: &[f64]) -> Result<Vec<f64>>;

    /// Short name used in logs and result records
    fn name(&self) -> &str;
}
