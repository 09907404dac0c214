//! Forecast-allocate pipeline
//!
//! Chains smoothing, window aggregation and allocation over one batch of
//! entities. A failure for any entity fails the whole batch.

use std::collections::BTreeMap;

use allocation_spi::{
    AllocationError, AllocationResult, Allocator, Demand, DemandTable, EntityResult, Result,
    Smoother,
};
use tracing::{debug, info};

use crate::policy::OffsetAllocator;
use crate::smoothing::ExponentialSmoother;
use crate::window::{window_average, DEFAULT_WINDOW};

/// Smoother → window average → allocator
pub struct AllocationPipeline {
    smoother: Box<dyn Smoother>,
    allocator: Box<dyn Allocator>,
    window: usize,
}

impl AllocationPipeline {
    pub fn new(
        smoother: Box<dyn Smoother>,
        allocator: Box<dyn Allocator>,
        window: usize,
    ) -> Result<Self> {
        if window == 0 {
            return Err(AllocationError::invalid("window must be at least 1"));
        }
        Ok(Self {
            smoother,
            allocator,
            window,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn smoother(&self) -> &dyn Smoother {
        self.smoother.as_ref()
    }

    pub fn allocator(&self) -> &dyn Allocator {
        self.allocator.as_ref()
    }

    /// Run every stage over `table` and assemble the result record
    pub fn run(&self, table: &DemandTable) -> Result<AllocationResult> {
        let mut forecasts = BTreeMap::new();
        let mut demand = Demand::new();

        for (entity, series) in table.iter() {
            let forecast = self.smoother.smooth(series)?;
            let average = window_average(&forecast, self.window)?;
            debug!(entity, window_average = average, "smoothed series");
            demand.insert(entity.to_string(), average);
            forecasts.insert(entity.to_string(), forecast);
        }

        let allocation = self.allocator.allocate(&demand)?;

        let mut entities = BTreeMap::new();
        let mut objective = 0.0;
        for (entity, forecast) in forecasts {
            let window_average = demand[&entity];
            let quantity = allocation.get(&entity).copied().ok_or_else(|| {
                AllocationError::invalid(format!("no allocation produced for '{}'", entity))
            })?;
            objective += window_average * quantity;
            entities.insert(
                entity,
                EntityResult {
                    forecast,
                    window_average,
                    allocation: quantity,
                },
            );
        }

        info!(
            entities = entities.len(),
            days = table.days(),
            smoother = self.smoother.name(),
            policy = self.allocator.name(),
            objective,
            "allocation complete"
        );

        Ok(AllocationResult {
            smoother: self.smoother.name().to_string(),
            policy: self.allocator.name().to_string(),
            entities,
            objective,
        })
    }
}

impl Default for AllocationPipeline {
    fn default() -> Self {
        Self {
            smoother: Box::new(ExponentialSmoother::default()),
            allocator: Box::new(OffsetAllocator::default()),
            window: DEFAULT_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CapacityAllocator;

    fn capacity_pipeline(capacity: f64) -> AllocationPipeline {
        AllocationPipeline::new(
            Box::new(ExponentialSmoother::default()),
            Box::new(CapacityAllocator::new(capacity).unwrap()),
            DEFAULT_WINDOW,
        )
        .unwrap()
    }

    #[test]
    fn test_constant_series_offset() {
        let table = DemandTable::from_columns(vec![("A", vec![10.0; 8])]).unwrap();
        let result = AllocationPipeline::default().run(&table).unwrap();

        let a = &result.entities["A"];
        assert_eq!(a.forecast.len(), 8);
        assert!(a.forecast.iter().all(|v| (v - 10.0).abs() < 1e-10));
        assert!((a.window_average - 10.0).abs() < 1e-10);
        assert!((a.allocation - 5.0).abs() < 1e-10);
        assert_eq!(result.policy, "offset");
        assert_eq!(result.smoother, "exponential");
    }

    #[test]
    fn test_constant_series_capacity() {
        let table = DemandTable::from_columns(vec![("A", vec![10.0; 8])]).unwrap();
        let result = capacity_pipeline(100.0).run(&table).unwrap();
        assert_eq!(result.entities["A"].allocation, 100.0);
        assert!((result.objective - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_entities_capacity() {
        let table =
            DemandTable::from_columns(vec![("A", vec![20.0; 5]), ("B", vec![5.0; 5])]).unwrap();
        let result = capacity_pipeline(100.0).run(&table).unwrap();
        assert_eq!(result.allocation()["A"], 100.0);
        assert_eq!(result.allocation()["B"], 0.0);
    }

    #[test]
    fn test_allocator_failure_fails_batch() {
        struct Failing;
        impl Allocator for Failing {
            fn allocate(&self, _: &Demand) -> Result<allocation_spi::Allocation> {
                Err(AllocationError::infeasible("nope"))
            }
            fn name(&self) -> &str {
                "failing"
            }
        }

        let pipeline =
            AllocationPipeline::new(Box::new(ExponentialSmoother::default()), Box::new(Failing), 7)
                .unwrap();
        let table = DemandTable::from_columns(vec![("A", vec![1.0])]).unwrap();
        assert_eq!(
            pipeline.run(&table).unwrap_err(),
            AllocationError::infeasible("nope")
        );
    }

    #[test]
    fn test_zero_window_rejected() {
        let result = AllocationPipeline::new(
            Box::new(ExponentialSmoother::default()),
            Box::new(OffsetAllocator::default()),
            0,
        );
        assert!(result.is_err());
    }
}
