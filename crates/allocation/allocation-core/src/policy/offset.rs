//! Offset allocation rule

use allocation_spi::{Allocation, AllocationError, Allocator, Demand, Result};
use serde::{Deserialize, Serialize};

use super::check_demand;

/// Offset subtracted from demand when none is configured
pub const DEFAULT_OFFSET: f64 = 5.0;

/// `allocation = max(0, demand - offset)` per entity, with no total constraint.
///
/// Negative demand is accepted and clamps to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetAllocator {
    offset: f64,
}

impl OffsetAllocator {
    pub fn new(offset: f64) -> Result<Self> {
        if !offset.is_finite() {
            return Err(AllocationError::invalid(format!(
                "offset must be finite, got {}",
                offset
            )));
        }
        Ok(Self { offset })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Default for OffsetAllocator {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Allocator for OffsetAllocator {
    fn allocate(&self, demand: &Demand) -> Result<Allocation> {
        check_demand(demand)?;
        Ok(demand
            .iter()
            .map(|(name, &d)| (name.clone(), (d - self.offset).max(0.0)))
            .collect())
    }

    fn name(&self) -> &str {
        "offset"
    }
}
