//! Allocation policies
//!
//! - [`OffsetAllocator`]: subtract a fixed offset from each demand, floored at zero
//! - [`CapacityAllocator`]: maximize `Σ demand·x` under one total-capacity constraint

pub mod capacity;
pub mod offset;

pub use capacity::{CapacityAllocator, NegativeDemand, DEFAULT_CAPACITY};
pub use offset::{OffsetAllocator, DEFAULT_OFFSET};

use allocation_spi::{AllocationError, Demand, Result};

fn check_demand(demand: &Demand) -> Result<()> {
    if let Some((name, value)) = demand.iter().find(|(_, v)| !v.is_finite()) {
        return Err(AllocationError::invalid(format!(
            "demand for '{}' is not finite: {}",
            name, value
        )));
    }
    Ok(())
}
