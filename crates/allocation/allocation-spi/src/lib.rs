//! Allocation Service Provider Interface
//!
//! Defines the contracts, data model and error taxonomy shared by the
//! forecast-allocate pipeline:
//!
//! - [`Smoother`]: turns a daily sales series into a forecast series
//! - [`Allocator`]: turns per-entity demand into per-entity resource quantities
//! - [`DemandTable`]: validated batch of equal-length series keyed by entity
//! - [`AllocationResult`]: the record handed back to drivers
//! - [`AllocationError`]: `InvalidInput` / `InfeasibleInput` failures

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Allocator, Smoother};
pub use error::{AllocationError, Result};
pub use model::{Allocation, AllocationResult, Demand, DemandTable, EntityResult};
