//! Allocation Facade
//!
//! High-level API for the forecast-allocate pipeline. Re-exports all public
//! types from the allocation stack for convenient usage.
//!
//! ```rust
//! use allocation_facade::{AllocationPolicy, DemandTable, PipelineConfig};
//!
//! let table = DemandTable::from_columns(vec![("A", vec![20.0; 8]), ("B", vec![5.0; 8])])?;
//! let result = PipelineConfig::new()
//!     .with_policy(AllocationPolicy::capacity())
//!     .build()?
//!     .run(&table)?;
//! assert_eq!(result.allocation()["A"], 100.0);
//! # Ok::<(), allocation_facade::AllocationError>(())
//! ```

// Re-export everything from API (which includes SPI and core)
pub use allocation_api::*;

// Explicit re-exports for documentation
pub use allocation_api::prelude;

// Re-export core modules for direct access
pub use allocation_core::{loader, pipeline, policy, smoothing, synthetic, window};

// Re-export SPI contracts and model
pub use allocation_spi::{
    Allocation, AllocationError, AllocationResult, Allocator, Demand, DemandTable, EntityResult,
    Result, Smoother,
};
