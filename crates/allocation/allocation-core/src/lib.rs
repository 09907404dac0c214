//! Allocation Core
//!
//! Core implementations for the forecast-allocate pipeline: smoothers,
//! window aggregation, allocation policies, table loading and synthetic
//! demand generation.

pub mod loader;
pub mod pipeline;
pub mod policy;
pub mod smoothing;
pub mod synthetic;
pub mod window;

// Re-export SPI items for implementations
pub use allocation_spi::{
    Allocation, AllocationError, AllocationResult, Allocator, Demand, DemandTable, EntityResult,
    Result, Smoother,
};

// Re-export main types
pub use pipeline::AllocationPipeline;
pub use policy::{CapacityAllocator, NegativeDemand, OffsetAllocator};
pub use smoothing::{ExponentialSmoother, TrailingMeanSmoother};
pub use synthetic::PoissonGenerator;
pub use window::window_average;
