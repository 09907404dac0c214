//! Allocation Consumer API
//!
//! Configuration types and builders for the forecast-allocate pipeline.
//!
//! This crate provides:
//! - [`PipelineConfig`] with the tagged [`SmoothingMethod`] and
//!   [`AllocationPolicy`] strategy selectors
//! - [`SyntheticConfig`] for generated demand tables
//! - Re-exports from SPI and core for convenience

mod config;
mod synthetic;

pub use config::{AllocationPolicy, PipelineConfig, SmoothingMethod};
pub use synthetic::{ProductRate, SyntheticConfig};

// Re-export from core
pub use allocation_core::{
    loader, pipeline, policy, smoothing, window, window_average, AllocationPipeline,
    CapacityAllocator, ExponentialSmoother, NegativeDemand, OffsetAllocator, PoissonGenerator,
    TrailingMeanSmoother,
};

// Re-export contracts and models from SPI
pub use allocation_spi::{
    Allocation, AllocationError, AllocationResult, Allocator, Demand, DemandTable, EntityResult,
    Result, Smoother,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AllocationPolicy, PipelineConfig, SmoothingMethod, SyntheticConfig};
    pub use allocation_core::{loader, AllocationPipeline};
    pub use allocation_spi::{
        AllocationError, AllocationResult, Allocator, DemandTable, Result, Smoother,
    };
}
