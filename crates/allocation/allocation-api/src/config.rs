//! Pipeline configuration

use std::path::Path;

use allocation_core::policy::{DEFAULT_CAPACITY, DEFAULT_OFFSET};
use allocation_core::smoothing::{DEFAULT_ALPHA, DEFAULT_TRAILING_WINDOW};
use allocation_core::window::DEFAULT_WINDOW;
use allocation_core::{
    AllocationPipeline, CapacityAllocator, ExponentialSmoother, NegativeDemand, OffsetAllocator,
    TrailingMeanSmoother,
};
use allocation_spi::{AllocationError, Allocator, Result, Smoother};
use serde::{Deserialize, Serialize};

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_trailing_window() -> usize {
    DEFAULT_TRAILING_WINDOW
}

fn default_offset() -> f64 {
    DEFAULT_OFFSET
}

fn default_capacity() -> f64 {
    DEFAULT_CAPACITY
}

/// Forecast smoother selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SmoothingMethod {
    /// Exponential smoothing with constant `alpha`
    Exponential {
        #[serde(default = "default_alpha")]
        alpha: f64,
    },
    /// Mean of up to `window` preceding observations
    TrailingMean {
        #[serde(default = "default_trailing_window")]
        window: usize,
    },
}

impl Default for SmoothingMethod {
    fn default() -> Self {
        SmoothingMethod::Exponential {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl SmoothingMethod {
    pub fn build(&self) -> Result<Box<dyn Smoother>> {
        Ok(match *self {
            SmoothingMethod::Exponential { alpha } => Box::new(ExponentialSmoother::new(alpha)?),
            SmoothingMethod::TrailingMean { window } => {
                Box::new(TrailingMeanSmoother::new(window)?)
            }
        })
    }
}

/// Allocation strategy selection.
///
/// Both policies are first-class; neither is a fallback for the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// `max(0, demand - offset)` per entity
    Offset {
        #[serde(default = "default_offset")]
        offset: f64,
    },
    /// Whole capacity to the entity with the largest demand
    Capacity {
        #[serde(default = "default_capacity")]
        capacity: f64,
        #[serde(default)]
        negative_demand: NegativeDemand,
    },
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        AllocationPolicy::Offset {
            offset: DEFAULT_OFFSET,
        }
    }
}

impl AllocationPolicy {
    pub fn offset() -> Self {
        Self::default()
    }

    pub fn capacity() -> Self {
        AllocationPolicy::Capacity {
            capacity: DEFAULT_CAPACITY,
            negative_demand: NegativeDemand::default(),
        }
    }

    pub fn build(&self) -> Result<Box<dyn Allocator>> {
        Ok(match *self {
            AllocationPolicy::Offset { offset } => Box::new(OffsetAllocator::new(offset)?),
            AllocationPolicy::Capacity {
                capacity,
                negative_demand,
            } => Box::new(CapacityAllocator::new(capacity)?.with_negative_demand(negative_demand)),
        })
    }
}

/// Configuration for pipeline construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Forecast smoother
    pub smoothing: SmoothingMethod,
    /// Trailing forecast days averaged into the demand figure
    pub window: usize,
    /// Allocation strategy
    pub policy: AllocationPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingMethod::default(),
            window: DEFAULT_WINDOW,
            policy: AllocationPolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingMethod) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.smoothing = SmoothingMethod::Exponential { alpha };
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AllocationError::invalid(format!("invalid pipeline config: {}", e)))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AllocationError::invalid(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Validate parameters and assemble the pipeline
    pub fn build(&self) -> Result<AllocationPipeline> {
        AllocationPipeline::new(self.smoothing.build()?, self.policy.build()?, self.window)
    }
}
