//! Trait for allocation policies

use crate::error::Result;
use crate::model::{Allocation, Demand};

/// Assigns a resource quantity to every entity from its demand figure.
pub trait Allocator: Send + Sync {
    /// Allocate resources for every entity in `demand`.
    ///
    /// The result has exactly the keys of `demand`.
    fn allocate(&self, demand: &Demand) -> Result<Allocation>;

    /// Short name used in logs and result records
    fn name(&self) -> &str;
}
