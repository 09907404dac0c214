//! Single-constraint capacity allocation
//!
//! Solves the linear program
//!
//! ```text
//! maximize   Σ d_e · x_e
//! subject to Σ x_e <= C,  x_e >= 0
//! ```
//!
//! With one resource and a linear objective the optimum sits on the vertex
//! that gives all of `C` to an entity with the largest weight `d_e`. When no
//! weight is positive, allocating nothing is optimal.

use allocation_spi::{Allocation, AllocationError, Allocator, Demand, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::check_demand;

/// Total capacity when none is configured
pub const DEFAULT_CAPACITY: f64 = 100.0;

/// How negative demand figures are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeDemand {
    /// Fail with `InfeasibleInput`
    #[default]
    Reject,
    /// Treat as zero demand
    Clamp,
}

/// Greedy closed-form solver for the one-constraint allocation LP.
///
/// Ties between maximal entities go to the lexicographically smallest name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityAllocator {
    capacity: f64,
    negative_demand: NegativeDemand,
}

impl CapacityAllocator {
    pub fn new(capacity: f64) -> Result<Self> {
        if capacity.is_nan() || capacity.is_infinite() {
            return Err(AllocationError::invalid(format!(
                "capacity must be finite, got {}",
                capacity
            )));
        }
        if capacity < 0.0 {
            return Err(AllocationError::infeasible(format!(
                "capacity must be non-negative, got {}",
                capacity
            )));
        }
        Ok(Self {
            capacity,
            negative_demand: NegativeDemand::default(),
        })
    }

    pub fn with_negative_demand(mut self, policy: NegativeDemand) -> Self {
        self.negative_demand = policy;
        self
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn negative_demand(&self) -> NegativeDemand {
        self.negative_demand
    }

    fn weight(&self, name: &str, demand: f64) -> Result<f64> {
        if demand >= 0.0 {
            return Ok(demand);
        }
        match self.negative_demand {
            NegativeDemand::Clamp => Ok(0.0),
            NegativeDemand::Reject => Err(AllocationError::infeasible(format!(
                "demand for '{}' is negative: {}",
                name, demand
            ))),
        }
    }
}

impl Default for CapacityAllocator {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            negative_demand: NegativeDemand::default(),
        }
    }
}

impl Allocator for CapacityAllocator {
    fn allocate(&self, demand: &Demand) -> Result<Allocation> {
        check_demand(demand)?;

        let mut best: Option<(&str, f64)> = None;
        for (name, &d) in demand {
            let w = self.weight(name, d)?;
            // strict comparison keeps the first maximal entity
            if w > 0.0 && best.map_or(true, |(_, top)| w > top) {
                best = Some((name.as_str(), w));
            }
        }

        if let Some((winner, weight)) = best {
            debug!(entity = winner, weight, capacity = self.capacity, "capacity assigned");
        }

        Ok(demand
            .keys()
            .map(|name| {
                let x = match best {
                    Some((winner, _)) if winner == name.as_str() => self.capacity,
                    _ => 0.0,
                };
                (name.clone(), x)
            })
            .collect())
    }

    fn name(&self) -> &str {
        "capacity"
    }
}
