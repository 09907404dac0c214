//! Allocation result model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Allocation;

/// Pipeline output for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityResult {
    /// Smoothed forecast, same length as the input series
    pub forecast: Vec<f64>,
    /// Mean of the most recent forecast values
    pub window_average: f64,
    /// Resource quantity assigned by the policy
    pub allocation: f64,
}

/// Result record for one pipeline invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Name of the smoother that produced the forecasts
    pub smoother: String,
    /// Name of the allocation policy
    pub policy: String,
    /// Per-entity results, keyed by entity name
    pub entities: BTreeMap<String, EntityResult>,
    /// Σ window_average · allocation over all entities
    pub objective: f64,
}

impl AllocationResult {
    /// Allocation values keyed by entity
    pub fn allocation(&self) -> Allocation {
        self.entities
            .iter()
            .map(|(name, r)| (name.clone(), r.allocation))
            .collect()
    }

    /// Total quantity allocated across entities
    pub fn total_allocated(&self) -> f64 {
        self.entities.values().map(|r| r.allocation).sum()
    }
}
