//! Validated batch of per-entity daily series

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, Result};

/// Equal-length, non-negative daily series keyed by entity name.
///
/// Entities iterate in lexicographic order of their names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<f64>>",
    into = "BTreeMap<String, Vec<f64>>"
)]
pub struct DemandTable {
    series: BTreeMap<String, Vec<f64>>,
    days: usize,
}

impl DemandTable {
    /// Validate and wrap a mapping of entity name to series.
    ///
    /// Fails with `InvalidInput` when the mapping is empty, a name is blank,
    /// a series is empty, lengths differ, or a value is negative or not finite.
    pub fn new(series: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        let mut days = None;
        for (name, values) in &series {
            if name.trim().is_empty() {
                return Err(AllocationError::invalid("entity name must not be blank"));
            }
            if values.is_empty() {
                return Err(AllocationError::invalid(format!(
                    "series for '{}' is empty",
                    name
                )));
            }
            match days {
                None => days = Some(values.len()),
                Some(expected) if expected != values.len() => {
                    return Err(AllocationError::invalid(format!(
                        "series for '{}' has {} days, expected {}",
                        name,
                        values.len(),
                        expected
                    )));
                }
                Some(_) => {}
            }
            if let Some((day, value)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite() || **v < 0.0)
            {
                return Err(AllocationError::invalid(format!(
                    "series for '{}' has invalid value {} on day {}",
                    name, value, day
                )));
            }
        }

        let days = days.ok_or_else(|| AllocationError::invalid("table has no entities"))?;
        Ok(Self { series, days })
    }

    /// Build a table from named columns, rejecting duplicate names.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut series = BTreeMap::new();
        for (name, values) in columns {
            let name = name.into();
            if series.contains_key(&name) {
                return Err(AllocationError::invalid(format!(
                    "duplicate entity '{}'",
                    name
                )));
            }
            series.insert(name, values);
        }
        Self::new(series)
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true when the table has no entities
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Length shared by every series
    pub fn days(&self) -> usize {
        self.days
    }

    pub fn get(&self, entity: &str) -> Option<&[f64]> {
        self.series.get(entity).map(Vec::as_slice)
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl TryFrom<BTreeMap<String, Vec<f64>>> for DemandTable {
    type Error = AllocationError;

    fn try_from(series: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        Self::new(series)
    }
}

impl From<DemandTable> for BTreeMap<String, Vec<f64>> {
    fn from(table: DemandTable) -> Self {
        table.series
    }
}
