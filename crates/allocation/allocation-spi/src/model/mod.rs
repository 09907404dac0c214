//! Model module containing data structures

mod allocation_result;
mod demand_table;

use std::collections::BTreeMap;

pub use allocation_result::{AllocationResult, EntityResult};
pub use demand_table::DemandTable;

/// Representative demand figure per entity
pub type Demand = BTreeMap<String, f64>;

/// Resource quantity per entity
pub type Allocation = BTreeMap<String, f64>;
