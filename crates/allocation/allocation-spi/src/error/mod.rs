//! Error module containing the error taxonomy and result alias

mod allocation_error;

pub use allocation_error::AllocationError;

/// Result type for allocation operations
pub type Result<T> = std::result::Result<T, AllocationError>;
