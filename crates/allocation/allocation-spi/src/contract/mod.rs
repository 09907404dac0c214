//! Contract module containing trait definitions for pipeline stages

mod allocator;
mod smoother;

pub use allocator::Allocator;
pub use smoother::Smoother;
