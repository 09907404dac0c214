//! Synthetic daily sales generation
//!
//! Draws independent Poisson samples per product per day. A fixed seed gives
//! a reproducible table; otherwise the generator is seeded from entropy.

use allocation_spi::{AllocationError, DemandTable, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

/// Longest table the generator will produce (ten years of days)
pub const MAX_DAYS: usize = 3650;

/// Most products the generator will produce
pub const MAX_PRODUCTS: usize = 1000;

/// Independent Poisson demand per product
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonGenerator {
    products: Vec<(String, f64)>,
    days: usize,
}

impl PoissonGenerator {
    /// `products` pairs each entity name with its mean daily sales.
    pub fn new(products: Vec<(String, f64)>, days: usize) -> Result<Self> {
        if days == 0 || days > MAX_DAYS {
            return Err(AllocationError::invalid(format!(
                "days must be between 1 and {}, got {}",
                MAX_DAYS, days
            )));
        }
        if products.is_empty() || products.len() > MAX_PRODUCTS {
            return Err(AllocationError::invalid(format!(
                "between 1 and {} products are required, got {}",
                MAX_PRODUCTS,
                products.len()
            )));
        }
        if let Some((name, rate)) = products.iter().find(|(_, r)| !r.is_finite() || *r <= 0.0) {
            return Err(AllocationError::invalid(format!(
                "rate for '{}' must be positive and finite, got {}",
                name, rate
            )));
        }
        Ok(Self { products, days })
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn products(&self) -> &[(String, f64)] {
        &self.products
    }

    /// Sample a table from `rng`
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DemandTable> {
        let mut columns = Vec::with_capacity(self.products.len());
        for (name, rate) in &self.products {
            let poisson = Poisson::new(*rate)
                .map_err(|e| AllocationError::invalid(format!("rate for '{}': {}", name, e)))?;
            let series: Vec<f64> = (0..self.days).map(|_| poisson.sample(&mut *rng)).collect();
            columns.push((name.clone(), series));
        }
        DemandTable::from_columns(columns)
    }

    /// Sample a table from a seeded generator, or from entropy without a seed
    pub fn generate_seeded(&self, seed: Option<u64>) -> Result<DemandTable> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate(&mut rng)
    }
}
