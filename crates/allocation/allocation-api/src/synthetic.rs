//! Synthetic demand configuration

use allocation_core::PoissonGenerator;
use allocation_spi::{DemandTable, Result};
use serde::{Deserialize, Serialize};

/// Mean daily sales for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRate {
    pub name: String,
    pub rate: f64,
}

impl ProductRate {
    pub fn new(name: &str, rate: f64) -> Self {
        Self {
            name: name.to_string(),
            rate,
        }
    }
}

/// Configuration for generated sales tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Number of days per series
    pub days: usize,
    /// Products and their Poisson rates
    pub products: Vec<ProductRate>,
    /// Fixed seed for a reproducible table
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            days: 30,
            products: vec![
                ProductRate::new("Product A", 20.0),
                ProductRate::new("Product B", 35.0),
                ProductRate::new("Product C", 10.0),
            ],
            seed: None,
        }
    }
}

impl SyntheticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_products(mut self, products: Vec<ProductRate>) -> Self {
        self.products = products;
        self
    }

    pub fn generator(&self) -> Result<PoissonGenerator> {
        let products = self
            .products
            .iter()
            .map(|p| (p.name.clone(), p.rate))
            .collect();
        PoissonGenerator::new(products, self.days)
    }

    /// Generate a table according to this configuration
    pub fn generate(&self) -> Result<DemandTable> {
        self.generator()?.generate_seeded(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_products() {
        let table = SyntheticConfig::default().with_seed(42).generate().unwrap();
        let names: Vec<&str> = table.entities().collect();
        assert_eq!(names, vec!["Product A", "Product B", "Product C"]);
        assert_eq!(table.days(), 30);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = SyntheticConfig::new().with_days(10).with_seed(3);
        assert_eq!(config.generate().unwrap(), config.generate().unwrap());
    }

    #[test]
    fn test_partial_json_config() {
        let config: SyntheticConfig = serde_json::from_str(r#"{"days": 5, "seed": 1}"#).unwrap();
        assert_eq!(config.days, 5);
        assert_eq!(config.products.len(), 3);
        assert_eq!(config.generate().unwrap().days(), 5);
    }

    #[test]
    fn test_invalid_config() {
        assert!(SyntheticConfig::new().with_days(0).generate().is_err());
        assert!(SyntheticConfig::new()
            .with_products(vec![])
            .generate()
            .is_err());
    }
}
