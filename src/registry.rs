//! Algorithm registry for dynamic algorithm discovery and execution.
//!
//! Every kernel family registers a runner that can hand out one measurable
//! closure per variant and verify all variants against its reference.

use log::{info, warn};

use crate::utils::timer::{Variant, VariantResult};

/// Result from running a variant benchmark (alias for VariantResult)
pub type BenchmarkResult = VariantResult;

/// Trait that all algorithm benchmarkers must implement
pub trait AlgorithmRunner: Send + Sync {
    /// Name of the algorithm (e.g., "ddotv")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category (e.g., "math", "threading")
    fn category(&self) -> &'static str;

    /// Get list of available variant names
    fn available_variants(&self) -> Vec<&'static str>;

    /// Build one closure per variant over inputs of `size` generated from `seed`.
    /// Each closure does ONE timed execution and returns its result value.
    fn variants(&self, size: usize, seed: u64) -> Vec<Variant<'_>>;

    /// Verify correctness of all variants against the reference
    fn verify(&self) -> Result<(), String>;
}

/// Registry of all algorithms
pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn AlgorithmRunner>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    pub fn register<A: AlgorithmRunner + 'static>(&mut self, algo: A) {
        self.algorithms.push(Box::new(algo));
    }

    pub fn all(&self) -> &[Box<dyn AlgorithmRunner>] {
        &self.algorithms
    }

    /// Find algorithm by name
    pub fn find(&self, name: &str) -> Option<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .filter(|a| a.category() == category)
            .map(|a| a.as_ref())
            .collect()
    }

    /// Run `verify` on every runner, or only on `only` when given.
    ///
    /// Returns `(name, outcome)` pairs in registration order.
    pub fn verify_all(&self, only: Option<&str>) -> Vec<(&'static str, Result<(), String>)> {
        self.algorithms
            .iter()
            .filter(|a| only.is_none_or(|name| a.name() == name))
            .map(|a| {
                let outcome = a.verify();
                match &outcome {
                    Ok(()) => info!("{}: all variants verified", a.name()),
                    Err(e) => warn!("{}: {}", a.name(), e),
                }
                (a.name(), outcome)
            })
            .collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all algorithms
pub fn build_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();

    registry.register(crate::math::dotv::DdotvRunner);
    registry.register(crate::math::dotv::SdotvRunner);
    registry.register(crate::threading::partition::PartitionRunner);

    registry
}
