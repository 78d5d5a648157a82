//! # TRMM thread partition
//!
//! A fixed pool of threads runs the same blocked loops. Each thread keeps
//! iteration `i` when
//!
//! `i % n_way == work_id % n_way`
//!
//! The rule is the same for all four loop axes of the triangular multiply, so
//! there is a single predicate ([`owns`]) and an axis-tagged call site
//! ([`my_iter`]). A [`ThreadInfo`] tree carries the thread's rank into nested
//! sub-operations.

pub mod bench;
pub mod code;
#[cfg(test)]
pub mod test;

pub use code::*;

use log::debug;

use crate::registry::AlgorithmRunner;
use crate::utils::timer::Variant;

const VERIFY_GROUPS: [usize; 5] = [1, 2, 3, 4, 8];
const VERIFY_SIZES: [usize; 4] = [0, 1, 13, 1000];

pub struct PartitionRunner;

impl AlgorithmRunner for PartitionRunner {
    fn name(&self) -> &'static str {
        "trmm_partition"
    }

    fn description(&self) -> &'static str {
        "Round-robin assignment of TRMM block iterations to threads"
    }

    fn category(&self) -> &'static str {
        "threading"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn variants(&self, size: usize, seed: u64) -> Vec<Variant<'_>> {
        bench::partition_closures(size, seed)
    }

    fn verify(&self) -> Result<(), String> {
        let variants = code::available_variants();

        let original = variants
            .iter()
            .find(|v| v.name == "original")
            .ok_or("No 'original' variant found for reference")?;

        for n_way in VERIFY_GROUPS {
            for work_id in 0..n_way {
                let thread = ThreadInfo::new(work_id, n_way).map_err(|e| e.to_string())?;
                for n in VERIFY_SIZES {
                    let expected = (original.function)(n, &thread);
                    for variant in variants.iter().filter(|v| v.name != "original") {
                        let result = (variant.function)(n, &thread);
                        if result != expected {
                            return Err(format!(
                                "Variant '{}' failed verification (n={}, work_id={}, n_way={}). Expected {}, got {}",
                                variant.name, n, work_id, n_way, expected, result
                            ));
                        }
                    }
                }
            }
            debug!("partition variants agree for n_way={}", n_way);
        }

        Ok(())
    }
}
