//! # Micro-BLAS Core
//!
//! Execution core of a dense linear-algebra kernel library:
//!
//! - [`math::dotv`]: vectorized inner product with alignment-aware fallback
//! - [`threading::partition`]: round-robin assignment of TRMM block
//!   iterations to a thread pool, with a per-thread descriptor tree
//!
//! Each kernel family ships its variants and a benchmark runner registered in
//! [`registry`].

pub mod math;
pub mod registry;
pub mod threading;
pub mod utils;

pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::math::dotv::{ddotv, dotv, sdotv, try_dotv, Conj, DdotvStrategy};
    pub use crate::registry::{build_registry, AlgorithmRegistry, AlgorithmRunner};
    pub use crate::threading::partition::{create_paths, my_iter, owns, LoopAxis, ThreadInfo};
}
