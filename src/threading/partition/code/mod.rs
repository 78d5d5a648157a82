//! Partition implementations.
//!
//! Every variant sums the indices of `0..n` a thread owns, so all of them
//! must agree exactly.

mod error;
mod owns;
mod thread_info;

pub use error::PartitionError;
pub use owns::{my_iter, owns, LoopAxis};
pub use thread_info::{create_paths, SubOp, ThreadInfo};

use crate::utils::VariantInfo;

/// Sum of owned indices in `0..n`
pub type PartitionFn = fn(usize, &ThreadInfo) -> u64;

fn partition_original(n: usize, thread: &ThreadInfo) -> u64 {
    (0..n).filter(|&i| owns(i, thread)).map(|i| i as u64).sum()
}

fn partition_stride_step(n: usize, thread: &ThreadInfo) -> u64 {
    thread.owned(0..n).map(|i| i as u64).sum()
}

fn partition_rolling_counter(n: usize, thread: &ThreadInfo) -> u64 {
    let rank = thread.work_id() % thread.n_way();
    let mut lane = 0;
    let mut sum = 0u64;
    for i in 0..n {
        if lane == rank {
            sum += i as u64;
        }
        lane += 1;
        if lane == thread.n_way() {
            lane = 0;
        }
    }
    sum
}

/// Get all available partition variants
pub fn available_variants() -> Vec<VariantInfo<PartitionFn>> {
    vec![
        VariantInfo {
            name: "original",
            description: "Modulo test on every index",
            function: partition_original,
        },
        VariantInfo {
            name: "stride_step",
            description: "Jump straight to owned indices",
            function: partition_stride_step,
        },
        VariantInfo {
            name: "rolling_counter",
            description: "Wrapping lane counter instead of a division",
            function: partition_rolling_counter,
        },
    ]
}
