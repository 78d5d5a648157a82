//! Cyclic iteration ownership.

use super::thread_info::ThreadInfo;

/// Blocked loop of the triangular multiply being partitioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopAxis {
    /// Row panels, triangular operand on the left.
    LeftIr,
    /// Column panels, triangular operand on the left.
    LeftJr,
    /// Row panels, triangular operand on the right.
    RightIr,
    /// Column panels, triangular operand on the right.
    RightJr,
}

impl LoopAxis {
    pub const ALL: [LoopAxis; 4] = [
        LoopAxis::LeftIr,
        LoopAxis::LeftJr,
        LoopAxis::RightIr,
        LoopAxis::RightJr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LoopAxis::LeftIr => "left-ir",
            LoopAxis::LeftJr => "left-jr",
            LoopAxis::RightIr => "right-ir",
            LoopAxis::RightJr => "right-jr",
        }
    }
}

/// Whether `thread` runs iteration `index`.
///
/// Round-robin: iteration `index` belongs to rank `index % n_way`.
///
/// # Example
/// ```
/// use micro_blas_core::threading::partition::{owns, ThreadInfo};
///
/// let thread = ThreadInfo::new(1, 3).unwrap();
/// let mine: Vec<usize> = (0..9).filter(|&i| owns(i, &thread)).collect();
/// assert_eq!(mine, [1, 4, 7]);
/// ```
#[inline(always)]
pub fn owns(index: usize, thread: &ThreadInfo) -> bool {
    index % thread.n_way() == thread.work_id() % thread.n_way()
}

/// [`owns`] at the call site of a specific loop axis.
#[inline(always)]
pub fn my_iter(axis: LoopAxis, index: usize, thread: &ThreadInfo) -> bool {
    match axis {
        LoopAxis::LeftIr | LoopAxis::LeftJr | LoopAxis::RightIr | LoopAxis::RightJr => {
            owns(index, thread)
        }
    }
}
