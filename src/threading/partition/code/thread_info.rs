//! Per-thread descriptor tree.
//!
//! Each node records a thread's rank (`work_id`) inside the group sharing one
//! loop (`n_way` threads). Children describe the narrower groups used by
//! nested sub-operations: the next blocked level (`sub_self`) and the packing
//! of either operand (`pack_a`, `pack_b`).

use std::iter::StepBy;
use std::ops::Range;

use log::debug;

use super::error::{PartitionError, Result};

/// Named child slot of a [`ThreadInfo`] node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubOp {
    /// Recursive descent into the next blocked level.
    Sub,
    /// Packing of the left operand.
    PackA,
    /// Packing of the right operand.
    PackB,
}

impl SubOp {
    pub const ALL: [SubOp; 3] = [SubOp::Sub, SubOp::PackA, SubOp::PackB];
}

/// Read-only thread descriptor.
///
/// Only constructed through [`ThreadInfo::new`], so `n_way > 0` and
/// `work_id < n_way` hold for every node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadInfo {
    work_id: usize,
    n_way: usize,
    sub_self: Option<Box<ThreadInfo>>,
    pack_a: Option<Box<ThreadInfo>>,
    pack_b: Option<Box<ThreadInfo>>,
}

impl ThreadInfo {
    /// A leaf node for rank `work_id` in a group of `n_way` threads.
    pub fn new(work_id: usize, n_way: usize) -> Result<Self> {
        if n_way == 0 {
            return Err(PartitionError::EmptyGroup);
        }
        if work_id >= n_way {
            return Err(PartitionError::WorkIdOutOfRange { work_id, n_way });
        }
        Ok(Self {
            work_id,
            n_way,
            sub_self: None,
            pack_a: None,
            pack_b: None,
        })
    }

    /// The descriptor of a single-threaded run.
    pub fn single() -> Self {
        Self {
            work_id: 0,
            n_way: 1,
            sub_self: None,
            pack_a: None,
            pack_b: None,
        }
    }

    /// Attach `child` under `op`, replacing any previous child there.
    pub fn with_child(mut self, op: SubOp, child: ThreadInfo) -> Result<Self> {
        if child.n_way > self.n_way {
            return Err(PartitionError::ChildWiderThanParent {
                child: child.n_way,
                parent: self.n_way,
            });
        }
        let slot = match op {
            SubOp::Sub => &mut self.sub_self,
            SubOp::PackA => &mut self.pack_a,
            SubOp::PackB => &mut self.pack_b,
        };
        *slot = Some(Box::new(child));
        Ok(self)
    }

    #[inline(always)]
    pub fn work_id(&self) -> usize {
        self.work_id
    }

    #[inline(always)]
    pub fn n_way(&self) -> usize {
        self.n_way
    }

    pub fn sub_self(&self) -> Option<&ThreadInfo> {
        self.sub_self.as_deref()
    }

    pub fn pack_a(&self) -> Option<&ThreadInfo> {
        self.pack_a.as_deref()
    }

    pub fn pack_b(&self) -> Option<&ThreadInfo> {
        self.pack_b.as_deref()
    }

    pub fn child(&self, op: SubOp) -> Option<&ThreadInfo> {
        match op {
            SubOp::Sub => self.sub_self(),
            SubOp::PackA => self.pack_a(),
            SubOp::PackB => self.pack_b(),
        }
    }

    /// Number of levels in the tree rooted here (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + SubOp::ALL
            .iter()
            .filter_map(|&op| self.child(op))
            .map(ThreadInfo::depth)
            .max()
            .unwrap_or(0)
    }

    /// Indices of `range` this thread owns, in increasing order.
    ///
    /// Starts at the first index congruent to `work_id` modulo `n_way` and
    /// steps by `n_way`, so it yields exactly the indices accepted by
    /// [`owns`](super::owns).
    pub fn owned(&self, range: Range<usize>) -> StepBy<Range<usize>> {
        let rank = self.work_id % self.n_way;
        let offset = (rank + self.n_way - range.start % self.n_way) % self.n_way;
        let first = range.start.saturating_add(offset);
        (first..range.end).step_by(self.n_way)
    }
}

impl Default for ThreadInfo {
    fn default() -> Self {
        Self::single()
    }
}

/// Build one descriptor chain per thread of a pool of `n_threads`.
///
/// `splits[k]` is the number of independent subgroups the level-`k` group
/// breaks into for level `k + 1`. Subgroups are contiguous blocks of ranks, so
/// a thread's rank at every level is its pool index modulo that level's
/// width. Packing at each level is shared by that level's whole group.
///
/// # Example
/// ```
/// use micro_blas_core::threading::partition::create_paths;
///
/// // 4 threads, the second level split into 2 groups of 2.
/// let paths = create_paths(4, &[2]).unwrap();
/// let inner = paths[3].sub_self().unwrap();
/// assert_eq!((inner.work_id(), inner.n_way()), (1, 2));
/// ```
pub fn create_paths(n_threads: usize, splits: &[usize]) -> Result<Vec<ThreadInfo>> {
    if n_threads == 0 {
        return Err(PartitionError::EmptyGroup);
    }

    let mut widths = Vec::with_capacity(splits.len() + 1);
    let mut n_way = n_threads;
    widths.push(n_way);
    for &ways in splits {
        if ways == 0 || n_way % ways != 0 {
            return Err(PartitionError::UnevenSplit { n_way, ways });
        }
        n_way /= ways;
        widths.push(n_way);
    }

    debug!("building {} thread paths with group widths {:?}", n_threads, widths);

    (0..n_threads).map(|thread| path_for(thread, &widths)).collect()
}

fn path_for(thread: usize, widths: &[usize]) -> Result<ThreadInfo> {
    let (&leaf, outer) = widths.split_last().ok_or(PartitionError::EmptyGroup)?;
    let mut node = ThreadInfo::new(thread % leaf, leaf)?;

    for &n_way in outer.iter().rev() {
        let work_id = thread % n_way;
        node = ThreadInfo::new(work_id, n_way)?
            .with_child(SubOp::PackA, ThreadInfo::new(work_id, n_way)?)?
            .with_child(SubOp::PackB, ThreadInfo::new(work_id, n_way)?)?
            .with_child(SubOp::Sub, node)?;
    }

    Ok(node)
}
