use thiserror::Error;

/// Malformed thread descriptors rejected at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("a thread group needs at least one member")]
    EmptyGroup,

    #[error("work id {work_id} is outside a group of {n_way}")]
    WorkIdOutOfRange { work_id: usize, n_way: usize },

    #[error("child group of {child} threads is wider than its parent group of {parent}")]
    ChildWiderThanParent { child: usize, parent: usize },

    #[error("a group of {n_way} threads cannot be split {ways} ways")]
    UnevenSplit { n_way: usize, ways: usize },
}

pub type Result<T> = std::result::Result<T, PartitionError>;
