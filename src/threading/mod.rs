//! Work partitioning for cooperating thread groups.

pub mod partition;
