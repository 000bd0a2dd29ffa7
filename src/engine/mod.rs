//! Pure computations over the journal: pip conversion, statistics, insights.
//! Nothing in here performs I/O or holds locks.

pub mod insights;
pub mod pip;
pub mod stats;
