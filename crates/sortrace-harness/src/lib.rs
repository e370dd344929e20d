//! Comparison harness: drains one trace per algorithm over independent
//! seeded shuffles and ranks the algorithms by wall-clock time.

pub mod compare;
pub mod rng;
pub mod sequence;

pub use compare::{
    compare, compare_named, measure, rank_entries, ComparisonEntry, ComparisonReport,
    HarnessConfig,
};
pub use rng::{algorithm_rng, session_rng};
pub use sequence::shuffled_sequence;
