//! Step-trace engine for sorting algorithm visualisation.
//!
//! [`run`] turns an algorithm and an integer sequence into a [`Trace`]: a
//! lazy iterator of [`Step`] snapshots, one per observable event, ending
//! with a terminal step that holds the sorted sequence. The engine does no
//! I/O and no timing; consumers pull steps at their own pace.

pub mod algorithm;
pub mod engine;
pub mod producer;
pub mod step;
pub mod workspace;

pub use algorithm::{AlgorithmId, TraceError};
pub use engine::{run, run_named, Trace};
pub use step::{Step, StepKind};
pub use workspace::Counters;
