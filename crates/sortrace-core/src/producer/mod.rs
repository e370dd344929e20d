//! Step producers, one per algorithm.
//!
//! Each producer is an explicit state machine: it keeps its loop indices
//! and a phase, and every call to [`StepProducer::advance`] runs the
//! algorithm up to the next emission point. Recursive algorithms keep a
//! work stack of pending ranges instead of using the call stack.

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use crate::step::Step;
use crate::workspace::Workspace;

pub use bubble::BubbleSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

/// Trait abstracting one algorithm's step generation.
///
/// `advance` returns the next non-terminal step, or `None` once the
/// algorithm has finished. The terminal step is appended by the trace.
pub trait StepProducer: Send {
    fn advance(&mut self, ws: &mut Workspace) -> Option<Step>;
}

/// Producer for input that is already trivially sorted (fewer than two elements).
#[derive(Debug, Default)]
pub struct Settled;

impl StepProducer for Settled {
    fn advance(&mut self, _ws: &mut Workspace) -> Option<Step> {
        None
    }
}
