use std::iter::FusedIterator;

use crate::algorithm::{AlgorithmId, TraceError};
use crate::producer::{
    BubbleSort, HeapSort, InsertionSort, MergeSort, QuickSort, SelectionSort, Settled,
    StepProducer,
};
use crate::step::{Step, StepKind};
use crate::workspace::{Counters, Workspace};

/// A lazy, single-pass sequence of steps for one sort invocation.
///
/// Work only happens inside `next()`. Dropping the trace early is how a
/// consumer cancels; nothing else needs to be released.
pub struct Trace {
    algorithm: AlgorithmId,
    workspace: Workspace,
    producer: Box<dyn StepProducer>,
    emitted: u64,
    finished: bool,
}

impl Trace {
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Length of the sequence being sorted.
    pub fn len(&self) -> usize {
        self.workspace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspace.is_empty()
    }

    /// Steps handed out so far, including the terminal step.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Counters as of the most recent step.
    pub fn counters(&self) -> Counters {
        self.workspace.counters()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Sequence contents as of the most recent step.
    pub fn data(&self) -> &[i64] {
        self.workspace.data()
    }
}

impl Iterator for Trace {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.finished {
            return None;
        }
        let step = match self.producer.advance(&mut self.workspace) {
            Some(step) => step,
            None => {
                self.finished = true;
                self.workspace.emit(StepKind::Complete, [])
            }
        };
        self.emitted += 1;
        Some(step)
    }
}

impl FusedIterator for Trace {}

impl std::fmt::Debug for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trace")
            .field("algorithm", &self.algorithm)
            .field("len", &self.workspace.len())
            .field("emitted", &self.emitted)
            .field("finished", &self.finished)
            .finish()
    }
}

/// Start a trace of `algorithm` over `input`.
///
/// The trace owns `input` and its own counters. Sequences shorter than two
/// elements yield only the terminal step.
pub fn run(algorithm: AlgorithmId, input: Vec<i64>) -> Trace {
    let len = input.len();
    let producer: Box<dyn StepProducer> = if len < 2 {
        Box::new(Settled)
    } else {
        match algorithm {
            AlgorithmId::Bubble => Box::new(BubbleSort::new()),
            AlgorithmId::Selection => Box::new(SelectionSort::new()),
            AlgorithmId::Insertion => Box::new(InsertionSort::new()),
            AlgorithmId::Merge => Box::new(MergeSort::new(len)),
            AlgorithmId::Quick => Box::new(QuickSort::new(len)),
            AlgorithmId::Heap => Box::new(HeapSort::new(len)),
        }
    };
    tracing::debug!(algorithm = algorithm.key(), len, "trace created");

    Trace {
        algorithm,
        workspace: Workspace::new(input),
        producer,
        emitted: 0,
        finished: false,
    }
}

/// Like [`run`], selecting the algorithm by name ("quick", "Quick Sort", ...).
pub fn run_named(name: &str, input: Vec<i64>) -> Result<Trace, TraceError> {
    let algorithm: AlgorithmId = name.parse()?;
    Ok(run(algorithm, input))
}
