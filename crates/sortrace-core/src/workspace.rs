use serde::{Deserialize, Serialize};

use crate::step::{normalize_highlight, Step, StepKind};

/// Running totals for one trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub comparisons: u64,
    pub swaps: u64,
}

/// The sequence being sorted plus its counters.
///
/// Owned by a single trace and lent to the producer on every pull, so
/// helpers never capture counters from an outer scope.
#[derive(Debug, Clone)]
pub struct Workspace {
    data: Vec<i64>,
    counters: Counters,
}

impl Workspace {
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data,
            counters: Counters::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn get(&self, index: usize) -> i64 {
        self.data[index]
    }

    /// Write a value without counting it.
    pub fn set(&mut self, index: usize, value: i64) {
        self.data[index] = value;
    }

    /// Exchange two slots without counting it.
    pub fn exchange(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn count_comparison(&mut self) {
        self.counters.comparisons += 1;
    }

    pub fn count_swap(&mut self) {
        self.counters.swaps += 1;
    }

    /// Freeze the current state into a step.
    pub fn emit(&self, kind: StepKind, highlight: impl IntoIterator<Item = usize>) -> Step {
        Step {
            snapshot: self.data.clone(),
            highlighted: normalize_highlight(highlight, self.data.len()),
            comparisons: self.counters.comparisons,
            swaps: self.counters.swaps,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_copies_snapshot() {
        let mut ws = Workspace::new(vec![2, 1]);
        let before = ws.emit(StepKind::Select, [0]);
        ws.exchange(0, 1);
        ws.count_swap();
        let after = ws.emit(StepKind::Swap, [0, 1]);

        assert_eq!(before.snapshot, vec![2, 1]);
        assert_eq!(before.swaps, 0);
        assert_eq!(after.snapshot, vec![1, 2]);
        assert_eq!(after.swaps, 1);
    }

    #[test]
    fn test_counters_start_at_zero() {
        let ws = Workspace::new(vec![5, 4, 3]);
        assert_eq!(ws.counters(), Counters::default());
    }

    #[test]
    fn test_emit_normalizes_highlight() {
        let ws = Workspace::new(vec![1, 2, 3]);
        let step = ws.emit(StepKind::Compare, [1, 1, 7, 0]);
        assert_eq!(step.highlighted, vec![1, 0]);
    }
}
