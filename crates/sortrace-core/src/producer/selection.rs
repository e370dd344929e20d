use super::StepProducer;
use crate::step::{Step, StepKind};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Start the pass for slot `i`.
    Begin,
    /// Compare `j` against the current minimum.
    Scan,
    /// Check the comparison just shown.
    Resolve,
    /// Move the minimum into slot `i`.
    Finish,
}

/// Selection sort: one exchange per pass at most.
#[derive(Debug)]
pub struct SelectionSort {
    i: usize,
    j: usize,
    min_idx: usize,
    phase: Phase,
}

impl SelectionSort {
    pub fn new() -> Self {
        Self {
            i: 0,
            j: 0,
            min_idx: 0,
            phase: Phase::Begin,
        }
    }
}

impl Default for SelectionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl StepProducer for SelectionSort {
    fn advance(&mut self, ws: &mut Workspace) -> Option<Step> {
        let n = ws.len();
        loop {
            match self.phase {
                Phase::Begin => {
                    if self.i >= n {
                        return None;
                    }
                    self.min_idx = self.i;
                    self.j = self.i + 1;
                    self.phase = Phase::Scan;
                    return Some(ws.emit(StepKind::Select, [self.i, self.min_idx]));
                }
                Phase::Scan => {
                    if self.j >= n {
                        self.phase = Phase::Finish;
                        continue;
                    }
                    ws.count_comparison();
                    self.phase = Phase::Resolve;
                    return Some(ws.emit(StepKind::Compare, [self.i, self.j, self.min_idx]));
                }
                Phase::Resolve => {
                    let j = self.j;
                    self.j += 1;
                    self.phase = Phase::Scan;
                    if ws.get(j) < ws.get(self.min_idx) {
                        self.min_idx = j;
                        return Some(ws.emit(StepKind::Select, [self.i, j, self.min_idx]));
                    }
                }
                Phase::Finish => {
                    let i = self.i;
                    self.i += 1;
                    self.phase = Phase::Begin;
                    if self.min_idx != i {
                        ws.exchange(i, self.min_idx);
                        ws.count_swap();
                        return Some(ws.emit(StepKind::Swap, [i, self.min_idx]));
                    }
                }
            }
        }
    }
}
