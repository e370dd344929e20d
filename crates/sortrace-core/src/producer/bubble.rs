use super::StepProducer;
use crate::step::{Step, StepKind};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Scan,
    Resolve,
    Done,
}

/// Bubble sort with early exit after a pass without swaps.
#[derive(Debug)]
pub struct BubbleSort {
    pass: usize,
    j: usize,
    swapped: bool,
    phase: Phase,
}

impl BubbleSort {
    pub fn new() -> Self {
        Self {
            pass: 0,
            j: 0,
            swapped: false,
            phase: Phase::Scan,
        }
    }
}

impl Default for BubbleSort {
    fn default() -> Self {
        Self::new()
    }
}

impl StepProducer for BubbleSort {
    fn advance(&mut self, ws: &mut Workspace) -> Option<Step> {
        let n = ws.len();
        loop {
            match self.phase {
                Phase::Scan => {
                    if self.pass >= n {
                        self.phase = Phase::Done;
                        continue;
                    }
                    if self.j + 1 >= n - self.pass {
                        // End of pass.
                        if !self.swapped {
                            self.phase = Phase::Done;
                            continue;
                        }
                        self.pass += 1;
                        self.j = 0;
                        self.swapped = false;
                        continue;
                    }
                    ws.count_comparison();
                    self.phase = Phase::Resolve;
                    return Some(ws.emit(StepKind::Compare, [self.j, self.j + 1]));
                }
                Phase::Resolve => {
                    let j = self.j;
                    self.j += 1;
                    self.phase = Phase::Scan;
                    if ws.get(j) > ws.get(j + 1) {
                        ws.exchange(j, j + 1);
                        ws.count_swap();
                        self.swapped = true;
                        return Some(ws.emit(StepKind::Swap, [j, j + 1]));
                    }
                }
                Phase::Done => return None,
            }
        }
    }
}
