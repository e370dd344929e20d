use super::StepProducer;
use crate::step::{Step, StepKind};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Pick,
    Shift,
    Place,
}

/// Insertion sort by shifting larger predecessors one slot right.
///
/// `hole` is the slot the key will land in; it starts at `i` and moves
/// left with every shift. Only predecessor tests that cause a shift are
/// counted as comparisons, and both shifts and the final placement count
/// as swaps.
#[derive(Debug)]
pub struct InsertionSort {
    i: usize,
    hole: usize,
    key: i64,
    phase: Phase,
}

impl InsertionSort {
    pub fn new() -> Self {
        Self {
            i: 1,
            hole: 1,
            key: 0,
            phase: Phase::Pick,
        }
    }
}

impl Default for InsertionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl StepProducer for InsertionSort {
    fn advance(&mut self, ws: &mut Workspace) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Pick => {
                    if self.i >= ws.len() {
                        return None;
                    }
                    self.key = ws.get(self.i);
                    self.hole = self.i;
                    self.phase = Phase::Shift;
                    return Some(ws.emit(StepKind::Select, [self.i, self.i - 1]));
                }
                Phase::Shift => {
                    if self.hole > 0 && ws.get(self.hole - 1) > self.key {
                        ws.count_comparison();
                        ws.set(self.hole, ws.get(self.hole - 1));
                        ws.count_swap();
                        self.hole -= 1;
                        return Some(ws.emit(StepKind::Swap, [self.i, self.hole]));
                    }
                    self.phase = Phase::Place;
                }
                Phase::Place => {
                    ws.set(self.hole, self.key);
                    ws.count_swap();
                    self.i += 1;
                    self.phase = Phase::Pick;
                    return Some(ws.emit(StepKind::Swap, [self.hole]));
                }
            }
        }
    }
}
