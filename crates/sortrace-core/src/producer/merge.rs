use super::StepProducer;
use crate::step::{Step, StepKind};
use crate::workspace::Workspace;

/// Pending work on the merge sort stack.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Frame {
    /// Sort `[left, right]` inclusive.
    Sort { left: usize, right: usize },
    /// Merge the sorted halves `[left, mid]` and `[mid + 1, right]`.
    Merge { left: usize, mid: usize, right: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MergePhase {
    Compare,
    Write,
    LeftTail,
    RightTail,
    Summary,
}

/// An in-progress merge of two buffered halves back into the workspace.
#[derive(Debug)]
struct MergeCursor {
    left: usize,
    right: usize,
    left_run: Vec<i64>,
    right_run: Vec<i64>,
    i: usize,
    j: usize,
    k: usize,
    phase: MergePhase,
}

impl MergeCursor {
    fn new(ws: &Workspace, left: usize, mid: usize, right: usize) -> Self {
        Self {
            left,
            right,
            left_run: ws.data()[left..=mid].to_vec(),
            right_run: ws.data()[mid + 1..=right].to_vec(),
            i: 0,
            j: 0,
            k: left,
            phase: MergePhase::Compare,
        }
    }

    /// Next step of this merge, or `None` once the summary has been emitted.
    fn advance(&mut self, ws: &mut Workspace) -> Option<Step> {
        loop {
            match self.phase {
                MergePhase::Compare => {
                    if self.i < self.left_run.len() && self.j < self.right_run.len() {
                        ws.count_comparison();
                        self.phase = MergePhase::Write;
                        return Some(ws.emit(StepKind::Compare, [self.k]));
                    }
                    self.phase = MergePhase::LeftTail;
                }
                MergePhase::Write => {
                    if self.left_run[self.i] <= self.right_run[self.j] {
                        ws.set(self.k, self.left_run[self.i]);
                        self.i += 1;
                    } else {
                        ws.set(self.k, self.right_run[self.j]);
                        self.j += 1;
                        ws.count_swap();
                    }
                    self.k += 1;
                    self.phase = MergePhase::Compare;
                }
                MergePhase::LeftTail => {
                    if self.i < self.left_run.len() {
                        ws.set(self.k, self.left_run[self.i]);
                        self.i += 1;
                        self.k += 1;
                        ws.count_swap();
                        return Some(ws.emit(StepKind::Swap, [self.k - 1]));
                    }
                    self.phase = MergePhase::RightTail;
                }
                MergePhase::RightTail => {
                    if self.j < self.right_run.len() {
                        ws.set(self.k, self.right_run[self.j]);
                        self.j += 1;
                        self.k += 1;
                        ws.count_swap();
                        return Some(ws.emit(StepKind::Swap, [self.k - 1]));
                    }
                    self.phase = MergePhase::Summary;
                }
                MergePhase::Summary => {
                    return None;
                }
            }
        }
    }
}

/// Top-down merge sort driven by an explicit frame stack.
#[derive(Debug)]
pub struct MergeSort {
    stack: Vec<Frame>,
    active: Option<MergeCursor>,
}

impl MergeSort {
    pub fn new(len: usize) -> Self {
        let mut stack = Vec::new();
        if len >= 2 {
            stack.push(Frame::Sort {
                left: 0,
                right: len - 1,
            });
        }
        Self {
            stack,
            active: None,
        }
    }
}

impl StepProducer for MergeSort {
    fn advance(&mut self, ws: &mut Workspace) -> Option<Step> {
        loop {
            if let Some(cursor) = self.active.as_mut() {
                if let Some(step) = cursor.advance(ws) {
                    return Some(step);
                }
                let (left, right) = (cursor.left, cursor.right);
                self.active = None;
                return Some(ws.emit(StepKind::Merge, left..=right));
            }

            match self.stack.pop()? {
                Frame::Sort { left, right } => {
                    if left < right {
                        let mid = left + (right - left) / 2;
                        // Pushed in reverse so the left half runs first.
                        self.stack.push(Frame::Merge { left, mid, right });
                        self.stack.push(Frame::Sort {
                            left: mid + 1,
                            right,
                        });
                        self.stack.push(Frame::Sort { left, right: mid });
                    }
                }
                Frame::Merge { left, mid, right } => {
                    self.active = Some(MergeCursor::new(ws, left, mid, right));
                }
            }
        }
    }
}
