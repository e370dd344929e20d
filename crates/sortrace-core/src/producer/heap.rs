use super::StepProducer;
use crate::step::{Step, StepKind};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SiftPhase {
    Left,
    LeftResolve,
    Right,
    RightResolve,
    Settle,
}

/// Sift-down of `root` within the first `size` slots.
///
/// The recursive heapify only ever recurses in tail position, so the
/// cursor just moves `root` down and restarts at `Left`.
#[derive(Debug)]
struct SiftDown {
    size: usize,
    root: usize,
    largest: usize,
    phase: SiftPhase,
}

impl SiftDown {
    fn new(size: usize, root: usize) -> Self {
        Self {
            size,
            root,
            largest: root,
            phase: SiftPhase::Left,
        }
    }

    fn left(&self) -> usize {
        2 * self.root + 1
    }

    fn right(&self) -> usize {
        2 * self.root + 2
    }

    fn advance(&mut self, ws: &mut Workspace) -> Option<Step> {
        loop {
            match self.phase {
                SiftPhase::Left => {
                    let child = self.left();
                    if child < self.size {
                        ws.count_comparison();
                        self.phase = SiftPhase::LeftResolve;
                        return Some(ws.emit(StepKind::Compare, [self.root, child, self.largest]));
                    }
                    self.phase = SiftPhase::Right;
                }
                SiftPhase::LeftResolve => {
                    let child = self.left();
                    if ws.get(child) > ws.get(self.largest) {
                        self.largest = child;
                    }
                    self.phase = SiftPhase::Right;
                }
                SiftPhase::Right => {
                    let child = self.right();
                    if child < self.size {
                        ws.count_comparison();
                        self.phase = SiftPhase::RightResolve;
                        return Some(ws.emit(StepKind::Compare, [self.root, child, self.largest]));
                    }
                    self.phase = SiftPhase::Settle;
                }
                SiftPhase::RightResolve => {
                    let child = self.right();
                    if ws.get(child) > ws.get(self.largest) {
                        self.largest = child;
                    }
                    self.phase = SiftPhase::Settle;
                }
                SiftPhase::Settle => {
                    if self.largest == self.root {
                        return None;
                    }
                    let (parent, child) = (self.root, self.largest);
                    ws.exchange(parent, child);
                    ws.count_swap();
                    self.root = child;
                    self.largest = child;
                    self.phase = SiftPhase::Left;
                    return Some(ws.emit(StepKind::Swap, [parent, child]));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    /// Heapify roots from `next` down to 0.
    Build { next: Option<usize> },
    /// Move the root to `end`, then shrink the heap.
    Extract { end: usize },
    Done,
}

/// Heap sort: build a max-heap, then repeatedly extract the root.
#[derive(Debug)]
pub struct HeapSort {
    len: usize,
    stage: Stage,
    sift: Option<SiftDown>,
}

impl HeapSort {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            stage: Stage::Build {
                next: (len / 2).checked_sub(1),
            },
            sift: None,
        }
    }
}

impl StepProducer for HeapSort {
    fn advance(&mut self, ws: &mut Workspace) -> Option<Step> {
        loop {
            if let Some(sift) = self.sift.as_mut() {
                if let Some(step) = sift.advance(ws) {
                    return Some(step);
                }
                self.sift = None;
            }

            match self.stage {
                Stage::Build { next: Some(root) } => {
                    self.sift = Some(SiftDown::new(self.len, root));
                    self.stage = Stage::Build {
                        next: root.checked_sub(1),
                    };
                }
                Stage::Build { next: None } => {
                    self.stage = match self.len.checked_sub(1) {
                        Some(end) if end > 0 => Stage::Extract { end },
                        _ => Stage::Done,
                    };
                }
                Stage::Extract { end } => {
                    ws.exchange(0, end);
                    ws.count_swap();
                    self.sift = Some(SiftDown::new(end, 0));
                    self.stage = if end > 1 {
                        Stage::Extract { end: end - 1 }
                    } else {
                        Stage::Done
                    };
                    return Some(ws.emit(StepKind::Swap, [end, 0]));
                }
                Stage::Done => return None,
            }
        }
    }
}
