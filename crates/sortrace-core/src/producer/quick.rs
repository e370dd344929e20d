use super::StepProducer;
use crate::step::{Step, StepKind};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Scan,
    Resolve,
    Place,
}

/// An in-progress Lomuto partition of `[low, high]`.
///
/// `store` is the next slot for an element `<= pivot`; the classic
/// `i` index is `store - 1`, which does not exist while `store == 0`.
#[derive(Debug)]
struct Partition {
    low: usize,
    high: usize,
    pivot: i64,
    store: usize,
    j: usize,
    phase: Phase,
}

impl Partition {
    fn new(ws: &Workspace, low: usize, high: usize) -> Self {
        Self {
            low,
            high,
            pivot: ws.get(high),
            store: low,
            j: low,
            phase: Phase::Scan,
        }
    }

    fn boundary(&self) -> Option<usize> {
        self.store.checked_sub(1)
    }
}

/// Quick sort with last-element pivot.
///
/// Swaps are only counted when the two slots differ, both inside the
/// partition loop and at pivot placement. Left partitions are sorted
/// before right ones.
#[derive(Debug)]
pub struct QuickSort {
    stack: Vec<(usize, usize)>,
    active: Option<Partition>,
}

impl QuickSort {
    pub fn new(len: usize) -> Self {
        let mut stack = Vec::new();
        if len >= 2 {
            stack.push((0, len - 1));
        }
        Self {
            stack,
            active: None,
        }
    }

    fn schedule(&mut self, low: usize, pivot_index: usize, high: usize) {
        // Right first so the left range is popped next.
        if pivot_index + 1 < high {
            self.stack.push((pivot_index + 1, high));
        }
        if pivot_index > low + 1 {
            self.stack.push((low, pivot_index - 1));
        }
    }
}

impl StepProducer for QuickSort {
    fn advance(&mut self, ws: &mut Workspace) -> Option<Step> {
        loop {
            let Some(part) = self.active.as_mut() else {
                let (low, high) = self.stack.pop()?;
                if low < high {
                    self.active = Some(Partition::new(ws, low, high));
                }
                continue;
            };

            match part.phase {
                Phase::Scan => {
                    if part.j < part.high {
                        ws.count_comparison();
                        part.phase = Phase::Resolve;
                        let highlight = [Some(part.j), Some(part.high), part.boundary()];
                        return Some(ws.emit(StepKind::Compare, highlight.into_iter().flatten()));
                    }
                    part.phase = Phase::Place;
                }
                Phase::Resolve => {
                    let j = part.j;
                    part.j += 1;
                    part.phase = Phase::Scan;
                    if ws.get(j) <= part.pivot {
                        let i = part.store;
                        part.store += 1;
                        ws.exchange(i, j);
                        let kind = if i != j {
                            ws.count_swap();
                            StepKind::Swap
                        } else {
                            StepKind::Select
                        };
                        return Some(ws.emit(kind, [i, j, part.high]));
                    }
                }
                Phase::Place => {
                    let (low, high, pivot_index) = (part.low, part.high, part.store);
                    ws.exchange(pivot_index, high);
                    if pivot_index != high {
                        ws.count_swap();
                    }
                    self.active = None;
                    self.schedule(low, pivot_index, high);
                    return Some(ws.emit(StepKind::Pivot, [pivot_index, high]));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(data: Vec<i64>) -> (Vec<Step>, Workspace) {
        let mut ws = Workspace::new(data.clone());
        let mut producer = QuickSort::new(data.len());
        let steps = std::iter::from_fn(|| producer.advance(&mut ws)).collect();
        (steps, ws)
    }

    #[test]
    fn test_three_element_trace_matches_reference() {
        let (steps, _) = drain(vec![3, 1, 2]);
        let observed: Vec<(Vec<i64>, Vec<usize>, u64, u64, StepKind)> = steps
            .into_iter()
            .map(|s| (s.snapshot, s.highlighted, s.comparisons, s.swaps, s.kind))
            .collect();
        assert_eq!(
            observed,
            vec![
                (vec![3, 1, 2], vec![0, 2], 1, 0, StepKind::Compare),
                (vec![3, 1, 2], vec![1, 2], 2, 0, StepKind::Compare),
                (vec![1, 3, 2], vec![0, 1, 2], 2, 1, StepKind::Swap),
                (vec![1, 2, 3], vec![1, 2], 2, 2, StepKind::Pivot),
            ]
        );
    }

    #[test]
    fn test_self_swaps_are_not_counted() {
        // Already sorted: every scan step swaps a slot with itself.
        let (steps, ws) = drain(vec![1, 2, 3]);
        assert_eq!(ws.data(), &[1, 2, 3]);
        assert_eq!(ws.counters().swaps, 0);
        assert_eq!(ws.counters().comparisons, 3);
        assert!(steps.iter().all(|s| s.kind != StepKind::Swap));
        assert!(steps.iter().any(|s| s.kind == StepKind::Select));
    }

    #[test]
    fn test_boundary_index_shown_after_first_kept_element() {
        // After 1 is kept in slot 0, the next scan step shows that boundary.
        let (steps, _) = drain(vec![1, 3, 2]);
        let compares: Vec<&Vec<usize>> = steps
            .iter()
            .filter(|s| s.kind == StepKind::Compare)
            .map(|s| &s.highlighted)
            .collect();
        assert_eq!(compares[0], &vec![0, 2]);
        assert_eq!(compares[1], &vec![1, 2, 0]);
    }

    #[test]
    fn test_reverse_input_counts() {
        let (_, ws) = drain(vec![5, 4, 3, 2, 1]);
        assert_eq!(ws.data(), &[1, 2, 3, 4, 5]);
        assert_eq!(ws.counters().comparisons, 10);
        assert_eq!(ws.counters().swaps, 2);
    }
}
