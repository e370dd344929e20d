use serde::{Deserialize, Serialize};

/// What happened at the moment a step was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// A comparison was just counted.
    Compare,
    /// A value moved to a new slot (exchange, shift or merge write).
    Swap,
    /// Focus moved without a comparison or a write.
    Select,
    /// Quick sort placed its pivot.
    Pivot,
    /// Merge sort finished merging a subrange.
    Merge,
    /// Terminal step: the sequence is sorted.
    Complete,
}

/// A single observation in a sort trace.
///
/// Steps are frozen copies: mutating the sequence after a step has been
/// emitted never changes the step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Full copy of the sequence at the time of the event.
    pub snapshot: Vec<i64>,
    /// Indices under comparison or movement, first occurrence order, no repeats.
    pub highlighted: Vec<usize>,
    /// Comparisons performed so far in this run.
    pub comparisons: u64,
    /// Relocations performed so far in this run.
    pub swaps: u64,
    /// Event that produced this step.
    pub kind: StepKind,
}

impl Step {
    /// True for the terminal step of a trace.
    pub fn is_terminal(&self) -> bool {
        self.kind == StepKind::Complete
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }
}

/// Build a highlight set: drop indices outside `0..len`, keep the first
/// occurrence of each index in order.
pub fn normalize_highlight(indices: impl IntoIterator<Item = usize>, len: usize) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::with_capacity(3);
    for index in indices {
        if index < len && !out.contains(&index) {
            out.push(index);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dedupes_in_order() {
        assert_eq!(normalize_highlight([2, 0, 2, 1, 0], 3), vec![2, 0, 1]);
    }

    #[test]
    fn test_normalize_drops_out_of_range() {
        assert_eq!(normalize_highlight([5, 1, 3], 3), vec![1]);
        assert!(normalize_highlight([0], 0).is_empty());
    }

    #[test]
    fn test_step_kind_serializes_snake_case() {
        let json = serde_json::to_string(&StepKind::Complete).unwrap();
        assert_eq!(json, "\"complete\"");
    }

    #[test]
    fn test_is_highlighted() {
        let step = Step {
            snapshot: vec![3, 1, 2],
            highlighted: vec![0, 1],
            comparisons: 1,
            swaps: 0,
            kind: StepKind::Compare,
        };
        assert!(step.is_highlighted(1));
        assert!(!step.is_highlighted(2));
        assert!(!step.is_terminal());
    }
}
