use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    #[error("unknown sorting algorithm: {0:?}")]
    InvalidAlgorithm(String),
}

/// The sorting algorithms the trace engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl AlgorithmId {
    /// Every algorithm, in menu order.
    pub const ALL: [AlgorithmId; 6] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
        AlgorithmId::Heap,
    ];

    /// Display name, e.g. "Merge Sort".
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "Bubble Sort",
            AlgorithmId::Selection => "Selection Sort",
            AlgorithmId::Insertion => "Insertion Sort",
            AlgorithmId::Merge => "Merge Sort",
            AlgorithmId::Quick => "Quick Sort",
            AlgorithmId::Heap => "Heap Sort",
        }
    }

    /// Short lowercase identifier, e.g. "merge".
    pub fn key(self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
            AlgorithmId::Heap => "heap",
        }
    }

    /// Position in [`AlgorithmId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmId {
    type Err = TraceError;

    /// Accepts "quick", "Quick Sort", "quick_sort" and "quick-sort", in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        let stem = normalized.strip_suffix("sort").unwrap_or(&normalized);

        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.key() == stem)
            .ok_or_else(|| TraceError::InvalidAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_display_and_key_forms() {
        assert_eq!("bubble".parse::<AlgorithmId>().unwrap(), AlgorithmId::Bubble);
        assert_eq!("Heap Sort".parse::<AlgorithmId>().unwrap(), AlgorithmId::Heap);
        assert_eq!("quick_sort".parse::<AlgorithmId>().unwrap(), AlgorithmId::Quick);
        assert_eq!(" INSERTION-sort ".parse::<AlgorithmId>().unwrap(), AlgorithmId::Insertion);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "bogo".parse::<AlgorithmId>().unwrap_err();
        assert_eq!(err, TraceError::InvalidAlgorithm("bogo".to_string()));
        assert!(err.to_string().contains("bogo"));
        assert!("sort".parse::<AlgorithmId>().is_err());
        assert!("".parse::<AlgorithmId>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.to_string().parse::<AlgorithmId>().unwrap(), id);
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, id) in AlgorithmId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}
