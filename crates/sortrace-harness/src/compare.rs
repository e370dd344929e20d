use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sortrace_core::{run, AlgorithmId, Step, TraceError};

use crate::rng::algorithm_rng;
use crate::sequence::shuffled_sequence;

/// Configuration for a comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// RNG seed for reproducible inputs.
    pub seed: u64,
    /// Algorithms to measure, in input order (ties in the ranking keep it).
    pub algorithms: Vec<AlgorithmId>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            algorithms: AlgorithmId::ALL.to_vec(),
        }
    }
}

/// One algorithm's measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Display name, or the rejected name for an error entry.
    pub name: String,
    pub algorithm: Option<AlgorithmId>,
    /// Wall-clock seconds spent draining the trace.
    pub elapsed_secs: f64,
    /// Counters from the last emitted step.
    pub comparisons: u64,
    pub swaps: u64,
    /// Steps drained, including the terminal step.
    pub steps: u64,
    /// Why no trace could be produced.
    pub error: Option<String>,
}

impl ComparisonEntry {
    fn failed(name: &str, err: &TraceError) -> Self {
        Self {
            name: name.to_string(),
            algorithm: None,
            elapsed_secs: 0.0,
            comparisons: 0,
            swaps: 0,
            steps: 0,
            error: Some(err.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of a complete comparison, ranked fastest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub size: usize,
    pub seed: u64,
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonReport {
    /// The fastest successful entry.
    pub fn fastest(&self) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| !e.is_error())
    }

    pub fn entry(&self, algorithm: AlgorithmId) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.algorithm == Some(algorithm))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ALGORITHM COMPARISON RESULTS")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f)?;
        writeln!(f, "Data Size: {}", self.size)?;
        writeln!(f)?;
        for (rank, entry) in self.entries.iter().enumerate() {
            match &entry.error {
                Some(err) => writeln!(f, "{}. {:15} | ERROR: {}", rank + 1, entry.name, err)?,
                None => writeln!(
                    f,
                    "{}. {:15} | Time: {:6.3}s | Comparisons: {:6} | Swaps: {:6}",
                    rank + 1,
                    entry.name,
                    entry.elapsed_secs,
                    entry.comparisons,
                    entry.swaps
                )?,
            }
        }
        Ok(())
    }
}

/// Fully drain one trace and record its totals.
pub fn measure(algorithm: AlgorithmId, input: Vec<i64>) -> ComparisonEntry {
    let start = Instant::now();
    let mut steps = 0u64;
    let mut last: Option<Step> = None;
    for step in run(algorithm, input) {
        steps += 1;
        last = Some(step);
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let (comparisons, swaps) = last.map(|s| (s.comparisons, s.swaps)).unwrap_or((0, 0));
    tracing::debug!(
        algorithm = algorithm.key(),
        steps,
        comparisons,
        swaps,
        elapsed_secs,
        "measured"
    );

    ComparisonEntry {
        name: algorithm.name().to_string(),
        algorithm: Some(algorithm),
        elapsed_secs,
        comparisons,
        swaps,
        steps,
        error: None,
    }
}

/// Sort entries by duration ascending; error entries go last.
///
/// The sort is stable, so equal durations keep their input order.
pub fn rank_entries(entries: &mut [ComparisonEntry]) {
    entries.sort_by(|a, b| {
        a.is_error()
            .cmp(&b.is_error())
            .then(a.elapsed_secs.total_cmp(&b.elapsed_secs))
    });
}

/// Measure every configured algorithm on its own fresh shuffle of `1..=size`.
pub fn compare(size: usize, config: &HarnessConfig) -> ComparisonReport {
    let mut entries: Vec<ComparisonEntry> = config
        .algorithms
        .iter()
        .map(|&algorithm| {
            let mut rng = algorithm_rng(config.seed, algorithm);
            measure(algorithm, shuffled_sequence(size, &mut rng))
        })
        .collect();
    rank_entries(&mut entries);

    ComparisonReport {
        size,
        seed: config.seed,
        entries,
    }
}

/// Like [`compare`], selecting algorithms by name.
///
/// Unknown names become error entries; the remaining algorithms are
/// still measured.
pub fn compare_named(size: usize, seed: u64, names: &[&str]) -> ComparisonReport {
    let mut entries: Vec<ComparisonEntry> = names
        .iter()
        .map(|name| match name.parse::<AlgorithmId>() {
            Ok(algorithm) => {
                let mut rng = algorithm_rng(seed, algorithm);
                measure(algorithm, shuffled_sequence(size, &mut rng))
            }
            Err(err) => {
                tracing::warn!(algorithm = %name, error = %err, "skipping algorithm");
                ComparisonEntry::failed(name, &err)
            }
        })
        .collect();
    rank_entries(&mut entries);

    ComparisonReport {
        size,
        seed,
        entries,
    }
}
