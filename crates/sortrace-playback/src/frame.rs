use serde::Serialize;
use sortrace_core::{AlgorithmId, Step};

/// Headroom above the tallest bar.
const Y_HEADROOM: f64 = 1.1;

/// One bar of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub index: usize,
    pub value: i64,
    pub highlighted: bool,
}

/// Everything a renderer needs to draw one animation frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub title: String,
    pub bars: Vec<Bar>,
    /// Draw value labels above the bars.
    pub show_labels: bool,
    /// Top of the value axis.
    pub y_max: f64,
    pub comparisons: u64,
    pub swaps: u64,
    /// Frame of the terminal step.
    pub is_final: bool,
}

impl Frame {
    pub fn from_step(algorithm: AlgorithmId, step: &Step, label_threshold: usize) -> Self {
        let bars = step
            .snapshot
            .iter()
            .enumerate()
            .map(|(index, &value)| Bar {
                index,
                value,
                highlighted: step.is_highlighted(index),
            })
            .collect();

        Self {
            title: format!(
                "{} - Comparisons: {}, Swaps: {}",
                algorithm, step.comparisons, step.swaps
            ),
            bars,
            show_labels: step.snapshot.len() <= label_threshold,
            y_max: y_max(&step.snapshot),
            comparisons: step.comparisons,
            swaps: step.swaps,
            is_final: step.is_terminal(),
        }
    }

    /// Frame for a freshly generated sequence, before playback starts.
    pub fn idle(algorithm: AlgorithmId, data: &[i64], label_threshold: usize) -> Self {
        Self {
            title: format!("{algorithm} - Ready to Sort"),
            bars: data
                .iter()
                .enumerate()
                .map(|(index, &value)| Bar {
                    index,
                    value,
                    highlighted: false,
                })
                .collect(),
            show_labels: data.len() <= label_threshold,
            y_max: y_max(data),
            comparisons: 0,
            swaps: 0,
            is_final: false,
        }
    }

    pub fn highlighted_count(&self) -> usize {
        self.bars.iter().filter(|b| b.highlighted).count()
    }
}

fn y_max(data: &[i64]) -> f64 {
    data.iter()
        .max()
        .map(|&max| (max as f64 * Y_HEADROOM).max(0.0))
        .unwrap_or(0.0)
}
