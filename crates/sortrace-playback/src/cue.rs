//! Audio cues keyed by step kind, and their PCM synthesis.
//!
//! Every cue is a short sine tone (the completion cue is a C-E-G
//! arpeggio). Synthesis is pure: a sink decides whether and how the
//! samples reach a device.

use serde::{Deserialize, Serialize};
use sortrace_core::StepKind;

pub const DEFAULT_SAMPLE_RATE: u32 = 22_050;

/// Cue category, one per step kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Compare,
    Swap,
    Select,
    Pivot,
    Merge,
    Complete,
}

impl From<StepKind> for Cue {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Compare => Cue::Compare,
            StepKind::Swap => Cue::Swap,
            StepKind::Select => Cue::Select,
            StepKind::Pivot => Cue::Pivot,
            StepKind::Merge => Cue::Merge,
            StepKind::Complete => Cue::Complete,
        }
    }
}

/// Shape of a synthesized tone.
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    /// Frequencies played back to back in equal segments.
    pub frequencies: Vec<f64>,
    pub duration_secs: f64,
    pub amplitude: f64,
    pub fade_in_secs: f64,
    pub fade_out_secs: f64,
}

impl Tone {
    fn beep(frequency: f64, duration_secs: f64) -> Self {
        Self {
            frequencies: vec![frequency],
            duration_secs,
            amplitude: 0.5,
            fade_in_secs: 0.01,
            fade_out_secs: 0.01,
        }
    }

    fn arpeggio() -> Self {
        Self {
            frequencies: vec![523.25, 659.25, 783.99],
            duration_secs: 0.5,
            amplitude: 0.3,
            fade_in_secs: 0.0,
            fade_out_secs: 0.1,
        }
    }
}

impl Cue {
    pub fn tone(self) -> Tone {
        match self {
            Cue::Compare => Tone::beep(400.0, 0.05),
            Cue::Swap => Tone::beep(800.0, 0.1),
            Cue::Select => Tone::beep(600.0, 0.08),
            Cue::Pivot => Tone::beep(1000.0, 0.15),
            Cue::Merge => Tone::beep(300.0, 0.2),
            Cue::Complete => Tone::arpeggio(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cue::Compare => "compare",
            Cue::Swap => "swap",
            Cue::Select => "select",
            Cue::Pivot => "pivot",
            Cue::Merge => "merge",
            Cue::Complete => "complete",
        }
    }
}

/// Render a cue as 16-bit mono PCM.
pub fn synthesize(cue: Cue, sample_rate: u32) -> Vec<i16> {
    synthesize_tone(&cue.tone(), sample_rate)
}

pub fn synthesize_tone(tone: &Tone, sample_rate: u32) -> Vec<i16> {
    let rate = f64::from(sample_rate);
    let total = (rate * tone.duration_secs) as usize;
    let mut wave = vec![0.0f64; total];

    // Each segment restarts its phase at zero; leftover samples stay silent.
    let segment = match tone.frequencies.len() {
        0 => 0,
        n => total / n,
    };
    for (i, &freq) in tone.frequencies.iter().enumerate() {
        let start = i * segment;
        for (k, sample) in wave[start..start + segment].iter_mut().enumerate() {
            let t = k as f64 / rate;
            *sample = tone.amplitude * (std::f64::consts::TAU * freq * t).sin();
        }
    }

    let fade_in = (rate * tone.fade_in_secs) as usize;
    let fade_out = (rate * tone.fade_out_secs) as usize;
    if fade_in + fade_out < total {
        for (k, sample) in wave[..fade_in].iter_mut().enumerate() {
            *sample *= ramp(k, fade_in);
        }
        for (k, sample) in wave[total - fade_out..].iter_mut().enumerate() {
            *sample *= 1.0 - ramp(k, fade_out);
        }
    }

    wave.into_iter()
        .map(|s| (s * f64::from(i16::MAX)) as i16)
        .collect()
}

/// Position `k` on an inclusive 0..=1 ramp of `len` points.
fn ramp(k: usize, len: usize) -> f64 {
    if len > 1 {
        k as f64 / (len - 1) as f64
    } else {
        0.0
    }
}
