//! Paced playback of sort traces: frames for a renderer, cues for an
//! audio sink, and a controller that owns the current sequence.

pub mod config;
pub mod controller;
pub mod cue;
pub mod dispatch;
pub mod frame;
pub mod sink;

pub use config::{ConfigError, PlaybackConfig};
pub use controller::{
    play, CancelFlag, PlaybackController, PlaybackError, PlaybackOptions, PlaybackSummary,
};
pub use cue::{synthesize, Cue, Tone, DEFAULT_SAMPLE_RATE};
pub use dispatch::{AudioWorker, CueQueue, CUE_QUEUE_DEPTH};
pub use frame::{Bar, Frame};
pub use sink::{CueSink, FrameSink, LogCues, MuteCues, NullFrames, SinkError, SynthCues};
