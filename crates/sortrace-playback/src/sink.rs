use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::cue::{synthesize, Cue, DEFAULT_SAMPLE_RATE};
use crate::frame::Frame;

/// Failure reported by a renderer or audio sink.
///
/// Playback logs these and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SinkError(pub String);

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Trait abstracting frame output, so playback can drive a terminal, a
/// chart widget or a test recorder.
pub trait FrameSink: Send {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError>;
}

/// Trait abstracting audio cue output.
pub trait CueSink: Send {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError>;
}

/// Run one sink call, logging and swallowing its error or panic.
pub(crate) fn absorb(sink: &'static str, call: impl FnOnce() -> Result<(), SinkError>) {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::warn!(sink, error = %err, "sink failed, continuing"),
        Err(_) => tracing::warn!(sink, "sink panicked, continuing"),
    }
}

/// Discards every frame.
pub struct NullFrames;

impl FrameSink for NullFrames {
    fn render(&mut self, _frame: &Frame) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Audio disabled or unavailable.
pub struct MuteCues;

impl CueSink for MuteCues {
    fn play(&mut self, _cue: Cue) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Logs each cue at trace level instead of playing it.
pub struct LogCues;

impl CueSink for LogCues {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError> {
        tracing::trace!(cue = cue.name(), "audio cue");
        Ok(())
    }
}

/// Synthesizes each cue and hands the PCM samples to an output callback
/// (a device queue, a WAV writer...).
pub struct SynthCues<F> {
    sample_rate: u32,
    output: F,
}

impl<F> SynthCues<F>
where
    F: FnMut(Cue, &[i16]) -> Result<(), SinkError> + Send,
{
    pub fn new(output: F) -> Self {
        Self::with_sample_rate(DEFAULT_SAMPLE_RATE, output)
    }

    pub fn with_sample_rate(sample_rate: u32, output: F) -> Self {
        Self {
            sample_rate,
            output,
        }
    }
}

impl<F> CueSink for SynthCues<F>
where
    F: FnMut(Cue, &[i16]) -> Result<(), SinkError> + Send,
{
    fn play(&mut self, cue: Cue) -> Result<(), SinkError> {
        let samples = synthesize(cue, self.sample_rate);
        (self.output)(cue, &samples)
    }
}
