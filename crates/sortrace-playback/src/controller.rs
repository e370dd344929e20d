use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use sortrace_core::{run, AlgorithmId, Trace, TraceError};
use sortrace_harness::{compare, session_rng, shuffled_sequence, ComparisonReport, HarnessConfig};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::{ConfigError, PlaybackConfig};
use crate::cue::Cue;
use crate::dispatch::{AudioWorker, CueQueue, CUE_QUEUE_DEPTH};
use crate::frame::Frame;
use crate::sink::{absorb, CueSink, FrameSink};

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("playback already running")]
    Busy,

    #[error("no playback to wait for")]
    NotRunning,

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("playback task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Shared cancellation flag, checked before each step is pulled.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Pacing and presentation settings for one playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOptions {
    pub step_delay: Duration,
    pub label_threshold: usize,
}

impl From<&PlaybackConfig> for PlaybackOptions {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            step_delay: config.step_delay(),
            label_threshold: config.label_threshold,
        }
    }
}

/// Outcome of one playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSummary {
    pub algorithm: AlgorithmId,
    /// Steps pulled and rendered, including the terminal step.
    pub steps_played: u64,
    pub comparisons: u64,
    pub swaps: u64,
    pub elapsed: Duration,
    pub cancelled: bool,
    /// Sequence contents at the last played step.
    pub final_snapshot: Vec<i64>,
}

/// Drive `trace` to completion or cancellation, rendering every step and
/// pausing `step_delay` between steps. Each step's cue is queued on `cues`
/// without waiting for it to play.
///
/// Renderer failures and panics are logged and swallowed; they never stop
/// the trace.
pub async fn play<R>(
    mut trace: Trace,
    mut renderer: R,
    cues: CueQueue,
    options: PlaybackOptions,
    cancel: CancelFlag,
) -> PlaybackSummary
where
    R: FrameSink,
{
    let algorithm = trace.algorithm();
    let started = Instant::now();
    let mut steps_played = 0u64;
    let mut cancelled = false;

    loop {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }
        let Some(step) = trace.next() else { break };
        steps_played += 1;

        let frame = Frame::from_step(algorithm, &step, options.label_threshold);
        absorb("renderer", || renderer.render(&frame));
        cues.dispatch(Cue::from(step.kind));

        if step.is_terminal() {
            break;
        }
        tokio::time::sleep(options.step_delay).await;
    }

    let counters = trace.counters();
    let summary = PlaybackSummary {
        algorithm,
        steps_played,
        comparisons: counters.comparisons,
        swaps: counters.swaps,
        elapsed: started.elapsed(),
        cancelled,
        final_snapshot: trace.data().to_vec(),
    };
    if cancelled {
        tracing::info!(%algorithm, steps_played, "playback cancelled");
    } else {
        tracing::info!(
            %algorithm,
            steps_played,
            comparisons = summary.comparisons,
            swaps = summary.swaps,
            "playback finished"
        );
    }
    summary
}

struct ActivePlayback {
    cancel: CancelFlag,
    handle: JoinHandle<PlaybackSummary>,
    audio: Option<AudioWorker>,
}

/// Owns the current sequence and selected algorithm, and runs at most one
/// paced playback at a time.
pub struct PlaybackController {
    config: PlaybackConfig,
    algorithm: AlgorithmId,
    data: Vec<i64>,
    rng: ChaCha8Rng,
    active: Option<ActivePlayback>,
    /// Audio thread of the last finished playback, possibly still playing.
    audio: Option<AudioWorker>,
}

impl PlaybackController {
    /// Validate `config` and generate the first sequence.
    pub fn new(config: PlaybackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = session_rng(config.seed);
        let data = shuffled_sequence(config.data_size, &mut rng);
        Ok(Self {
            algorithm: config.algorithm,
            config,
            data,
            rng,
            active: None,
            audio: None,
        })
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Takes effect at the next `start`.
    pub fn set_algorithm(&mut self, algorithm: AlgorithmId) {
        self.algorithm = algorithm;
    }

    pub fn select_algorithm(&mut self, name: &str) -> Result<AlgorithmId, PlaybackError> {
        let algorithm: AlgorithmId = name.parse()?;
        self.algorithm = algorithm;
        Ok(algorithm)
    }

    /// The current sequence.
    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// Replace the current sequence with caller-supplied values.
    pub fn set_data(&mut self, data: Vec<i64>) -> Result<(), PlaybackError> {
        self.ensure_idle()?;
        self.data = data;
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.handle.is_finished())
    }

    /// Frame showing the current sequence with no focus.
    pub fn idle_frame(&self) -> Frame {
        Frame::idle(self.algorithm, &self.data, self.config.label_threshold)
    }

    /// Replace the current sequence with a fresh shuffle of `1..=data_size`.
    pub fn generate(&mut self) -> Result<&[i64], PlaybackError> {
        self.ensure_idle()?;
        self.data = shuffled_sequence(self.config.data_size, &mut self.rng);
        tracing::debug!(len = self.data.len(), "generated sequence");
        Ok(&self.data)
    }

    /// Spawn paced playback of the selected algorithm over a copy of the
    /// current sequence. Must be called from within a tokio runtime.
    pub fn start<R, A>(&mut self, renderer: R, audio: A) -> Result<(), PlaybackError>
    where
        R: FrameSink + 'static,
        A: CueSink + 'static,
    {
        self.ensure_idle()?;

        let trace = run(self.algorithm, self.data.clone());
        let cancel = CancelFlag::new();
        let options = PlaybackOptions::from(&self.config);
        tracing::info!(
            algorithm = %self.algorithm,
            len = self.data.len(),
            delay_ms = options.step_delay.as_millis() as u64,
            "playback started"
        );

        let (cues, worker) = if self.config.audio_enabled {
            CueQueue::spawn(audio, CUE_QUEUE_DEPTH)
        } else {
            (CueQueue::muted(), None)
        };

        let handle = tokio::spawn(play(trace, renderer, cues, options, cancel.clone()));
        self.active = Some(ActivePlayback {
            cancel,
            handle,
            audio: worker,
        });
        Ok(())
    }

    /// Request cancellation of the running playback. Returns false when
    /// nothing is running.
    pub fn cancel(&self) -> bool {
        match &self.active {
            Some(active) => {
                active.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Flag that cancels the running playback from elsewhere (a signal
    /// handler, another task).
    pub fn cancel_handle(&self) -> Option<CancelFlag> {
        self.active.as_ref().map(|active| active.cancel.clone())
    }

    /// Wait for the playback to end and adopt its final snapshot as the
    /// current sequence.
    pub async fn wait(&mut self) -> Result<PlaybackSummary, PlaybackError> {
        let active = self.active.take().ok_or(PlaybackError::NotRunning)?;
        let summary = active.handle.await?;
        self.audio = active.audio;
        self.data.clone_from(&summary.final_snapshot);
        Ok(summary)
    }

    /// Wait for the cues of the last waited-for playback to finish playing.
    pub async fn flush_audio(&mut self) {
        if let Some(worker) = self.audio.take() {
            worker.join().await;
        }
    }

    /// Cancel any playback, then generate a fresh sequence.
    pub async fn reset(&mut self) -> Result<&[i64], PlaybackError> {
        if self.cancel() {
            self.wait().await?;
        }
        self.generate()
    }

    /// Compare every algorithm at the configured size. Unseeded sessions
    /// draw the comparison seed from the session RNG.
    pub fn compare_all(&mut self) -> ComparisonReport {
        let seed = match self.config.seed {
            Some(seed) => seed,
            None => self.rng.gen(),
        };
        let config = HarnessConfig {
            seed,
            ..HarnessConfig::default()
        };
        compare(self.config.data_size, &config)
    }

    fn ensure_idle(&mut self) -> Result<(), PlaybackError> {
        if self.is_playing() {
            return Err(PlaybackError::Busy);
        }
        // A finished playback nobody waited for; its snapshot is discarded.
        if self.active.take().is_some() {
            tracing::debug!("discarding unclaimed playback result");
        }
        Ok(())
    }
}
