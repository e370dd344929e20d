//! Audio cue dispatch off the playback task.
//!
//! Cues go through a bounded queue to a dedicated audio thread, so a slow
//! or blocking [`CueSink`] never holds up step production. When the thread
//! falls behind and the queue is full, new cues are dropped.

use std::thread;

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::cue::Cue;
use crate::sink::{absorb, CueSink};

/// Cues that may wait for the audio thread.
pub const CUE_QUEUE_DEPTH: usize = 32;

/// Sending side of the audio queue.
#[derive(Debug, Clone)]
pub struct CueQueue {
    tx: Option<mpsc::Sender<Cue>>,
}

impl CueQueue {
    /// A queue that discards every cue.
    pub fn muted() -> Self {
        Self { tx: None }
    }

    /// Start an audio thread that plays queued cues on `audio`.
    ///
    /// Falls back to a muted queue if the thread cannot be started.
    pub fn spawn<A>(mut audio: A, depth: usize) -> (Self, Option<AudioWorker>)
    where
        A: CueSink + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Cue>(depth.max(1));
        let spawned = thread::Builder::new()
            .name("sortrace-audio".to_string())
            .spawn(move || {
                while let Some(cue) = rx.blocking_recv() {
                    absorb("audio", || audio.play(cue));
                }
            });

        match spawned {
            Ok(handle) => (Self { tx: Some(tx) }, Some(AudioWorker { handle })),
            Err(err) => {
                tracing::warn!(error = %err, "audio thread unavailable, cues muted");
                (Self::muted(), None)
            }
        }
    }

    pub fn is_muted(&self) -> bool {
        self.tx.is_none()
    }

    /// Queue `cue` without waiting.
    pub fn dispatch(&self, cue: Cue) {
        let Some(tx) = &self.tx else { return };
        match tx.try_send(cue) {
            Ok(()) => {}
            Err(TrySendError::Full(cue)) => {
                tracing::trace!(cue = cue.name(), "audio behind, cue dropped");
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

/// The thread draining a [`CueQueue`]. It exits once every handle to the
/// queue has been dropped.
#[derive(Debug)]
pub struct AudioWorker {
    handle: thread::JoinHandle<()>,
}

impl AudioWorker {
    /// Wait for the queued cues to finish playing.
    pub async fn join(self) {
        let handle = self.handle;
        match tokio::task::spawn_blocking(move || handle.join()).await {
            Ok(Ok(())) => {}
            _ => tracing::warn!("audio thread ended abnormally"),
        }
    }
}
