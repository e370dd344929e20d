use std::sync::{Arc, Mutex};
use std::time::Duration;

use sortrace_core::{run, AlgorithmId};
use sortrace_playback::{
    play, CancelFlag, Cue, CueQueue, CueSink, Frame, FrameSink, MuteCues, NullFrames,
    PlaybackConfig, PlaybackController, PlaybackError, PlaybackOptions, SinkError,
};

#[derive(Clone, Default)]
struct FrameRecorder {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl FrameSink for FrameRecorder {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CueRecorder {
    cues: Arc<Mutex<Vec<Cue>>>,
}

impl CueSink for CueRecorder {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError> {
        self.cues.lock().unwrap().push(cue);
        Ok(())
    }
}

struct BrokenScreen;

impl FrameSink for BrokenScreen {
    fn render(&mut self, _frame: &Frame) -> Result<(), SinkError> {
        Err(SinkError::new("display lost"))
    }
}

struct PanickingSpeaker;

impl CueSink for PanickingSpeaker {
    fn play(&mut self, _cue: Cue) -> Result<(), SinkError> {
        panic!("audio device vanished");
    }
}

/// Takes 100ms of real time per cue.
struct SlowSpeaker {
    played: Arc<Mutex<Vec<Cue>>>,
}

impl CueSink for SlowSpeaker {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError> {
        std::thread::sleep(Duration::from_millis(100));
        self.played.lock().unwrap().push(cue);
        Ok(())
    }
}

fn seeded(seed: u64) -> PlaybackConfig {
    PlaybackConfig {
        data_size: 12,
        seed: Some(seed),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_start_and_wait_plays_every_step() {
    let mut controller = PlaybackController::new(seeded(1)).unwrap();
    controller.set_data(vec![3, 1, 2]).unwrap();
    let frames = FrameRecorder::default();
    let cues = CueRecorder::default();

    controller.start(frames.clone(), cues.clone()).unwrap();
    let summary = controller.wait().await.unwrap();
    controller.flush_audio().await;

    assert!(!summary.cancelled);
    assert_eq!(summary.algorithm, AlgorithmId::Bubble);
    assert_eq!(summary.steps_played, 6);
    assert_eq!(summary.comparisons, 3);
    assert_eq!(summary.swaps, 2);
    assert_eq!(controller.data(), &[1, 2, 3]);

    let frames = frames.frames.lock().unwrap();
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[0].title, "Bubble Sort - Comparisons: 1, Swaps: 0");
    assert!(frames[5].is_final);
    assert_eq!(frames[5].highlighted_count(), 0);

    let cues = cues.cues.lock().unwrap();
    assert_eq!(
        *cues,
        vec![
            Cue::Compare,
            Cue::Swap,
            Cue::Compare,
            Cue::Swap,
            Cue::Compare,
            Cue::Complete
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_step_delay_paces_playback() {
    let mut controller = PlaybackController::new(seeded(1)).unwrap();
    controller.set_data(vec![3, 1, 2]).unwrap();
    controller.start(NullFrames, MuteCues).unwrap();
    let summary = controller.wait().await.unwrap();
    // Five pauses of 50ms; none after the terminal step.
    assert!(summary.elapsed >= Duration::from_millis(250));
    assert!(summary.elapsed < Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_controls_are_busy_while_playing() {
    let mut controller = PlaybackController::new(seeded(2)).unwrap();
    controller.start(NullFrames, MuteCues).unwrap();
    assert!(controller.is_playing());

    assert!(matches!(controller.generate(), Err(PlaybackError::Busy)));
    assert!(matches!(
        controller.start(NullFrames, MuteCues),
        Err(PlaybackError::Busy)
    ));
    assert!(matches!(
        controller.set_data(vec![1]),
        Err(PlaybackError::Busy)
    ));

    assert!(controller.cancel());
    controller.wait().await.unwrap();
    assert!(!controller.is_playing());
    assert!(controller.generate().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_midway() {
    let config = PlaybackConfig {
        data_size: 20,
        step_delay_secs: 0.5,
        seed: Some(3),
        ..Default::default()
    };
    let mut controller = PlaybackController::new(config).unwrap();
    let input = controller.data().to_vec();
    let total = run(AlgorithmId::Bubble, input.clone()).count() as u64;

    controller.start(NullFrames, MuteCues).unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    controller.cancel();
    let summary = controller.wait().await.unwrap();

    assert!(summary.cancelled);
    assert!(summary.steps_played >= 1);
    assert!(summary.steps_played < total);

    // The partially sorted snapshot becomes the current sequence.
    let mut adopted = controller.data().to_vec();
    let mut expected = input;
    adopted.sort();
    expected.sort();
    assert_eq!(adopted, expected);
}

#[tokio::test(start_paused = true)]
async fn test_sink_failures_never_abort_playback() {
    let mut controller = PlaybackController::new(seeded(4)).unwrap();
    controller.set_algorithm(AlgorithmId::Merge);
    let total = run(AlgorithmId::Merge, controller.data().to_vec()).count() as u64;

    controller.start(BrokenScreen, PanickingSpeaker).unwrap();
    let summary = controller.wait().await.unwrap();
    controller.flush_audio().await;

    assert!(!summary.cancelled);
    assert_eq!(summary.steps_played, total);
    assert_eq!(controller.data(), (1..=12).collect::<Vec<i64>>().as_slice());
}

#[tokio::test(start_paused = true)]
async fn test_audio_disabled_dispatches_no_cues() {
    let config = PlaybackConfig {
        audio_enabled: false,
        ..seeded(5)
    };
    let mut controller = PlaybackController::new(config).unwrap();
    let cues = CueRecorder::default();
    controller.start(NullFrames, cues.clone()).unwrap();
    controller.wait().await.unwrap();
    controller.flush_audio().await;
    assert!(cues.cues.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_audio_does_not_stall_steps() {
    let played = Arc::new(Mutex::new(Vec::new()));
    let (cues, worker) = CueQueue::spawn(
        SlowSpeaker {
            played: played.clone(),
        },
        16,
    );
    let options = PlaybackOptions {
        step_delay: Duration::from_millis(10),
        label_threshold: 50,
    };

    let started = std::time::Instant::now();
    let trace = run(AlgorithmId::Bubble, vec![3, 1, 2]);
    let summary = play(trace, NullFrames, cues, options, CancelFlag::new()).await;
    let wall = started.elapsed();

    // Pacing alone is 5 x 10ms; six cues played inline would take 600ms.
    assert_eq!(summary.steps_played, 6);
    assert!(wall < Duration::from_millis(200), "steps stalled: {wall:?}");

    worker.unwrap().join().await;
    assert_eq!(played.lock().unwrap().len(), 6);
}

#[tokio::test]
async fn test_cues_dropped_when_audio_falls_behind() {
    let played = Arc::new(Mutex::new(Vec::new()));
    let (cues, worker) = CueQueue::spawn(
        SlowSpeaker {
            played: played.clone(),
        },
        1,
    );
    let options = PlaybackOptions {
        step_delay: Duration::from_millis(10),
        label_threshold: 50,
    };

    let trace = run(AlgorithmId::Bubble, vec![3, 1, 2]);
    let summary = play(trace, NullFrames, cues, options, CancelFlag::new()).await;
    worker.unwrap().join().await;

    let played = played.lock().unwrap();
    assert_eq!(summary.steps_played, 6);
    assert!(!played.is_empty());
    assert!(played.len() < 6);
    assert_eq!(played[0], Cue::Compare);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_and_regenerates() {
    let mut controller = PlaybackController::new(seeded(6)).unwrap();
    controller.start(NullFrames, MuteCues).unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;

    let data = controller.reset().await.unwrap().to_vec();
    assert!(!controller.is_playing());
    assert_eq!(data.len(), 12);
    let mut sorted = data.clone();
    sorted.sort();
    assert_eq!(sorted, (1..=12).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_wait_without_playback_is_an_error() {
    let mut controller = PlaybackController::new(seeded(7)).unwrap();
    assert!(matches!(
        controller.wait().await,
        Err(PlaybackError::NotRunning)
    ));
    assert!(!controller.cancel());
}

#[test]
fn test_seeded_controllers_generate_same_sequences() {
    let mut a = PlaybackController::new(seeded(8)).unwrap();
    let mut b = PlaybackController::new(seeded(8)).unwrap();
    assert_eq!(a.data(), b.data());
    assert_eq!(a.generate().unwrap(), b.generate().unwrap());
}

#[test]
fn test_compare_all_uses_configured_size_and_seed() {
    let mut controller = PlaybackController::new(seeded(9)).unwrap();
    let report = controller.compare_all();
    assert_eq!(report.size, 12);
    assert_eq!(report.seed, 9);
    assert_eq!(report.entries.len(), AlgorithmId::ALL.len());
    assert!(report.entries.iter().all(|e| !e.is_error()));
}

#[test]
fn test_select_algorithm_by_name() {
    let mut controller = PlaybackController::new(seeded(10)).unwrap();
    assert_eq!(
        controller.select_algorithm("Quick Sort").unwrap(),
        AlgorithmId::Quick
    );
    assert!(matches!(
        controller.select_algorithm("stooge"),
        Err(PlaybackError::Trace(_))
    ));
    assert_eq!(controller.algorithm(), AlgorithmId::Quick);
    assert_eq!(controller.idle_frame().title, "Quick Sort - Ready to Sort");
}

#[test]
fn test_invalid_config_rejected() {
    let config = PlaybackConfig {
        data_size: 3,
        ..Default::default()
    };
    assert!(PlaybackController::new(config).is_err());
}
