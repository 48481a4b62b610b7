use std::time::Duration;

use super::engine::{fraction_of, target_position};
use super::fake::{FakeOutput, track};
use super::*;

fn loaded(secs: u64) -> (FakeOutput, PlaybackEngine<FakeOutput>) {
    let output = FakeOutput::new();
    let mut engine = PlaybackEngine::new(output.clone());
    engine.load(&track("A.mp3", secs)).unwrap();
    (output, engine)
}

#[test]
fn transport_without_a_loaded_track_is_a_no_op() {
    let output = FakeOutput::new();
    let mut engine = PlaybackEngine::new(output.clone());

    engine.play();
    engine.pause();
    engine.seek(0.5);
    engine.stop();

    assert!(!engine.is_loaded());
    assert!(!engine.is_finished());
    assert_eq!(engine.position(), Duration::ZERO);
    assert_eq!(engine.duration(), Duration::ZERO);
    assert_eq!(engine.position_fraction(), 0.0);
    assert!(output.opened().is_empty());
}

#[test]
fn load_replaces_the_previous_handle() {
    let (output, mut engine) = loaded(100);
    engine.load(&track("B.mp3", 50)).unwrap();

    assert_eq!(output.live_handles(), 1);
    assert_eq!(engine.duration(), Duration::from_secs(50));
    assert_eq!(output.opened().len(), 2);
}

#[test]
fn failed_load_leaves_the_engine_empty() {
    let (output, mut engine) = loaded(100);
    let broken = track("B.mp3", 50);
    output.break_path(&broken.path);

    assert!(engine.load(&broken).is_err());
    assert!(!engine.is_loaded());
    assert_eq!(output.live_handles(), 0);
}

#[test]
fn seek_maps_fraction_onto_duration() {
    let (output, mut engine) = loaded(200);
    for f in [0.0_f32, 0.25, 0.5, 0.999] {
        engine.seek(f);
        assert!(
            (engine.position_fraction() - f).abs() < 1e-4,
            "fraction {f} came back as {}",
            engine.position_fraction()
        );
    }
    engine.seek(0.5);
    assert_eq!(output.position(), Duration::from_secs(100));
}

#[test]
fn seek_at_or_past_the_end_goes_back_to_the_start() {
    let (output, mut engine) = loaded(200);
    engine.seek(0.5);
    engine.seek(1.0);
    assert_eq!(output.position(), Duration::ZERO);

    engine.seek(0.5);
    engine.seek(7.0);
    assert_eq!(engine.position_fraction(), 0.0);
}

#[test]
fn stop_releases_the_handle() {
    let (output, mut engine) = loaded(200);
    engine.play();
    assert!(output.is_playing());

    engine.stop();
    assert!(!engine.is_loaded());
    assert!(!output.is_playing());
    assert_eq!(output.live_handles(), 0);
    assert_eq!(engine.position_fraction(), 0.0);
}

#[test]
fn dropping_the_engine_releases_the_handle() {
    let (output, engine) = loaded(200);
    assert_eq!(output.live_handles(), 1);
    drop(engine);
    assert_eq!(output.live_handles(), 0);
}

#[test]
fn target_position_guards_out_of_range_fractions() {
    let d = Duration::from_secs(10);
    assert_eq!(target_position(0.5, d), Duration::from_secs(5));
    assert_eq!(target_position(-0.5, d), Duration::ZERO);
    assert_eq!(target_position(1.0, d), Duration::ZERO);
    assert_eq!(target_position(f32::NAN, d), Duration::ZERO);
    assert_eq!(target_position(0.5, Duration::ZERO), Duration::ZERO);
}

#[test]
fn fraction_of_guards_zero_duration() {
    assert_eq!(fraction_of(Duration::from_secs(3), Duration::ZERO), 0.0);
    assert_eq!(
        fraction_of(Duration::from_secs(3), Duration::from_secs(12)),
        0.25
    );
    assert_eq!(
        fraction_of(Duration::from_secs(30), Duration::from_secs(12)),
        1.0
    );
}
