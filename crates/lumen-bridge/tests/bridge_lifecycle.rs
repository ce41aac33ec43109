//! End-to-end lifecycle tests: real clock and render worker threads
//! against a recording renderer.

mod common;

use std::thread;
use std::time::Duration;

use lumen_bridge::coords::{PixelSize, Vec2};
use lumen_bridge::input::{InputKind, RawInput, RawPointer, TouchPhase};
use lumen_bridge::surface::PresentationMode;
use lumen_bridge::{Bridge, BridgeError, BridgeState};

use common::{fast_config, Call, Recorder, StereoLayer};

/// Every frame must target the most recently announced surface, and no
/// frame may land between `Lost` and the next `Available`.
fn assert_frames_target_live_surface(calls: &[Call]) {
    let mut live: Option<u64> = None;
    for (i, call) in calls.iter().enumerate() {
        match call {
            Call::Available { generation, .. } => live = Some(*generation),
            Call::Lost => live = None,
            Call::Frame { generation, .. } => {
                assert_eq!(live, Some(*generation), "stale frame at call #{i}: {calls:?}");
            }
            _ => {}
        }
    }
}

fn pointer(id: u64, phase: TouchPhase, x: f32, y: f32) -> RawInput {
    RawInput::Pointer(RawPointer {
        id,
        phase,
        position: Vec2::new(x, y),
        timestamp: Duration::ZERO,
    })
}

// ════════════════════════════════════════════════════════════════
// Windowed lifecycle
// ════════════════════════════════════════════════════════════════

#[test]
fn create_resize_teardown_scenario() {
    let (renderer, journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());

    bridge.initialize(800, 600).unwrap();
    assert!(journal.wait_for_frames(2));

    bridge.resize(1024, 768).unwrap();
    assert!(journal.wait_for(|calls| calls.iter().any(|c| matches!(
        c,
        Call::Frame { size, .. } if *size == PixelSize::new(1024, 768)
    ))));

    bridge.teardown();
    assert_eq!(bridge.state(), BridgeState::Uninitialized);

    let calls = journal.calls();
    let resized_at = calls
        .iter()
        .position(|c| matches!(c, Call::Resized { .. }))
        .unwrap();
    for (i, call) in calls.iter().enumerate() {
        if let Call::Frame { size, .. } = call {
            let expected = if i < resized_at {
                PixelSize::new(800, 600)
            } else {
                PixelSize::new(1024, 768)
            };
            assert_eq!(*size, expected, "frame #{i}");
        }
    }
    assert_eq!(calls.last(), Some(&Call::Lost));
    assert_frames_target_live_surface(&calls);
}

#[test]
fn no_frames_after_teardown() {
    let (renderer, journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());

    bridge.initialize(320, 240).unwrap();
    assert!(journal.wait_for_frames(3));
    bridge.teardown();

    let frozen = journal.frame_count();
    let rendered = bridge.stats().frames_rendered;
    thread::sleep(Duration::from_millis(60));

    assert_eq!(journal.frame_count(), frozen);
    assert_eq!(bridge.stats().frames_rendered, rendered);
    assert_eq!(journal.calls().last(), Some(&Call::Lost));
}

#[test]
fn double_initialize_leaves_state_unchanged() {
    let (renderer, _journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());

    let first = bridge.initialize(800, 600).unwrap();
    assert!(matches!(
        bridge.initialize(1024, 768),
        Err(BridgeError::AlreadyInitialized)
    ));

    let current = bridge.surface().unwrap();
    assert_eq!(current.generation(), first.generation());
    assert_eq!(current.size(), PixelSize::new(800, 600));
    assert_eq!(bridge.state(), BridgeState::Active(PresentationMode::Windowed));
}

#[test]
fn reinitialize_after_teardown_gets_new_surface() {
    let (renderer, journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());

    let first = bridge.initialize(100, 100).unwrap();
    bridge.teardown();
    let second = bridge.initialize(200, 100).unwrap();
    assert_ne!(first.generation(), second.generation());

    assert!(journal.wait_for(|calls| calls.iter().any(|c| matches!(
        c,
        Call::Frame { generation, .. } if *generation == second.generation()
    ))));
    bridge.dispose();
    bridge.dispose();
    assert_frames_target_live_surface(&journal.calls());
}

#[test]
fn hidden_view_drops_ticks() {
    let (renderer, journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());

    bridge.initialize(100, 100).unwrap();
    assert!(journal.wait_for_frames(1));

    bridge.set_view_visible(false);
    let frozen = journal.frame_count();
    thread::sleep(Duration::from_millis(40));
    assert_eq!(journal.frame_count(), frozen);
    assert!(bridge.stats().ticks_dropped > 0);

    bridge.set_view_visible(true);
    assert!(journal.wait_for_frames(frozen + 1));
}

#[test]
fn slow_frames_are_never_overlapped() {
    let (renderer, journal) = Recorder::with_frame_cost(Duration::from_millis(15));
    let mut bridge = Bridge::new(renderer, fast_config());

    bridge.initialize(64, 64).unwrap();
    assert!(journal.wait_for_frames(4));
    bridge.teardown();

    let stats = bridge.stats();
    assert!(!journal.overlapped());
    assert!(stats.ticks_suppressed > 0, "{stats:?}");
    assert_eq!(stats.frames_rendered + stats.frames_discarded, stats.frames_requested);
}

// ════════════════════════════════════════════════════════════════
// Immersive transitions
// ════════════════════════════════════════════════════════════════

#[test]
fn enter_immersive_requires_initialize() {
    let (renderer, journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());

    assert!(matches!(
        bridge.enter_immersive(StereoLayer::boxed(1920, 1824)),
        Err(BridgeError::NotInitialized)
    ));
    assert_eq!(bridge.state(), BridgeState::Uninitialized);
    assert!(journal.calls().is_empty());
}

#[test]
fn enter_then_exit_restores_windowed_geometry() {
    let (renderer, journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());

    let windowed = bridge.initialize_scaled(800, 600, 2.0).unwrap();
    assert!(journal.wait_for_frames(1));

    let immersive = bridge.enter_immersive(StereoLayer::boxed(1920, 1824)).unwrap();
    assert_eq!(bridge.state(), BridgeState::Active(PresentationMode::Immersive));
    assert_eq!(immersive.views(), 2);
    assert!(journal.wait_for(|calls| calls.iter().any(|c| matches!(
        c,
        Call::Frame { views: 2, .. }
    ))));

    assert!(matches!(
        bridge.enter_immersive(StereoLayer::boxed(10, 10)),
        Err(BridgeError::InvalidTransition { .. })
    ));

    let restored = bridge.exit_immersive().unwrap();
    assert_eq!(bridge.state(), BridgeState::Active(PresentationMode::Windowed));
    assert_eq!(restored.size(), windowed.size());
    assert_eq!(restored.scale_factor(), windowed.scale_factor());
    assert_ne!(restored.generation(), windowed.generation());

    assert!(journal.wait_for(|calls| calls.iter().any(|c| matches!(
        c,
        Call::Frame { generation, .. } if *generation == restored.generation()
    ))));
    bridge.teardown();

    let calls = journal.calls();
    assert_frames_target_live_surface(&calls);
    let modes: Vec<PresentationMode> = calls
        .iter()
        .filter_map(|c| match c {
            Call::Available { mode, .. } => Some(*mode),
            _ => None,
        })
        .collect();
    assert_eq!(
        modes,
        [PresentationMode::Windowed, PresentationMode::Immersive, PresentationMode::Windowed]
    );
}

// ════════════════════════════════════════════════════════════════
// Input
// ════════════════════════════════════════════════════════════════

#[test]
fn down_move_up_reach_renderer_in_order() {
    let (renderer, journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());
    bridge.initialize_scaled(400, 400, 2.0).unwrap();

    bridge.handle_input(&pointer(7, TouchPhase::Began, 10.0, 10.0));
    bridge.handle_input(&pointer(7, TouchPhase::Moved, 11.0, 10.0));
    bridge.handle_input(&pointer(7, TouchPhase::Stationary, 11.0, 10.0));
    bridge.handle_input(&pointer(7, TouchPhase::Moved, 12.0, 10.0));
    bridge.handle_input(&pointer(7, TouchPhase::Ended, 12.0, 10.0));

    let inputs = journal.inputs();
    let kinds: Vec<InputKind> = inputs.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [InputKind::Down, InputKind::Move, InputKind::Move, InputKind::Up]);
    assert!(inputs.iter().all(|e| e.id == 7));
    assert_eq!(inputs[2].position, Vec2::new(24.0, 20.0));
}

#[test]
fn anomalous_input_is_dropped_and_counted() {
    let (renderer, journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());
    bridge.initialize(400, 400).unwrap();

    assert!(bridge.handle_input(&pointer(1, TouchPhase::Moved, 1.0, 1.0)).is_none());
    assert!(bridge.handle_input(&pointer(2, TouchPhase::Began, 1.0, 1.0)).is_some());
    assert!(bridge.handle_input(&pointer(2, TouchPhase::Began, 1.0, 1.0)).is_none());

    let stats = bridge.stats();
    assert_eq!(stats.input_anomalies, 2);
    assert_eq!(stats.input_forwarded, 1);
    assert_eq!(journal.inputs().len(), 1);
}

#[test]
fn contacts_do_not_survive_a_mode_switch() {
    let (renderer, _journal) = Recorder::new();
    let mut bridge = Bridge::new(renderer, fast_config());
    bridge.initialize(400, 400).unwrap();

    bridge.handle_input(&pointer(5, TouchPhase::Began, 1.0, 1.0)).unwrap();
    bridge.enter_immersive(StereoLayer::boxed(1000, 1000)).unwrap();

    assert!(bridge.handle_input(&pointer(5, TouchPhase::Ended, 1.0, 1.0)).is_none());
    assert!(bridge.handle_input(&pointer(5, TouchPhase::Began, 1.0, 1.0)).is_some());
}
