// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end playback behaviour of the controller.

use camrail_engine::{
    Easing, Keyframe, Motion, MotionSet, PlaybackConfig, PlaybackController, Quat, SegmentChain,
    SegmentState, Transition, Vec3,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn k0() -> Keyframe {
    Keyframe::from_arrays([-0.06, 0.0, 0.64], [0.0, 0.0, 0.0, 1.0])
}

fn k1() -> Keyframe {
    Keyframe::new(Vec3::new(0.71, 0.62, 0.44), Quat::from_rotation_y(0.9))
}

fn k2() -> Keyframe {
    Keyframe::new(Vec3::new(0.52, -0.12, -0.31), Quat::from_rotation_x(-0.4))
}

fn single(motion: Motion) -> PlaybackController {
    PlaybackController::new(&MotionSet::new().with("motion", motion), PlaybackConfig::default())
}

/// Record every progress notification
fn observe(controller: &mut PlaybackController) -> Rc<RefCell<Vec<(f32, bool)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    controller.on_progress(move |t, in_animation| sink.borrow_mut().push((t, in_animation)));
    log
}

#[test]
fn test_single_segment_reaches_last_keyframe_exactly() {
    let mut controller = single(Motion::starting_at(k0()).then(Transition::new(1.0), k1()));
    let log = observe(&mut controller);
    controller.restart();

    controller.update(ms(500));
    let segment = controller.chain().and_then(|c| c.get(0)).unwrap();
    assert_eq!(segment.progress(), 0.5);
    assert_eq!(log.borrow().last(), Some(&(0.5, true)));

    controller.update(ms(500));
    let chain = controller.chain().unwrap();
    assert_eq!(chain.get(0).map(|s| s.state), Some(SegmentState::Done));
    assert!(chain.is_finished());
    assert!(!controller.state().running);
    assert_eq!(log.borrow().last(), Some(&(1.0, true)));

    let stored = controller.path(0).and_then(|p| p.keyframe(1)).unwrap();
    assert_eq!(controller.playback_pose(), stored);
    assert_eq!(controller.playback_pose().position, k1().position);

    // Finished chains stay finished.
    controller.update(ms(500));
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_jump_discards_chain_until_restart() {
    let motion = Motion::starting_at(k0())
        .then(Transition::new(1.0), k1())
        .then(Transition::new(1.0), k2());
    let mut controller = single(motion);
    let log = observe(&mut controller);

    controller.restart();
    controller.update(ms(300));
    let notified = log.borrow().len();

    assert!(controller.jump_to_keyframe(2));
    let stored = controller.path(0).and_then(|p| p.keyframe(1)).unwrap();
    assert_eq!(controller.playback_pose(), stored);
    assert_eq!(controller.playback_pose().position, k1().position);
    assert!(controller.chain().is_none());
    assert!(!controller.state().running);
    assert_eq!(log.borrow().len(), notified);

    controller.update(ms(300));
    assert_eq!(controller.playback_pose(), stored);
    assert_eq!(log.borrow().len(), notified);

    controller.restart();
    controller.update(ms(300));
    assert_ne!(controller.playback_pose(), stored);
    assert_eq!(log.borrow().len(), notified + 1);
}

#[test]
fn test_pause_holds_segment_then_resume_crosses_boundary() {
    let motion = Motion::starting_at(k0())
        .then(Transition::new(1.0), k1())
        .then(Transition::new(2.0), k2());
    let mut controller = single(motion);
    controller.restart();

    controller.update(ms(400));
    controller.pause();
    assert!(controller.state().paused);
    let held = controller.playback_pose();

    for _ in 0..10 {
        controller.update(ms(16));
        assert_eq!(controller.playback_pose(), held);
    }
    let first = controller.chain().and_then(|c| c.get(0)).unwrap();
    assert_eq!(first.state, SegmentState::Paused { elapsed: 0.4 });

    controller.resume();
    controller.update(ms(600));

    let chain = controller.chain().unwrap();
    assert_eq!(chain.get(0).map(|s| s.state), Some(SegmentState::Done));
    assert_eq!(
        chain.get(1).map(|s| s.state),
        Some(SegmentState::Running { elapsed: 0.0 })
    );
    assert_eq!(controller.state().active_segment, Some(1));
    assert!(controller.playback_pose().position.distance(k1().position) < 1e-5);
}

#[test]
fn test_toggle_pause_round_trip_keeps_pose() {
    let motion = Motion::starting_at(k0())
        .then(Transition::new(1.0).with_easing(Easing::SinusoidalIn), k1())
        .then(Transition::new(2.0), k2());
    let mut controller = single(motion);
    controller.restart();
    controller.update(ms(250));
    let before = controller.playback_pose();

    controller.toggle_pause();
    assert!(!controller.is_playing());
    controller.toggle_pause();
    assert!(controller.is_playing());
    controller.update(Duration::ZERO);

    assert_eq!(controller.playback_pose(), before);
}

#[test]
fn test_segments_cover_equal_global_ranges() {
    for count in 2..=7 {
        let mut motion = Motion::starting_at(k0());
        for i in 1..count {
            let x = i as f32;
            motion = motion.then(
                Transition::new(0.5 * x),
                Keyframe::new(Vec3::new(x, (x * 1.7).sin(), x * x * 0.1), Quat::IDENTITY),
            );
        }
        let controller = single(motion);
        let path = controller.path(0).unwrap();
        let chain = SegmentChain::from_transitions(path.transitions());

        let spans = count - 1;
        assert_eq!(chain.len(), spans);
        for (i, segment) in chain.segments().iter().enumerate() {
            assert_eq!(segment.start_t, i as f32 / spans as f32);
            assert_eq!(segment.end_t, (i + 1) as f32 / spans as f32);
        }

        for (i, position) in path.positions().iter().enumerate() {
            let on_curve = path.curve().point(i as f32 / spans as f32);
            assert!(on_curve.distance(*position) < 1e-5, "keyframe {i} of {count}");
        }
    }
}

#[test]
fn test_external_progress_matches_direct_evaluation() {
    let motion = Motion::starting_at(k0())
        .then(Transition::new(1.0), k1())
        .then(Transition::new(2.0).with_easing(Easing::CubicInOut), k2());
    let mut controller = single(motion);
    let log = observe(&mut controller);

    for (round, t) in [0.0, 0.1, 0.37, 0.5, 0.81, 1.0].into_iter().enumerate() {
        match round % 3 {
            0 => {}
            1 => {
                controller.restart();
                controller.update(ms(700));
            }
            _ => controller.pause(),
        }

        controller.set_progress_external(t);
        let path = controller.path(0).unwrap();
        let expected = path.pose_at(t);
        assert_eq!(controller.playback_pose(), expected);
        assert_eq!(expected.position, path.curve().point(t));
        assert_eq!(log.borrow().last(), Some(&(t, false)));
    }
}

#[test]
fn test_reported_progress_never_decreases() {
    let motion = Motion::starting_at(k0())
        .then(Transition::new(0.7).with_easing(Easing::ExponentialInOut), k1())
        .then(Transition::new(1.3).with_easing(Easing::CircularOut), k2())
        .then(Transition::new(0.4).with_easing(Easing::QuarticIn), k0());
    let mut controller = single(motion);
    let log = observe(&mut controller);
    controller.restart();

    for frame in 0..400 {
        controller.update(ms(7 + frame % 13));
    }

    let log = log.borrow();
    assert!(log.len() > 10);
    assert!(log.iter().all(|&(_, in_animation)| in_animation));
    assert!(log.windows(2).all(|w| w[1].0 >= w[0].0));
    assert_eq!(log.last().map(|&(t, _)| t), Some(1.0));
}

#[test]
fn test_restart_rebuilds_chain() {
    let motion = Motion::starting_at(k0())
        .then(Transition::new(1.0), k1())
        .then(Transition::new(1.0), k2());
    let mut controller = single(motion);

    controller.restart();
    controller.update(ms(1000));
    assert_eq!(controller.state().active_segment, Some(1));

    controller.restart();
    let chain = controller.chain().cloned().unwrap();
    assert_eq!(chain.get(0).map(|s| s.state), Some(SegmentState::Running { elapsed: 0.0 }));
    assert_eq!(chain.get(1).map(|s| s.state), Some(SegmentState::Idle));
    assert_eq!(controller.state().active_segment, Some(0));

    // Restarting twice in a row is the same as restarting once.
    controller.restart();
    assert_eq!(controller.chain(), Some(&chain));
}

#[test]
fn test_truncated_motion_plays_valid_prefix() {
    let motion = Motion::from_steps(vec![
        k0().into(),
        Transition::new(1.0).into(),
        k1().into(),
        k2().into(),
    ]);
    let mut controller = single(motion);
    controller.restart();
    assert_eq!(controller.chain().map(SegmentChain::len), Some(1));

    controller.update(ms(1000));
    assert!(!controller.state().running);
    assert_eq!(controller.playback_pose().position, k1().position);
}
