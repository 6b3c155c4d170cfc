// Host-side tests for the pure orientation model.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod orientation {
    include!("../src/core/orientation.rs");
}

use orientation::*;
use std::time::Duration;

#[test]
fn pitch_stays_clamped_under_large_drags() {
    let mut o = OrientationState::default();
    o.begin_drag(0.0, 0.0);
    o.update_drag(0.0, 1.0e6);
    assert_eq!(o.pitch_deg, PITCH_LIMIT_DEG);
    o.update_drag(0.0, -1.0e6);
    assert_eq!(o.pitch_deg, -PITCH_LIMIT_DEG);

    // arbitrary zig-zag never escapes the clamp
    for i in 0..200 {
        let y = (i as f32) * 997.0 * if i % 2 == 0 { 1.0 } else { -1.0 };
        o.update_drag(0.0, y);
        assert!(o.pitch_deg >= -PITCH_LIMIT_DEG && o.pitch_deg <= PITCH_LIMIT_DEG);
    }
}

#[test]
fn idle_advance_is_noop_while_dragging() {
    let mut o = OrientationState::new(12.0, 3.0);
    o.begin_drag(100.0, 100.0);
    o.advance_idle(Duration::from_secs(1000));
    assert_eq!(o.yaw_deg, 12.0);
    assert_eq!(o.pitch_deg, 3.0);
}

#[test]
fn idle_drift_is_monotonic_and_rate_scaled() {
    let mut o = OrientationState::default();
    let mut prev = o.yaw_deg;
    let step = Duration::from_millis(1000 / 60);
    for _ in 0..120 {
        o.advance_idle(step);
        assert!(o.yaw_deg > prev);
        prev = o.yaw_deg;
    }
    let elapsed = step.as_secs_f32() * 120.0;
    assert!((o.yaw_deg - IDLE_YAW_DEG_PER_SEC * elapsed).abs() < 1e-3);
}

#[test]
fn drag_sign_convention_matches_grab_and_pull() {
    let mut o = OrientationState::default();
    o.begin_drag(400.0, 300.0);
    o.update_drag(300.0, 300.0);
    // dragging left by 100px rotates the view right by 100 * sensitivity
    assert!((o.yaw_deg - 100.0 * DRAG_SENSITIVITY_DEG_PER_PX).abs() < 1e-5);
    assert_eq!(o.pitch_deg, 0.0);

    o.update_drag(300.0, 400.0);
    assert!((o.pitch_deg - 100.0 * DRAG_SENSITIVITY_DEG_PER_PX).abs() < 1e-5);
}

#[test]
fn update_without_begin_is_a_noop() {
    let mut o = OrientationState::new(5.0, -2.0);
    o.update_drag(9999.0, -9999.0);
    assert_eq!(o.yaw_deg, 5.0);
    assert_eq!(o.pitch_deg, -2.0);
    assert!(!o.is_dragging());
}

#[test]
fn new_pointer_down_restarts_the_drag_origin() {
    let mut o = OrientationState::default();
    o.begin_drag(0.0, 0.0);
    o.update_drag(10.0, 0.0);
    let yaw_after_first = o.yaw_deg;

    // second pointer-down mid-drag: deltas measure from the new origin
    o.begin_drag(500.0, 500.0);
    o.update_drag(500.0, 500.0);
    assert_eq!(o.yaw_deg, yaw_after_first);
    o.update_drag(490.0, 500.0);
    assert!((o.yaw_deg - (yaw_after_first + 10.0 * DRAG_SENSITIVITY_DEG_PER_PX)).abs() < 1e-5);
}

#[test]
fn idle_drift_resumes_after_a_drag_ends() {
    let mut o = OrientationState::default();
    o.begin_drag(0.0, 0.0);
    o.advance_idle(Duration::from_secs(5));
    assert_eq!(o.yaw_deg, 0.0);
    o.end_drag();
    o.advance_idle(Duration::from_secs(1));
    assert!((o.yaw_deg - IDLE_YAW_DEG_PER_SEC).abs() < 1e-4);
}

#[test]
fn pitch_is_clamped_at_construction() {
    let o = OrientationState::new(0.0, 300.0);
    assert_eq!(o.pitch_deg, PITCH_LIMIT_DEG);
}
