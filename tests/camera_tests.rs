// Host-side tests for the orbit camera and marker projection.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod camera {
    include!("../src/core/camera.rs");
}

use camera::*;
use glam::Vec3;

#[test]
fn look_target_lies_on_the_fixed_radius() {
    let cam = OrbitCamera::new(16.0 / 9.0);
    for (yaw, pitch) in [(0.0, 0.0), (37.0, 12.0), (180.0, -60.0), (271.5, 84.0)] {
        let t = cam.look_target(yaw, pitch);
        assert!((t.length() - LOOK_RADIUS).abs() < 1e-2, "({yaw},{pitch})");
    }
}

#[test]
fn zero_orientation_looks_down_positive_x() {
    let cam = OrbitCamera::new(1.0);
    let t = cam.look_target(0.0, 0.0);
    assert!((t.x - LOOK_RADIUS).abs() < 1e-2);
    assert!(t.y.abs() < 1e-2);
    assert!(t.z.abs() < 1e-2);
}

#[test]
fn positive_pitch_raises_the_look_target() {
    let cam = OrbitCamera::new(1.0);
    let up = cam.look_target(0.0, 45.0);
    let down = cam.look_target(0.0, -45.0);
    assert!(up.y > 0.0);
    assert!(down.y < 0.0);
    assert!((up.y + down.y).abs() < 1e-2); // symmetric about the horizon
}

#[test]
fn dead_ahead_projects_to_the_viewport_center() {
    let cam = OrbitCamera::new(800.0 / 600.0);
    let vp = cam.view_proj(0.0, 0.0);
    let p = project_to_screen(vp, Vec3::new(50.0, 0.0, 0.0), 800.0, 600.0)
        .expect("point ahead must be visible");
    assert!((p.x - 400.0).abs() < 0.5);
    assert!((p.y - 300.0).abs() < 0.5);
}

#[test]
fn point_behind_the_camera_is_hidden() {
    let cam = OrbitCamera::new(800.0 / 600.0);
    let vp = cam.view_proj(0.0, 0.0);
    assert!(project_to_screen(vp, Vec3::new(-50.0, 0.0, 0.0), 800.0, 600.0).is_none());
}

#[test]
fn point_past_the_far_plane_is_hidden() {
    let cam = OrbitCamera::new(1.0);
    let vp = cam.view_proj(0.0, 0.0);
    assert!(project_to_screen(vp, Vec3::new(Z_FAR * 2.0, 0.0, 0.0), 800.0, 600.0).is_none());
}

#[test]
fn screen_mapping_follows_camera_basis() {
    // looking down +X with +Y up, world +Z is screen-right
    let cam = OrbitCamera::new(1.0);
    let vp = cam.view_proj(0.0, 0.0);
    let right = project_to_screen(vp, Vec3::new(50.0, 0.0, 5.0), 800.0, 600.0).unwrap();
    assert!(right.x > 400.0);
    let above = project_to_screen(vp, Vec3::new(50.0, 5.0, 0.0), 800.0, 600.0).unwrap();
    assert!(above.y < 300.0); // screen y grows downward
}

#[test]
fn degenerate_aspect_inputs_are_ignored() {
    let mut cam = OrbitCamera::new(0.0);
    assert_eq!(cam.aspect, 1.0);
    cam.set_aspect(2.0);
    assert_eq!(cam.aspect, 2.0);
    cam.set_aspect(f32::NAN);
    assert_eq!(cam.aspect, 2.0);
    cam.set_aspect(-3.0);
    assert_eq!(cam.aspect, 2.0);
}
