// Camera-facing orientation state: yaw/pitch plus drag bookkeeping.
//
// Pure state — this module never touches rendering or the DOM. The web
// frontend mutates it from pointer events; the frame tick reads it to
// aim the camera.

use std::time::Duration;

// Interaction tuning
pub const DRAG_SENSITIVITY_DEG_PER_PX: f32 = 0.1;
pub const IDLE_YAW_DEG_PER_SEC: f32 = 3.0; // slow automatic pan while idle
pub const PITCH_LIMIT_DEG: f32 = 85.0; // keeps the look vector off the poles

/// Pointer position and orientation captured at drag start.
#[derive(Clone, Copy, Debug)]
pub struct DragOrigin {
    pub x: f32,
    pub y: f32,
    pub yaw_deg: f32,
    pub pitch_deg: f32,
}

/// Yaw/pitch orientation evolved by idle drift and pointer drags.
///
/// Invariant: `pitch_deg` stays within `[-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG]`
/// after every mutation.
#[derive(Clone, Debug, Default)]
pub struct OrientationState {
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    drag: Option<DragOrigin>,
}

impl OrientationState {
    pub fn new(yaw_deg: f32, pitch_deg: f32) -> Self {
        Self {
            yaw_deg,
            pitch_deg: clamp_pitch(pitch_deg),
            drag: None,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Advance the slow automatic pan. No-op while a drag is active.
    pub fn advance_idle(&mut self, dt: Duration) {
        if self.drag.is_some() {
            return;
        }
        self.yaw_deg += IDLE_YAW_DEG_PER_SEC * dt.as_secs_f32();
    }

    /// Snapshot the pointer and current orientation as the drag origin.
    /// A pointer-down while already dragging restarts from the new origin.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag = Some(DragOrigin {
            x,
            y,
            yaw_deg: self.yaw_deg,
            pitch_deg: self.pitch_deg,
        });
    }

    /// Re-derive yaw/pitch from the drag origin. Dragging left rotates the
    /// view right (grab-and-pull). Without a prior `begin_drag` this is a
    /// defensive no-op.
    pub fn update_drag(&mut self, x: f32, y: f32) {
        let Some(origin) = self.drag else {
            return;
        };
        self.yaw_deg = origin.yaw_deg + (origin.x - x) * DRAG_SENSITIVITY_DEG_PER_PX;
        self.pitch_deg = clamp_pitch(origin.pitch_deg + (y - origin.y) * DRAG_SENSITIVITY_DEG_PER_PX);
    }

    /// End the drag; idle drift resumes on the next tick.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}

#[inline]
fn clamp_pitch(pitch_deg: f32) -> f32 {
    pitch_deg.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG)
}
