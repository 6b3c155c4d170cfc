// Orbit camera for the panorama interior plus world→screen projection.
//
// The camera sits at the origin inside the backdrop sphere and aims at a
// look target derived from the orientation model. Projection output feeds
// the DOM marker overlay, so the pixel mapping here must match what the
// renderer presents.

use glam::{Mat4, Vec2, Vec3, Vec4};

// Camera parameters shared by rendering and overlay projection.
pub const LOOK_RADIUS: f32 = 500.0; // look target always lies outside the backdrop sphere
pub const FOVY_DEG: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// Perspective camera fixed at the origin, aimed by yaw/pitch.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub eye: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::ZERO,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            },
            fovy_radians: FOVY_DEG.to_radians(),
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Spherical-to-Cartesian look target for the given orientation:
    /// `phi = 90° - pitch`, `theta = yaw`.
    pub fn look_target(&self, yaw_deg: f32, pitch_deg: f32) -> Vec3 {
        let phi = (90.0 - pitch_deg).to_radians();
        let theta = yaw_deg.to_radians();
        self.eye
            + LOOK_RADIUS
                * Vec3::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                )
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self, yaw_deg: f32, pitch_deg: f32) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_target(yaw_deg, pitch_deg), Vec3::Y)
    }

    pub fn view_proj(&self, yaw_deg: f32, pitch_deg: f32) -> Mat4 {
        self.projection_matrix() * self.view_matrix(yaw_deg, pitch_deg)
    }
}

/// Project a world position into pixel coordinates for a viewport.
///
/// Returns `None` for points behind the viewer or at/past the far clip
/// (projected depth >= 1) — those are hidden rather than drawn mirrored.
pub fn project_to_screen(
    view_proj: Mat4,
    world: Vec3,
    viewport_w: f32,
    viewport_h: f32,
) -> Option<Vec2> {
    let clip = view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if ndc.z >= 1.0 {
        return None;
    }
    Some(Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport_w,
        (ndc.y * -0.5 + 0.5) * viewport_h,
    ))
}
