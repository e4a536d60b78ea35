use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// How the scene is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Perspective orbit around the target.
    #[default]
    Orbit3d,
    /// Orthographic top-down plan view.
    Top2d,
    /// Orthographic front elevation view.
    Front2d,
}

/// Pitch stops just short of the poles to keep the view basis well formed.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
/// Distance the 2D view eyes sit from the target plane.
const ORTHO_EYE_DISTANCE: f32 = 500.0;

/// Mouse-driven camera state for the three view modes.
///
/// Dragging orbits in 3D and pans in the 2D views; scrolling zooms the
/// orbit radius or the orthographic extent. All angles are radians.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Active view mode. Switching modes keeps each mode's state, so
    /// flipping to 2D and back does not lose the orbit.
    pub mode: ViewMode,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    radius: f32,
    ortho_size: f32,
    options: CameraOptions,
}

impl CameraRig {
    /// Rig looking at the origin from the default show distance.
    #[must_use]
    pub fn new(options: CameraOptions) -> Self {
        Self {
            mode: ViewMode::Orbit3d,
            target: Vec3::ZERO,
            yaw: -FRAC_PI_2,
            pitch: 0.0,
            radius: 500.0,
            ortho_size: 500.0,
            options,
        }
    }

    /// Apply a mouse drag delta: orbit in 3D, pan in the 2D views.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        match self.mode {
            ViewMode::Orbit3d => {
                self.yaw += dx * self.options.orbit_speed;
                self.pitch = (self.pitch - dy * self.options.orbit_speed)
                    .clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }
            ViewMode::Top2d | ViewMode::Front2d => {
                let scale = self.ortho_size / ORTHO_EYE_DISTANCE;
                self.target.x -= dx * scale;
                self.target.y += dy * scale;
            }
        }
    }

    /// Apply a scroll delta: shrink the orbit radius in 3D, the
    /// orthographic extent in 2D.
    pub fn zoom(&mut self, delta: f32) {
        match self.mode {
            ViewMode::Orbit3d => {
                self.radius =
                    (self.radius - delta * self.options.zoom_step).max(1.0);
            }
            ViewMode::Top2d | ViewMode::Front2d => {
                self.ortho_size = (self.ortho_size
                    - delta * self.options.zoom_step)
                    .max(10.0);
            }
        }
    }

    /// Eye position for the active mode.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        match self.mode {
            ViewMode::Orbit3d => {
                self.target
                    + self.radius
                        * Vec3::new(
                            self.pitch.cos() * self.yaw.cos(),
                            self.pitch.sin(),
                            self.pitch.cos() * self.yaw.sin(),
                        )
            }
            ViewMode::Top2d => Vec3::new(
                self.target.x,
                ORTHO_EYE_DISTANCE,
                self.target.z,
            ),
            ViewMode::Front2d => Vec3::new(
                self.target.x,
                self.target.y,
                ORTHO_EYE_DISTANCE,
            ),
        }
    }

    /// Combined view-projection matrix for the given aspect ratio.
    #[must_use]
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let s = self.ortho_size;
        match self.mode {
            ViewMode::Orbit3d => {
                let projection = Mat4::perspective_rh(
                    45f32.to_radians(),
                    aspect,
                    0.1,
                    5000.0,
                );
                let view =
                    Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
                projection * view
            }
            ViewMode::Top2d => {
                let projection = Mat4::orthographic_rh(
                    -s * aspect,
                    s * aspect,
                    -s,
                    s,
                    -1000.0,
                    1000.0,
                );
                let view = Mat4::look_at_rh(
                    self.eye(),
                    self.target,
                    Vec3::NEG_Z,
                );
                projection * view
            }
            ViewMode::Front2d => {
                let projection = Mat4::orthographic_rh(
                    -s * aspect,
                    s * aspect,
                    -s,
                    s,
                    -1000.0,
                    5000.0,
                );
                let view =
                    Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
                projection * view
            }
        }
    }

    /// Point the camera looks at.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Orbit distance from the target (3D mode).
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Orthographic half-extent (2D modes).
    #[must_use]
    pub fn ortho_size(&self) -> f32 {
        self.ortho_size
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraOptions::default())
    }
}
