//! Trackball camera controls.
//!
//! Pointer input accumulates into pending rotate, zoom and pan amounts;
//! `update` applies them to the camera orbiting its target. Left drag
//! rotates, middle drag or the wheel zooms, right drag pans.

use glam::{Quat, Vec2, Vec3};

use crate::camera::PerspectiveCamera;
use crate::config::ControlsConfig;
use crate::core::{Button, Controller};

/// Zoom contributed by one wheel line
const WHEEL_ZOOM_PER_LINE: f32 = 0.05;

/// Motion below this is treated as settled
const EPSILON: f32 = 1e-6;

/// Orbits a camera about its target in response to pointer drags
#[derive(Debug, Clone)]
pub struct TrackballControls {
    config: ControlsConfig,
    rotate: Vec2,
    zoom: f32,
    pan: Vec2,
}

impl TrackballControls {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            config: config.clone(),
            rotate: Vec2::ZERO,
            zoom: 0.0,
            pan: Vec2::ZERO,
        }
    }

    /// Accumulate this frame's pointer motion
    pub fn handle_input(&mut self, input: &dyn Controller) {
        let (dx, dy) = input.pointer_delta();

        if !self.config.no_rotate && input.is_down(Button::MouseLeft) {
            // Screen space spans [-1, 1] across the surface, y up
            self.rotate += Vec2::new(2.0 * dx, -2.0 * dy);
        }
        if !self.config.no_zoom {
            if input.is_down(Button::MouseMiddle) {
                self.zoom += dy;
            }
            self.zoom -= input.scroll_delta() * WHEEL_ZOOM_PER_LINE;
        }
        if !self.config.no_pan && input.is_down(Button::MouseRight) {
            self.pan += Vec2::new(dx, dy);
        }
    }

    /// True when no motion is pending
    pub fn is_idle(&self) -> bool {
        self.rotate.length_squared() < EPSILON * EPSILON
            && self.zoom.abs() < EPSILON
            && self.pan.length_squared() < EPSILON * EPSILON
    }

    /// Apply pending motion to the camera.
    ///
    /// With `static_moving` off, each update consumes `dynamic_damping_factor`
    /// of whatever motion is still pending, so a drag eases out over several
    /// frames. A momentum trackball would instead keep the last step and scale
    /// it by `sqrt(1 - factor)` each update; here rotation stops once the
    /// pending drag is used up.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let mut eye = camera.eye();
        if eye.length_squared() < EPSILON {
            log::warn!("Camera sits on its target, skipping controls update");
            self.settle();
            return;
        }

        let fraction = if self.config.static_moving {
            1.0
        } else {
            self.config.dynamic_damping_factor.clamp(0.0, 1.0)
        };

        if !self.config.no_rotate {
            let step = self.rotate * fraction;
            self.rotate -= step;
            self.rotate_eye(&mut eye, &mut camera.up, step);
        }

        if !self.config.no_zoom {
            let step = self.zoom * fraction;
            self.zoom -= step;
            let factor = 1.0 + step * self.config.zoom_speed;
            if factor > 0.0 && (factor - 1.0).abs() > EPSILON {
                eye *= factor;
            }
        }

        if !self.config.no_pan {
            let step = self.pan * fraction;
            self.pan -= step;
            let offset = self.pan_offset(eye, camera.up, step);
            camera.target += offset;
        }

        camera.position = camera.target + eye;

        if self.is_idle() {
            self.settle();
        }
    }

    fn rotate_eye(&self, eye: &mut Vec3, up: &mut Vec3, step: Vec2) {
        let angle = step.length() * self.config.rotate_speed;
        if angle < EPSILON {
            return;
        }

        let eye_dir = eye.normalize();
        let up_dir = up.normalize();
        let sideways = up_dir.cross(eye_dir).normalize_or_zero();
        let movement = up_dir * step.y + sideways * step.x;

        let axis = movement.cross(*eye).normalize_or_zero();
        if axis == Vec3::ZERO {
            return;
        }

        let rotation = Quat::from_axis_angle(axis, angle);
        *eye = rotation * *eye;
        *up = (rotation * *up).normalize();
    }

    fn pan_offset(&self, eye: Vec3, up: Vec3, step: Vec2) -> Vec3 {
        if step.length_squared() < EPSILON * EPSILON {
            return Vec3::ZERO;
        }
        let scaled = step * eye.length() * self.config.pan_speed;
        let across = eye.cross(up).normalize_or_zero() * scaled.x;
        let vertical = up.normalize_or_zero() * scaled.y;
        across + vertical
    }

    fn settle(&mut self) {
        self.rotate = Vec2::ZERO;
        self.zoom = 0.0;
        self.pan = Vec2::ZERO;
    }
}
