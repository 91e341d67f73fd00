//! Perspective camera and damped orbit controls

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::DAMPING_FACTOR;

/// Keeps the polar angle off the poles
const POLE_EPS: f32 = 1e-6;
/// Pending rotation below this is dropped
const SETTLE_EPS: f32 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec3,
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub projection: Mat4,
    pub view: Mat4,
}

impl Camera {
    pub fn new(pos: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            pos,
            target: Vec3::ZERO,
            fov_y: fov_degrees.to_radians(),
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera.look_at_target();
        camera
    }

    /// Default lens at `pos`
    #[cfg(test)]
    pub(crate) fn at(pos: Vec3, aspect: f32) -> Self {
        use crate::consts::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};
        Self::new(pos, CAMERA_FOV_DEGREES, aspect, CAMERA_NEAR, CAMERA_FAR)
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far);
    }

    pub fn look_at_target(&mut self) {
        self.view = Mat4::look_at_rh(self.pos, self.target, Vec3::Y);
    }
}

/// Spherical coordinates around the orbit target (y-up)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +y
    phi: f32,
    /// Azimuth around y, measured from +z
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit controls with damping.
///
/// Drags accumulate a pending rotation; each update applies a
/// `damping_factor` share of it and decays the remainder, giving the
/// glide-to-stop feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitControls {
    pub damping_factor: f32,
    pub rotate_speed: f32,
    /// Pending (theta, phi) rotation in radians
    pending: Vec2,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(DAMPING_FACTOR)
    }
}

impl OrbitControls {
    pub fn new(damping_factor: f32) -> Self {
        Self {
            damping_factor,
            rotate_speed: 1.0,
            pending: Vec2::ZERO,
        }
    }

    /// Queue a rotation from a pointer drag of (dx, dy) pixels over a
    /// surface `surface_height` pixels tall
    pub fn drag(&mut self, dx: f32, dy: f32, surface_height: f32) {
        let scale = std::f32::consts::TAU * self.rotate_speed / surface_height.max(1.0);
        self.pending.x -= dx * scale;
        self.pending.y -= dy * scale;
    }

    pub fn pending(&self) -> Vec2 {
        self.pending
    }

    /// Apply one damped step and re-aim the camera at its target
    pub fn update(&mut self, camera: &mut Camera) {
        if self.pending.abs().max_element() > SETTLE_EPS {
            let mut spherical = Spherical::from_offset(camera.pos - camera.target);
            spherical.theta += self.pending.x * self.damping_factor;
            spherical.phi = (spherical.phi + self.pending.y * self.damping_factor)
                .clamp(POLE_EPS, std::f32::consts::PI - POLE_EPS);
            camera.pos = camera.target + spherical.to_offset();
            self.pending *= 1.0 - self.damping_factor;
        } else {
            self.pending = Vec2::ZERO;
        }
        camera.look_at_target();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spherical_round_trip() {
        let offset = Vec3::new(4.0, 5.0, 11.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-4);
    }

    #[test]
    fn test_idle_update_keeps_position() {
        let mut camera = Camera::at(Vec3::new(4.0, 5.0, 11.0), 16.0 / 9.0);
        let mut controls = OrbitControls::default();
        for _ in 0..10 {
            controls.update(&mut camera);
        }
        assert_eq!(camera.pos, Vec3::new(4.0, 5.0, 11.0));
    }

    #[test]
    fn test_drag_glides_and_stops() {
        let mut camera = Camera::at(Vec3::new(0.0, 0.0, 10.0), 1.0);
        let mut controls = OrbitControls::default();
        controls.drag(100.0, 0.0, 800.0);

        controls.update(&mut camera);
        let first_step = camera.pos;
        assert!(first_step.x < 0.0, "drag right orbits camera left");
        assert!((first_step.length() - 10.0).abs() < 1e-3, "orbit keeps distance");

        for _ in 0..2000 {
            controls.update(&mut camera);
        }
        assert_eq!(controls.pending(), Vec2::ZERO);
        let resting = camera.pos;
        controls.update(&mut camera);
        assert_eq!(camera.pos, resting);
    }

    #[test]
    fn test_polar_clamped() {
        let mut camera = Camera::at(Vec3::new(0.0, 0.0, 10.0), 1.0);
        let mut controls = OrbitControls::new(1.0);
        controls.drag(0.0, 10_000.0, 100.0);
        controls.update(&mut camera);
        assert!(camera.pos.is_finite());
        assert!(camera.pos.y <= 10.0);
    }

    #[test]
    fn test_aspect_updates_projection() {
        let mut camera = Camera::at(Vec3::Z, 1.0);
        let before = camera.projection;
        camera.set_aspect(2.0);
        assert_ne!(camera.projection, before);
        assert_eq!(camera.aspect, 2.0);
    }
}
