use glam::{Vec2, Vec3};
use crate::renderer::camera::Camera3D;

/// Keeps the polar angle away from the poles where the basis degenerates.
const POLAR_EPS: f32 = 1e-6;

/// Orbit controls: rotate around, dolly toward and pan a target point.
///
/// Input handlers only accumulate deltas; `update` applies them to the
/// camera once per frame, bleeding them off gradually when damping is on.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits around.
    pub target: Vec3,
    pub enable_damping: bool,
    /// Fraction of the pending delta applied per update (default: 0.05).
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pending (azimuth, polar) rotation in radians.
    spherical_delta: Vec2,
    /// Pending radius multiplier.
    scale: f32,
    /// Pending target translation.
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 0.5,
            zoom_speed: 1.2,
            pan_speed: 0.8,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical_delta: Vec2::ZERO,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a rotation from a pointer drag of `delta` pixels.
    /// A drag across the full viewport height is one full turn (times rotate speed).
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let turn = std::f32::consts::TAU * self.rotate_speed / viewport_height;
        self.spherical_delta.x -= delta.x * turn;
        self.spherical_delta.y -= delta.y * turn;
    }

    /// Accumulate a dolly from a wheel tick. Negative delta zooms in.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if wheel_delta < 0.0 {
            self.scale *= step;
        } else if wheel_delta > 0.0 {
            self.scale /= step;
        }
    }

    /// Accumulate a pan from a pointer drag of `delta` pixels, moving the
    /// target in the camera's view plane.
    pub fn pan(&mut self, delta: Vec2, camera: &Camera3D) {
        if camera.viewport.y <= 0.0 {
            return;
        }
        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        let target_distance = (camera.position - self.target).length() * (camera.fov_y * 0.5).tan();
        let per_pixel = 2.0 * target_distance * self.pan_speed / camera.viewport.y;
        self.pan_offset += -right * (delta.x * per_pixel) + up * (delta.y * per_pixel);
    }

    /// Whether any delta is still pending.
    pub fn is_idle(&self) -> bool {
        self.spherical_delta.length_squared() < 1e-12
            && (self.scale - 1.0).abs() < 1e-6
            && self.pan_offset.length_squared() < 1e-12
    }

    /// Apply pending deltas to the camera and re-aim it at the target.
    pub fn update(&mut self, camera: &mut Camera3D) {
        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, std::f32::consts::FRAC_PI_2)
        };

        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };
        theta += self.spherical_delta.x * factor;
        phi += self.spherical_delta.y * factor;
        phi = phi.clamp(POLAR_EPS, std::f32::consts::PI - POLAR_EPS);
        self.target += self.pan_offset * factor;

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.set_pose(self.target + offset, self.target);

        if self.enable_damping {
            self.spherical_delta *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera3D {
        let mut cam = Camera3D::new(75.0, 800.0, 600.0, 0.1, 1000.0);
        cam.set_pose(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
        cam
    }

    #[test]
    fn idle_update_keeps_pose() {
        let mut cam = camera();
        let mut controls = OrbitControls::new();
        controls.update(&mut cam);
        assert!((cam.position - Vec3::new(0.0, 0.0, 20.0)).length() < 1e-4);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn rotation_keeps_distance_and_decays() {
        let mut cam = camera();
        let mut controls = OrbitControls::new();
        controls.rotate(Vec2::new(120.0, 0.0), 600.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 20.0).abs() < 1e-3);
        assert!(cam.position.x.abs() > 1e-3, "camera should have swung sideways");
        for _ in 0..600 {
            controls.update(&mut cam);
        }
        assert!(controls.is_idle());
    }

    #[test]
    fn zoom_in_shrinks_radius_without_damping() {
        let mut cam = camera();
        let mut controls = OrbitControls::new();
        controls.enable_damping = false;
        controls.zoom(-1.0);
        controls.update(&mut cam);
        let expected = 20.0 * 0.95_f32.powf(1.2);
        assert!((cam.position.length() - expected).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_target_sideways() {
        let mut cam = camera();
        let mut controls = OrbitControls::new();
        controls.enable_damping = false;
        controls.pan(Vec2::new(100.0, 0.0), &cam);
        controls.update(&mut cam);
        // Dragging right moves the target left
        assert!(controls.target.x < 0.0);
        assert!((cam.position - controls.target - Vec3::new(0.0, 0.0, 20.0)).length() < 1e-3);
    }
}
