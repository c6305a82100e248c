/// Per-frame orbital motion: phase advance, stylized ellipse, self-rotation.
///
/// The phase is stored and stepped in the same unit it is wrapped against
/// (360 per turn) and fed to the trig functions unconverted, so one "turn"
/// of the wrap is not one geometric revolution. Positions are offsets from
/// the parent's origin; composing them into world space is the transform
/// graph's job.

use glam::Vec3;

/// Wrap point for the stored phase.
pub const FULL_TURN: f64 = 360.0;

/// Orbital-plane rotation applied when a body has no explicit tilt.
pub const DEFAULT_PLANE_TILT: f64 = 1.0;

/// Orbital and spin state of one body or satellite.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    /// Radius of the unperturbed circle around the parent.
    pub distance: f64,
    /// Current phase, kept in `[0, 360)`.
    pub angle: f64,
    /// Phase increment per frame.
    pub angular_step: f64,
    /// Self-rotation increment per frame (radians).
    pub spin_step: f64,
    /// Rotation of the path within the orbital plane.
    pub tilt: Option<f64>,
    /// Additive x distortion factor. Approximates an ellipse; not a Kepler orbit.
    pub eccentricity: Option<f64>,
    /// Offset from the parent, written by `advance`.
    pub position: Vec3,
    /// Accumulated self-rotation (radians), unbounded.
    pub spin: f64,
}

impl Orbit {
    /// A circular orbit starting at phase 0. Until the first advance the
    /// body sits on the parent's -X axis at `distance`.
    pub fn new(distance: f64, angular_step: f64) -> Self {
        Self {
            distance,
            angle: 0.0,
            angular_step,
            spin_step: 0.0,
            tilt: None,
            eccentricity: None,
            position: Vec3::new(-distance as f32, 0.0, 0.0),
            spin: 0.0,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_spin_step(mut self, spin_step: f64) -> Self {
        self.spin_step = spin_step;
        self
    }

    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = Some(tilt);
        self
    }

    pub fn with_eccentricity(mut self, eccentricity: f64) -> Self {
        self.eccentricity = Some(eccentricity);
        self
    }

    /// Plane offset (x, z) for a given phase.
    pub fn offset_at(&self, angle: f64) -> (f64, f64) {
        let x = self.distance * angle.cos();
        let z = self.distance * angle.sin();

        let (sin_t, cos_t) = self.tilt.unwrap_or(DEFAULT_PLANE_TILT).sin_cos();
        let x_rot = x * cos_t - z * sin_t;
        let z_rot = x * sin_t + z * cos_t;

        let x_ecc = x_rot + self.eccentricity.map_or(0.0, |e| x * e);
        (x_ecc, z_rot)
    }

    /// One frame of motion. The position comes from the phase before the
    /// increment; y is left untouched.
    pub fn advance(&mut self) {
        let (x, z) = self.offset_at(self.angle);
        self.position.x = x as f32;
        self.position.z = z as f32;

        self.spin += self.spin_step;

        self.angle += self.angular_step;
        if self.angle >= FULL_TURN {
            self.angle -= FULL_TURN;
        }
    }
}
