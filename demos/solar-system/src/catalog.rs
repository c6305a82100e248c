/// The fixed startup catalog, embedded as JSON and validated on load.

use serde::Deserialize;

use crate::orbit::{Orbit, FULL_TURN};
use crate::registry::Descriptor;

const CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// Orbital parameters as written in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OrbitEntry {
    pub distance: f64,
    #[serde(default)]
    pub angle: f64,
    pub angular_step: f64,
    #[serde(default)]
    pub spin_step: f64,
    #[serde(default)]
    pub tilt: Option<f64>,
    #[serde(default)]
    pub eccentricity: Option<f64>,
}

impl OrbitEntry {
    pub fn to_orbit(&self) -> Orbit {
        let mut orbit = Orbit::new(self.distance, self.angular_step)
            .with_angle(self.angle)
            .with_spin_step(self.spin_step);
        orbit.tilt = self.tilt;
        orbit.eccentricity = self.eccentricity;
        orbit
    }
}

/// Decoration attached to a body. Picking one resolves to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayEntry {
    /// Cloud shell slightly larger than the body, spinning on its own.
    Clouds { scale: f32, spin_step: f64 },
    /// Flat ring in the body's equatorial plane, radii in body units.
    Ring { inner: f32, outer: f32 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct BodyEntry {
    /// Scene tag for the body's node.
    pub tag: String,
    /// Render scale relative to the parent frame.
    pub scale: f32,
    /// Absent only for the primary.
    #[serde(default)]
    pub orbit: Option<OrbitEntry>,
    #[serde(default)]
    pub overlays: Vec<OverlayEntry>,
    #[serde(default)]
    pub satellites: Vec<BodyEntry>,
    pub descriptor: Descriptor,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog needs exactly one primary, found {0}")]
    PrimaryCount(usize),
    #[error("{0}: only top-level bodies may omit an orbit")]
    MissingOrbit(String),
    #[error("{0}: satellites cannot have satellites")]
    NestedSatellite(String),
    #[error("{name}: eccentricity {value} outside [0, 1)")]
    Eccentricity { name: String, value: f64 },
    #[error("{name}: angular step {value} outside (0, 360)")]
    AngularStep { name: String, value: f64 },
    #[error("{name}: negative distance {value}")]
    Distance { name: String, value: f64 },
    #[error("{name}: scale {value} must be positive")]
    Scale { name: String, value: f32 },
    #[error("{name}: ring radii {inner}..{outer} are not increasing")]
    Ring { name: String, inner: f32, outer: f32 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Top-level bodies in canonical order.
    pub bodies: Vec<BodyEntry>,
}

impl Catalog {
    /// Load the embedded catalog.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let primaries = self.bodies.iter().filter(|b| b.orbit.is_none()).count();
        if primaries != 1 {
            return Err(CatalogError::PrimaryCount(primaries));
        }
        for body in &self.bodies {
            validate_body(body)?;
            for satellite in &body.satellites {
                if !satellite.satellites.is_empty() {
                    return Err(CatalogError::NestedSatellite(satellite.descriptor.name.clone()));
                }
                if satellite.orbit.is_none() {
                    return Err(CatalogError::MissingOrbit(satellite.descriptor.name.clone()));
                }
                validate_body(satellite)?;
            }
        }
        Ok(())
    }

    /// Total body count, satellites included.
    pub fn body_count(&self) -> usize {
        self.bodies.iter().map(|b| 1 + b.satellites.len()).sum()
    }
}

fn validate_body(body: &BodyEntry) -> Result<(), CatalogError> {
    let name = || body.descriptor.name.clone();

    if body.scale <= 0.0 {
        return Err(CatalogError::Scale { name: name(), value: body.scale });
    }
    if let Some(orbit) = &body.orbit {
        if orbit.distance < 0.0 {
            return Err(CatalogError::Distance { name: name(), value: orbit.distance });
        }
        if !(orbit.angular_step > 0.0 && orbit.angular_step < FULL_TURN) {
            return Err(CatalogError::AngularStep { name: name(), value: orbit.angular_step });
        }
        if let Some(e) = orbit.eccentricity {
            if !(0.0..1.0).contains(&e) {
                return Err(CatalogError::Eccentricity { name: name(), value: e });
            }
        }
    }
    for overlay in &body.overlays {
        match *overlay {
            OverlayEntry::Clouds { scale, .. } if scale <= 0.0 => {
                return Err(CatalogError::Scale { name: name(), value: scale });
            }
            OverlayEntry::Ring { inner, outer } if !(inner >= 0.0 && inner < outer) => {
                return Err(CatalogError::Ring { name: name(), inner, outer });
            }
            _ => {}
        }
    }
    Ok(())
}
