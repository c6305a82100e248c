/// Info-panel text and the sinks the host implements to show it.

use std::fmt;

use crate::registry::{BodyId, Descriptor};

/// Receives the current selection; `None` clears the panel.
pub trait InfoPanel {
    fn render(&mut self, selection: Option<(BodyId, &Descriptor)>);
}

/// Notified every time the pause flag flips.
pub trait PauseIndicator {
    fn toggled(&mut self, paused: bool);
}

/// Rotation periods above this are shown in years.
const DAYS_PER_YEAR: f64 = 365.0;

/// Descriptor laid out as panel lines.
pub struct InfoCard<'a>(pub &'a Descriptor);

impl InfoCard<'_> {
    pub fn lines(&self) -> Vec<String> {
        let d = self.0;
        let mut lines = vec![d.name.clone()];
        if d.distance_to_primary > 0.0 {
            lines.push(format!("Distance to the sun: {} AU", d.distance_to_primary));
        }
        lines.push(format!("Diameter: {} km", d.diameter));
        lines.push(format!("Weight: {}", d.mass));
        if d.rotation_period > 0.0 {
            lines.push(format!("Rotation period: {}", rotation_period(d.rotation_period)));
        }
        if d.atmosphere_pressure > 0.0 {
            lines.push(format!("Atmosphere pressure: {} bar", d.atmosphere_pressure));
        }
        lines
    }
}

impl fmt::Display for InfoCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

fn rotation_period(days: f64) -> String {
    if days <= DAYS_PER_YEAR {
        format!("{days} days")
    } else {
        let years = (days / DAYS_PER_YEAR * 1000.0).round() / 1000.0;
        format!("{years} years")
    }
}
