/// Body Registry: descriptors, the body/satellite hierarchy and the
/// node-to-body tables used by picking.

use std::collections::HashMap;
use std::fmt;

use orrery_engine::NodeId;
use serde::Deserialize;

use crate::orbit::Orbit;

/// Identifier assigned to each body at registration, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Display metadata for a body. Never used by the simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Descriptor {
    pub name: String,
    /// In AU; 0 for the primary.
    pub distance_to_primary: f64,
    /// In km.
    pub diameter: u64,
    /// Free-form display string.
    pub mass: String,
    /// In days; 0 when unknown.
    pub rotation_period: f64,
    /// In bar; 0 when there is no atmosphere.
    pub atmosphere_pressure: f64,
}

/// A body in the orbit hierarchy. The primary has no orbit and only spins.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub node: NodeId,
    pub orbit: Option<Orbit>,
}

impl Body {
    pub fn new(id: BodyId, node: NodeId, orbit: Option<Orbit>) -> Self {
        Self { id, node, orbit }
    }

    pub fn is_primary(&self) -> bool {
        self.orbit.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("{0} is already registered")]
    DuplicateRegistration(BodyId),
    #[error("node {0:?} is already mapped to a body")]
    DuplicateNode(NodeId),
    #[error("{0} is not registered")]
    UnknownBody(BodyId),
    #[error("{0} has no orbit but {1} is already the primary")]
    SecondPrimary(BodyId, BodyId),
    #[error("satellite {0} has no orbit")]
    StationarySatellite(BodyId),
}

/// A top-level body together with the satellites it owns.
#[derive(Debug, Clone)]
struct Entry {
    body: Body,
    satellites: Vec<Body>,
}

/// Registry of bodies and their descriptors.
///
/// Iteration order is canonical for the frame loop: primary first, then
/// top-level bodies in registration order, each followed by its satellites.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    entries: Vec<Entry>,
    descriptors: HashMap<BodyId, Descriptor>,
    /// Body nodes and decoration overlays, both mapped to the owning body.
    by_node: HashMap<NodeId, BodyId>,
    primary: Option<BodyId>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level body. A body without an orbit becomes the primary.
    pub fn register(&mut self, body: Body, descriptor: Descriptor) -> Result<(), RegistryError> {
        self.check_new(&body)?;
        if body.is_primary() {
            if let Some(existing) = self.primary {
                return Err(RegistryError::SecondPrimary(body.id, existing));
            }
            self.primary = Some(body.id);
        }

        self.index(&body, descriptor);
        let entry = Entry { body, satellites: Vec::new() };
        if entry.body.is_primary() {
            self.entries.insert(0, entry);
        } else {
            self.entries.push(entry);
        }
        Ok(())
    }

    /// Register a satellite of an already registered top-level body.
    pub fn register_satellite(
        &mut self,
        parent: BodyId,
        body: Body,
        descriptor: Descriptor,
    ) -> Result<(), RegistryError> {
        self.check_new(&body)?;
        if body.is_primary() {
            return Err(RegistryError::StationarySatellite(body.id));
        }
        let slot = self
            .entries
            .iter()
            .position(|e| e.body.id == parent)
            .ok_or(RegistryError::UnknownBody(parent))?;

        self.index(&body, descriptor);
        self.entries[slot].satellites.push(body);
        Ok(())
    }

    /// Map a decoration node (clouds, rings) to the body that owns it.
    pub fn register_overlay(&mut self, overlay: NodeId, owner: BodyId) -> Result<(), RegistryError> {
        if !self.descriptors.contains_key(&owner) {
            return Err(RegistryError::UnknownBody(owner));
        }
        if self.by_node.contains_key(&overlay) {
            return Err(RegistryError::DuplicateNode(overlay));
        }
        self.by_node.insert(overlay, owner);
        Ok(())
    }

    pub fn lookup(&self, id: BodyId) -> Option<&Descriptor> {
        self.descriptors.get(&id)
    }

    /// Like `lookup`, for callers that hold an id the registry handed out.
    pub fn descriptor(&self, id: BodyId) -> Result<&Descriptor, RegistryError> {
        self.lookup(id).ok_or(RegistryError::UnknownBody(id))
    }

    /// Body owning a renderable node, either directly or through an overlay.
    pub fn resolve_node(&self, node: NodeId) -> Option<BodyId> {
        self.by_node.get(&node).copied()
    }

    /// `(body, satellites)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Body, &[Body])> {
        self.entries.iter().map(|e| (&e.body, e.satellites.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&mut Body, &mut [Body])> {
        self.entries
            .iter_mut()
            .map(|e| (&mut e.body, e.satellites.as_mut_slice()))
    }

    /// Find any registered body, top-level or satellite.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.iter().find_map(|(body, satellites)| {
            if body.id == id {
                Some(body)
            } else {
                satellites.iter().find(|s| s.id == id)
            }
        })
    }

    pub fn primary(&self) -> Option<&Body> {
        self.primary.and_then(|id| self.body(id))
    }

    /// Number of registered bodies, satellites included.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn check_new(&self, body: &Body) -> Result<(), RegistryError> {
        if self.descriptors.contains_key(&body.id) {
            return Err(RegistryError::DuplicateRegistration(body.id));
        }
        if self.by_node.contains_key(&body.node) {
            return Err(RegistryError::DuplicateNode(body.node));
        }
        Ok(())
    }

    fn index(&mut self, body: &Body, descriptor: Descriptor) {
        self.descriptors.insert(body.id, descriptor);
        self.by_node.insert(body.node, body.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, distance: f64) -> Descriptor {
        Descriptor {
            name: name.into(),
            distance_to_primary: distance,
            diameter: 1000,
            mass: "1 ton".into(),
            rotation_period: 1.0,
            atmosphere_pressure: 0.0,
        }
    }

    fn orbiting(id: u32) -> Body {
        Body::new(BodyId(id), NodeId(id), Some(Orbit::new(1.0, 1.0)))
    }

    fn sample() -> BodyRegistry {
        let mut reg = BodyRegistry::new();
        reg.register(orbiting(1), descriptor("Inner", 0.4)).unwrap();
        reg.register(Body::new(BodyId(0), NodeId(100), None), descriptor("Star", 0.0)).unwrap();
        reg.register(orbiting(2), descriptor("Outer", 1.0)).unwrap();
        reg.register_satellite(BodyId(2), orbiting(3), descriptor("Moonlet", 1.0)).unwrap();
        reg
    }

    #[test]
    fn iteration_is_primary_then_catalog_order() {
        let reg = sample();
        let order: Vec<(u32, Vec<u32>)> = reg
            .iter()
            .map(|(b, sats)| (b.id.0, sats.iter().map(|s| s.id.0).collect()))
            .collect();
        assert_eq!(order, vec![(0, vec![]), (1, vec![]), (2, vec![3])]);
        // Restartable
        assert_eq!(reg.iter().count(), 3);
    }

    #[test]
    fn lookup_and_unknown() {
        let reg = sample();
        assert_eq!(reg.lookup(BodyId(3)).map(|d| d.name.as_str()), Some("Moonlet"));
        assert!(reg.lookup(BodyId(9)).is_none());
        assert_eq!(reg.descriptor(BodyId(9)), Err(RegistryError::UnknownBody(BodyId(9))));
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut reg = sample();
        let again = Body::new(BodyId(1), NodeId(50), Some(Orbit::new(1.0, 1.0)));
        assert_eq!(
            reg.register(again, descriptor("Again", 1.0)),
            Err(RegistryError::DuplicateRegistration(BodyId(1)))
        );
        let same_node = Body::new(BodyId(7), NodeId(1), Some(Orbit::new(1.0, 1.0)));
        assert_eq!(
            reg.register(same_node, descriptor("Clash", 1.0)),
            Err(RegistryError::DuplicateNode(NodeId(1)))
        );
    }

    #[test]
    fn only_one_primary() {
        let mut reg = sample();
        let second = Body::new(BodyId(8), NodeId(8), None);
        assert_eq!(
            reg.register(second, descriptor("Other star", 0.0)),
            Err(RegistryError::SecondPrimary(BodyId(8), BodyId(0)))
        );
        assert_eq!(reg.primary().map(|b| b.id), Some(BodyId(0)));
    }

    #[test]
    fn satellite_needs_known_parent_and_orbit() {
        let mut reg = sample();
        assert_eq!(
            reg.register_satellite(BodyId(42), orbiting(5), descriptor("Lost", 1.0)),
            Err(RegistryError::UnknownBody(BodyId(42)))
        );
        let still = Body::new(BodyId(6), NodeId(6), None);
        assert_eq!(
            reg.register_satellite(BodyId(2), still, descriptor("Still", 1.0)),
            Err(RegistryError::StationarySatellite(BodyId(6)))
        );
    }

    #[test]
    fn overlays_resolve_to_owner() {
        let mut reg = sample();
        reg.register_overlay(NodeId(200), BodyId(2)).unwrap();
        assert_eq!(reg.resolve_node(NodeId(200)), Some(BodyId(2)));
        assert_eq!(reg.resolve_node(NodeId(3)), Some(BodyId(3)));
        assert_eq!(reg.resolve_node(NodeId(999)), None);
        assert_eq!(reg.register_overlay(NodeId(200), BodyId(1)), Err(RegistryError::DuplicateNode(NodeId(200))));
        assert_eq!(reg.register_overlay(NodeId(201), BodyId(77)), Err(RegistryError::UnknownBody(BodyId(77))));
    }

    #[test]
    fn iter_mut_reaches_satellites() {
        let mut reg = sample();
        for (_, sats) in reg.iter_mut() {
            for s in sats.iter_mut() {
                if let Some(orbit) = s.orbit.as_mut() {
                    orbit.advance();
                }
            }
        }
        let moonlet = reg.body(BodyId(3)).and_then(|b| b.orbit.as_ref()).unwrap();
        assert_eq!(moonlet.angle, 1.0);
    }
}
