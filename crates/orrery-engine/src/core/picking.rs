//! Ray casting against scene nodes.
//!
//! The picker answers one question: which node does a ray from the camera
//! through a screen point hit first? Callers decide what a hit means.

use glam::{Vec2, Vec3};
use crate::api::types::NodeId;
use crate::components::node::{Collider, Node};
use crate::core::scene::Scene;
use crate::renderer::camera::Camera3D;

/// Half-line in world space. `dir` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or(Vec3::NEG_Z),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Distance along the ray to the first sphere surface hit, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_d = disc.sqrt();
        let near = -b - sqrt_d;
        if near > 0.0 {
            return Some(near);
        }
        // Origin inside the sphere: report the exit point
        let far = -b + sqrt_d;
        (far > 0.0).then_some(far)
    }

    /// Distance to a flat annulus in the horizontal plane through `center`.
    pub fn intersect_ring(&self, center: Vec3, inner: f32, outer: f32) -> Option<f32> {
        if self.dir.y.abs() < 1e-6 {
            return None;
        }
        let t = (center.y - self.origin.y) / self.dir.y;
        if t <= 0.0 {
            return None;
        }
        let hit = self.at(t);
        let r = Vec2::new(hit.x - center.x, hit.z - center.z).length();
        (r >= inner && r <= outer).then_some(t)
    }

    /// Intersect a node's collider, scaled by the node's world scale.
    pub fn intersect_node(&self, node: &Node) -> Option<f32> {
        let scale = node.max_scale();
        match node.collider? {
            Collider::Sphere { radius } => self.intersect_sphere(node.pos, radius * scale),
            Collider::Ring { inner, outer } => {
                self.intersect_ring(node.pos, inner * scale, outer * scale)
            }
        }
    }
}

/// Ray-intersection service: "cast a ray from the camera through this
/// screen point and return the nearest intersected node, or none".
pub trait RayPicker {
    fn pick(&self, scene: &Scene, camera: &Camera3D, ndc: Vec2) -> Option<NodeId>;
}

/// Brute-force picker: tests every visible node with a collider.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestHitPicker;

impl RayPicker for NearestHitPicker {
    fn pick(&self, scene: &Scene, camera: &Camera3D, ndc: Vec2) -> Option<NodeId> {
        let ray = camera.ray_from_ndc(ndc);
        scene
            .iter()
            .filter(|node| node.visible)
            .filter_map(|node| ray.intersect_node(node).map(|t| (node.id, t)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }
}
