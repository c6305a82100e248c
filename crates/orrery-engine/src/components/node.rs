use glam::Vec3;
use crate::api::types::NodeId;

/// Shape used by ray picking, in the node's local units (scaled by the
/// node's world scale at pick time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Sphere centered on the node.
    Sphere { radius: f32 },
    /// Flat annulus lying in the node's local XZ plane.
    Ring { inner: f32, outer: f32 },
}

/// A renderable node: one per body, satellite or decoration overlay.
///
/// `pos`, `spin` and `scale` are world-space values written by
/// `TransformGraph::propagate`; game code edits local transforms instead.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Invisible nodes are neither rendered nor picked.
    pub visible: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Rotation about the world +Y axis, in radians.
    pub spin: f32,
    /// World-space scale.
    pub scale: Vec3,
    /// Pick shape (nodes without one are never picked).
    pub collider: Option<Collider>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec3::ZERO,
            spin: 0.0,
            scale: Vec3::ONE,
            collider: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Largest world scale component; colliders scale uniformly by it.
    pub fn max_scale(&self) -> f32 {
        self.scale.max_element()
    }
}
