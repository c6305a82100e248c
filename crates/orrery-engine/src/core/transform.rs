// core/transform.rs
//
// Transform hierarchy. Tracks parent-child relationships by NodeId and
// composes local offsets into world transforms on the Scene.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(planet, LocalTransform::new().with_offset(offset));
//   graph.set_parent(moon, Some(planet));
//   graph.propagate(&mut scene);  // Updates world pos/spin/scale

use std::collections::HashMap;
use glam::{Quat, Vec3};
use crate::api::types::NodeId;
use crate::core::scene::Scene;

/// Local transform data for nodes in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub offset: Vec3,
    /// Rotation about +Y relative to parent, in radians.
    pub spin: f32,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            spin: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }
}

/// Node in the transform hierarchy.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalTransform,
}

/// Parent-child relationships between nodes.
///
/// Exists separately from Scene so the scene stays a flat store.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<NodeId, TransformNode>,
    /// Nodes with no parent (top-level), in registration order.
    roots: Vec<NodeId>,
    /// Dirty flag, set when hierarchy or locals change, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with a specific local transform.
    pub fn register_with(&mut self, id: NodeId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        if parent == Some(child) {
            log::warn!("transform: refusing to parent {:?} to itself", child);
            return;
        }
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
        }

        // Remove from old parent's children
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Get the local transform for a node.
    pub fn get_local(&self, id: NodeId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    /// Get the local transform mutably. Marks the graph dirty.
    pub fn get_local_mut(&mut self, id: NodeId) -> Option<&mut LocalTransform> {
        self.dirty = true;
        self.nodes.get_mut(&id).map(|n| &mut n.local)
    }

    /// Get the parent of a node.
    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Get the children of a node.
    pub fn get_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Propagate transforms from roots down through the hierarchy.
    /// Updates Node.pos/spin/scale from the composed parent transforms.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        for &root in &self.roots {
            self.propagate_recursive(root, Vec3::ZERO, 0.0, Vec3::ONE, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(
        &self,
        id: NodeId,
        parent_pos: Vec3,
        parent_spin: f32,
        parent_scale: Vec3,
        scene: &mut Scene,
    ) {
        let Some(node) = self.nodes.get(&id) else { return };
        let local = &node.local;

        // Scale the offset into the parent's frame, then rotate by its spin
        let rotated_offset = Quat::from_rotation_y(parent_spin) * (local.offset * parent_scale);
        let world_pos = parent_pos + rotated_offset;
        let world_spin = parent_spin + local.spin;
        let world_scale = parent_scale * local.scale;

        if let Some(scene_node) = scene.get_mut(id) {
            scene_node.pos = world_pos;
            scene_node.spin = world_spin;
            scene_node.scale = world_scale;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world_pos, world_spin, world_scale, scene);
        }
    }

    /// Check if the hierarchy has pending changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of nodes in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = NodeId(1);
        let child = NodeId(2);

        graph.register_with(parent, LocalTransform::new());
        graph.register_with(child, LocalTransform::new());
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(!graph.roots.contains(&child));
    }

    #[test]
    fn propagate_composes_offset_scale_and_spin() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();

        let parent = NodeId(1);
        let child = NodeId(2);
        scene.spawn(Node::new(parent));
        scene.spawn(Node::new(child));

        graph.register_with(
            parent,
            LocalTransform::new()
                .with_offset(Vec3::new(10.0, 0.0, 0.0))
                .with_uniform_scale(0.5)
                .with_spin(std::f32::consts::FRAC_PI_2),
        );
        graph.register_with(child, LocalTransform::new().with_offset(Vec3::new(4.0, 0.0, 0.0)));
        graph.set_parent(child, Some(parent));

        graph.propagate(&mut scene);

        // (4,0,0) scaled by 0.5 -> (2,0,0), rotated +90° about Y -> (0,0,-2)
        let child_node = scene.get(child).unwrap();
        assert!(approx(child_node.pos, Vec3::new(10.0, 0.0, -2.0)), "pos = {:?}", child_node.pos);
        assert!(approx(child_node.scale, Vec3::splat(0.5)));
        assert!((child_node.spin - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(!graph.is_dirty());
    }

    #[test]
    fn moving_parent_moves_child_world_position_only() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = NodeId(1);
        let child = NodeId(2);
        scene.spawn(Node::new(parent));
        scene.spawn(Node::new(child));
        graph.register_with(parent, LocalTransform::new());
        graph.register_with(child, LocalTransform::new().with_offset(Vec3::X));
        graph.set_parent(child, Some(parent));
        graph.propagate(&mut scene);

        graph.get_local_mut(parent).unwrap().offset = Vec3::new(0.0, 0.0, 5.0);
        graph.propagate(&mut scene);

        assert!(approx(scene.get(child).unwrap().pos, Vec3::new(1.0, 0.0, 5.0)));
        assert_eq!(graph.get_local(child).unwrap().offset, Vec3::X);
    }
}
