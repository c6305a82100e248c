use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::api::types::NodeId;

/// Per-node render data copied into the shared frame buffer.
/// 8 floats = 32 bytes stride, matching `INSTANCE_FLOATS`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct RenderInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation about the node's Y axis in radians.
    pub spin: f32,
    pub sx: f32,
    pub sy: f32,
    pub sz: f32,
    /// Node id as a float, so the renderer can match meshes to nodes.
    pub node: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(node: NodeId, pos: Vec3, spin: f32, scale: Vec3) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            spin,
            sx: scale.x,
            sy: scale.y,
            sz: scale.z,
            node: node.0 as f32,
        }
    }
}

/// Render buffer holding one instance per visible node.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to the instance array.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
