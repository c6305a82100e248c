use crate::core::scene::Scene;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Rebuild the render buffer from the scene, one instance per visible node,
/// in scene order.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) {
    buffer.clear();
    for node in scene.iter() {
        if !node.visible {
            continue;
        }
        buffer.push(RenderInstance::new(node.id, node.pos, node.spin, node.scale));
    }
}
