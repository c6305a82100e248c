pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{NodeId, GameEvent};
pub use components::node::{Node, Collider};
pub use crate::core::scene::Scene;
pub use crate::core::transform::{TransformGraph, LocalTransform};
pub use crate::core::picking::{Ray, RayPicker, NearestHitPicker};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::controls::OrbitControls;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use bridge::protocol::{FrameData, ProtocolLayout};
pub use systems::render::build_render_buffer;
