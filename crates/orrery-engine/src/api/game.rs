use serde::{Deserialize, Serialize};
use crate::api::types::{GameEvent, NodeId};
use crate::core::scene::Scene;
use crate::core::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::controls::OrbitControls;

/// Configuration for the engine, provided by the game.
///
/// Every field has a default, so a JSON override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Initial viewport width in pixels.
    pub viewport_width: f32,
    /// Initial viewport height in pixels.
    pub viewport_height: f32,
    /// Vertical field of view in degrees (default: 75).
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Maximum number of render instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            max_instances: 64,
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// Parse a config, filling omitted fields from the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the scene and transform graph.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One frame: consume input, move things, re-propagate transforms.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: Camera3D,
    pub controls: OrbitControls,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create a context whose camera matches the config's viewport and lens.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            camera: Camera3D::new(
                config.fov_y_degrees,
                config.viewport_width,
                config.viewport_height,
                config.near,
                config.far,
            ),
            controls: OrbitControls::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_eq!(a, NodeId(1));
        assert_eq!(b, NodeId(2));
    }

    #[test]
    fn events_cleared_per_frame() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1.0, 2.0));
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn config_json_overrides_only_given_fields() {
        let config = GameConfig::from_json(r#"{ "fov_y_degrees": 60.0, "max_instances": 16 }"#)
            .expect("valid config");
        assert_eq!(config.fov_y_degrees, 60.0);
        assert_eq!(config.max_instances, 16);
        assert_eq!(config.far, 1000.0);
        assert_eq!(config.viewport_width, 1280.0);
    }

    #[test]
    fn config_json_rejects_wrong_types() {
        assert!(GameConfig::from_json(r#"{ "near": "close" }"#).is_err());
    }

    #[test]
    fn context_camera_follows_config() {
        let config = GameConfig { viewport_width: 400.0, viewport_height: 200.0, ..Default::default() };
        let ctx = EngineContext::with_config(&config);
        assert_eq!(ctx.camera.aspect(), 2.0);
        assert!((ctx.camera.fov_y - 75f32.to_radians()).abs() < 1e-6);
    }
}
