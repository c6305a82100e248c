/// Star system orrery: bodies orbit and spin each frame, a click locks the
/// camera onto a body and fills the info panel, Space pauses the motion.

use orrery_engine::{EngineContext, Game, GameConfig, GameEvent, InputQueue};

use crate::driver::{FrameDriver, SimulationState};
use crate::panel::{InfoCard, InfoPanel, PauseIndicator};
use crate::registry::{BodyId, Descriptor};
use crate::setup;

/// Engine overrides: lens and buffer capacities sized for the catalog.
const CONFIG_JSON: &str = include_str!("../data/config.json");

// ── Game event kinds to the host page ────────────────────────────────

/// a = selected body id, or -1 when the selection is cleared.
pub const EVENT_SELECTION: f32 = 1.0;
/// a = 1 when paused, 0 when running.
pub const EVENT_PAUSE: f32 = 2.0;

/// Collects panel text and outbound events during input handling.
#[derive(Debug, Default)]
struct Outbox {
    events: Vec<GameEvent>,
    panel: Vec<String>,
}

impl InfoPanel for Outbox {
    fn render(&mut self, selection: Option<(BodyId, &Descriptor)>) {
        match selection {
            Some((id, descriptor)) => {
                self.panel = InfoCard(descriptor).lines();
                self.events.push(GameEvent::new(EVENT_SELECTION, id.0 as f32));
            }
            None => {
                self.panel.clear();
                self.events.push(GameEvent::new(EVENT_SELECTION, -1.0));
            }
        }
    }
}

impl PauseIndicator for Outbox {
    fn toggled(&mut self, paused: bool) {
        self.events.push(GameEvent::new(EVENT_PAUSE, if paused { 1.0 } else { 0.0 }));
    }
}

pub struct SolarSystem {
    state: SimulationState,
    driver: Option<FrameDriver>,
    outbox: Outbox,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            state: SimulationState::default(),
            driver: None,
            outbox: Outbox::default(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current info-panel lines; empty when nothing is followed.
    pub fn panel_lines(&self) -> &[String] {
        &self.outbox.panel
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig::from_json(CONFIG_JSON).unwrap_or_else(|err| {
            log::warn!("config.json unreadable ({err}), using engine defaults");
            GameConfig::default()
        })
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        match setup::build(ctx) {
            Ok(driver) => self.driver = Some(driver),
            Err(err) => {
                log::error!("star system setup failed: {err}");
                panic!("star system setup failed: {err}");
            }
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(driver) = self.driver.as_mut() else { return };

        driver.handle_input(&mut self.state, ctx, input, &mut self.outbox);
        driver.step(&self.state, ctx);

        for event in self.outbox.events.drain(..) {
            ctx.emit_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::KEY_PAUSE;
    use glam::{Mat4, Vec2, Vec3};
    use orrery_engine::{InputEvent, PointerButton};

    fn started() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::with_config(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn screen_of(ctx: &EngineContext, world: Vec3) -> Vec2 {
        let m = Mat4::from_cols_array_2d(&ctx.camera.uniform().view_projection);
        let ndc = m.project_point3(world);
        let vp = ctx.camera.viewport;
        Vec2::new((ndc.x + 1.0) * 0.5 * vp.x, (1.0 - ndc.y) * 0.5 * vp.y)
    }

    #[test]
    fn update_before_init_does_nothing() {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::new();
        game.update(&mut ctx, &InputQueue::new());
        assert!(ctx.events.is_empty());
        assert!(ctx.scene.is_empty());
    }

    #[test]
    fn space_emits_pause_events() {
        let (mut game, mut ctx) = started();
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code: KEY_PAUSE });
        game.update(&mut ctx, &input);
        assert!(game.state().paused);
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_PAUSE, 1.0)]);

        ctx.clear_frame_data();
        game.update(&mut ctx, &input);
        assert!(!game.state().paused);
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_PAUSE, 0.0)]);
    }

    #[test]
    fn click_then_clear_updates_panel_and_events() {
        let (mut game, mut ctx) = started();
        let sun = ctx.scene.find_by_tag("sun").unwrap().pos;

        let at = screen_of(&ctx, sun);
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: at.x, y: at.y, button: PointerButton::Primary });
        input.push(InputEvent::PointerUp { x: at.x, y: at.y });
        game.update(&mut ctx, &input);

        assert_eq!(game.panel_lines()[0], "Sun");
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_SELECTION, 0.0)]);

        // Top-left corner of the view sees empty space
        ctx.clear_frame_data();
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: 1.0, y: 1.0, button: PointerButton::Primary });
        input.push(InputEvent::PointerUp { x: 1.0, y: 1.0 });
        game.update(&mut ctx, &input);

        assert!(game.panel_lines().is_empty());
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_SELECTION, -1.0)]);
    }

    #[test]
    fn embedded_config_fits_every_node() {
        let game = SolarSystem::new();
        let config = game.config();
        assert_ne!(config, GameConfig::default());
        assert_eq!(config.max_instances, 32);
        assert_eq!(config.max_events, 16);
        // Viewport keys are omitted, so they keep the engine defaults
        assert_eq!(config.viewport_width, GameConfig::default().viewport_width);

        let (_, ctx) = started();
        assert!(ctx.scene.len() <= config.max_instances);
    }

    #[test]
    fn bodies_move_between_frames() {
        let (mut game, mut ctx) = started();
        let before = ctx.scene.find_by_tag("mercury").unwrap().pos;
        game.update(&mut ctx, &InputQueue::new());
        let after = ctx.scene.find_by_tag("mercury").unwrap().pos;
        assert_ne!(before, after);
        assert!((after.y).abs() < 1e-6);
    }
}
