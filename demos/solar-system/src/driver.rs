/// Frame Driver: drains input into the follow/pause state, then steps the
/// camera and, unless paused, every body in registry order.

use glam::Vec2;
use orrery_engine::{
    EngineContext, InputEvent, InputQueue, NearestHitPicker, NodeId, PointerButton, RayPicker,
    TransformGraph,
};

use crate::follow::{apply_follow, apply_reset, FollowState, PickOutcome};
use crate::panel::{InfoPanel, PauseIndicator};
use crate::registry::{Body, BodyId, BodyRegistry};

/// Self-rotation of the primary per unpaused frame.
pub const PRIMARY_SPIN_STEP: f64 = 0.001;
/// Pointer travel (px) beyond which a press becomes a drag instead of a click.
pub const DRAG_THRESHOLD: f32 = 5.0;
/// Space bar toggles pause.
pub const KEY_PAUSE: u32 = 32;

/// Mutable state shared by input handling and the frame step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationState {
    pub paused: bool,
    pub follow: FollowState,
}

impl SimulationState {
    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

/// A decoration node that spins independently of its owner (cloud shells).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinningOverlay {
    pub node: NodeId,
    pub spin_step: f64,
    pub spin: f64,
}

impl SpinningOverlay {
    pub fn new(node: NodeId, spin_step: f64) -> Self {
        Self { node, spin_step, spin: 0.0 }
    }
}

/// Press/drag tracking for distinguishing clicks from camera drags.
/// Primary drags rotate, secondary drags pan; only a primary press picks.
#[derive(Debug, Default)]
struct Gesture {
    press: Option<Vec2>,
    button: PointerButton,
    last: Vec2,
    dragging: bool,
}

pub struct FrameDriver<P: RayPicker = NearestHitPicker> {
    registry: BodyRegistry,
    overlays: Vec<SpinningOverlay>,
    primary_spin: f64,
    gesture: Gesture,
    picker: P,
}

impl FrameDriver<NearestHitPicker> {
    pub fn new(registry: BodyRegistry, overlays: Vec<SpinningOverlay>) -> Self {
        Self::with_picker(registry, overlays, NearestHitPicker)
    }
}

impl<P: RayPicker> FrameDriver<P> {
    pub fn with_picker(registry: BodyRegistry, overlays: Vec<SpinningOverlay>, picker: P) -> Self {
        Self {
            registry,
            overlays,
            primary_spin: 0.0,
            gesture: Gesture::default(),
            picker,
        }
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    /// Handle this frame's input in arrival order.
    pub fn handle_input<S: InfoPanel + PauseIndicator>(
        &mut self,
        state: &mut SimulationState,
        ctx: &mut EngineContext,
        input: &InputQueue,
        sink: &mut S,
    ) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y, button } => {
                    let at = Vec2::new(x, y);
                    self.gesture = Gesture { press: Some(at), button, last: at, dragging: false };
                }
                InputEvent::PointerMove { x, y } => {
                    let Some(start) = self.gesture.press else { continue };
                    let at = Vec2::new(x, y);
                    if !self.gesture.dragging && at.distance(start) > DRAG_THRESHOLD {
                        self.gesture.dragging = true;
                    }
                    if self.gesture.dragging {
                        let delta = at - self.gesture.last;
                        match self.gesture.button {
                            PointerButton::Primary => ctx.controls.rotate(delta, ctx.camera.viewport.y),
                            PointerButton::Secondary => ctx.controls.pan(delta, &ctx.camera),
                        }
                    }
                    self.gesture.last = at;
                }
                InputEvent::PointerUp { x, y } => {
                    let was_click = self.gesture.press.is_some()
                        && !self.gesture.dragging
                        && self.gesture.button == PointerButton::Primary;
                    self.gesture = Gesture::default();
                    if was_click {
                        self.click(state, ctx, Vec2::new(x, y), sink);
                    }
                }
                InputEvent::Wheel { delta } => ctx.controls.zoom(delta),
                InputEvent::KeyDown { key_code: KEY_PAUSE } => {
                    let paused = state.toggle_pause();
                    log::info!("simulation {}", if paused { "paused" } else { "resumed" });
                    sink.toggled(paused);
                }
                _ => {}
            }
        }
    }

    /// Resolve a click at a screen position and update the follow state.
    pub fn click<S: InfoPanel>(
        &mut self,
        state: &mut SimulationState,
        ctx: &mut EngineContext,
        screen: Vec2,
        sink: &mut S,
    ) -> PickOutcome {
        let ndc = ctx.camera.screen_to_ndc(screen);
        let hit = self.picker.pick(&ctx.scene, &ctx.camera, ndc).and_then(|node| {
            let body = self.registry.resolve_node(node);
            if body.is_none() {
                log::warn!("picked node {:?} belongs to no body", node);
            }
            body
        });

        let outcome = state.follow.on_pick(hit);
        match outcome {
            PickOutcome::Unchanged => {}
            PickOutcome::Selected(id) => {
                self.follow_camera(id, ctx);
                if let Some(descriptor) = self.registry.lookup(id) {
                    log::debug!("following {}", descriptor.name);
                    sink.render(Some((id, descriptor)));
                }
            }
            PickOutcome::Cleared => {
                log::debug!("follow cleared");
                self.reset_camera(ctx);
                sink.render(None);
            }
        }
        outcome
    }

    /// One frame: camera controls, follow, then (unless paused) motion,
    /// and finally world transform propagation.
    pub fn step(&mut self, state: &SimulationState, ctx: &mut EngineContext) {
        ctx.controls.update(&mut ctx.camera);

        if let Some(id) = state.follow.followed() {
            self.follow_camera(id, ctx);
        }

        if !state.paused {
            self.advance_all(&mut ctx.graph);
        }

        ctx.graph.propagate(&mut ctx.scene);
    }

    /// Put the camera at the reset pose around the primary.
    pub fn reset_camera(&self, ctx: &mut EngineContext) {
        let origin = self
            .registry
            .primary()
            .and_then(|p| ctx.scene.get(p.node))
            .map(|n| n.pos)
            .unwrap_or_default();
        apply_reset(&mut ctx.camera, &mut ctx.controls, origin);
    }

    fn follow_camera(&self, id: BodyId, ctx: &mut EngineContext) {
        let Some(body) = self.registry.body(id) else { return };
        if let Some(node) = ctx.scene.get(body.node) {
            apply_follow(&mut ctx.camera, node);
        }
    }

    fn advance_all(&mut self, graph: &mut TransformGraph) {
        self.primary_spin += PRIMARY_SPIN_STEP;
        if let Some(primary) = self.registry.primary() {
            if let Some(local) = graph.get_local_mut(primary.node) {
                local.spin = self.primary_spin as f32;
            }
        }

        for overlay in &mut self.overlays {
            overlay.spin += overlay.spin_step;
            if let Some(local) = graph.get_local_mut(overlay.node) {
                local.spin = overlay.spin as f32;
            }
        }

        for (body, satellites) in self.registry.iter_mut() {
            advance_body(body, graph);
            for satellite in satellites.iter_mut() {
                advance_body(satellite, graph);
            }
        }
    }
}

fn advance_body(body: &mut Body, graph: &mut TransformGraph) {
    let Some(orbit) = body.orbit.as_mut() else { return };
    orbit.advance();
    if let Some(local) = graph.get_local_mut(body.node) {
        local.offset = orbit.position;
        local.spin = orbit.spin as f32;
    }
}
