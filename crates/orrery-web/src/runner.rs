use orrery_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, RenderBuffer,
    CameraUniform, FrameData, ProtocolLayout,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    camera_uniform: CameraUniform,
    config: GameConfig,
    layout: ProtocolLayout,
    /// Frame buffer laid out per `layout`, rewritten after every tick.
    shared: Vec<f32>,
    initialized: bool,
    frame: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let shared = layout.allocate();

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            camera_uniform: CameraUniform::default(),
            layout,
            shared,
            config,
            initialized: false,
            frame: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.graph.propagate(&mut self.ctx.scene);
        build_render_buffer(&self.ctx.scene, &mut self.render_buffer);
        self.camera_uniform = self.ctx.camera.uniform();
        self.publish();
        self.initialized = true;
        log::debug!("runner: {} nodes after init", self.ctx.scene.len());
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: update the game once, then rebuild the render data.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        // Viewport changes apply before the game sees any pointer event
        for event in self.input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                self.ctx.camera.resize(width, height);
            }
        }

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "runner: {} events exceed capacity {}, truncating",
                self.ctx.events.len(),
                self.layout.max_events
            );
            self.ctx.events.truncate(self.layout.max_events);
        }

        build_render_buffer(&self.ctx.scene, &mut self.render_buffer);
        if self.render_buffer.instances.len() > self.layout.max_instances {
            log::warn!("runner: render buffer exceeds {} instances", self.layout.max_instances);
            self.render_buffer.instances.truncate(self.layout.max_instances);
        }
        self.camera_uniform = self.ctx.camera.uniform();
        self.frame += 1;
        self.publish();
    }

    fn publish(&mut self) {
        self.layout.write_frame(&mut self.shared, &FrameData {
            frame: self.frame,
            viewport: self.ctx.camera.viewport,
            instances: &self.render_buffer.instances,
            events: &self.ctx.events,
            camera: &self.camera_uniform,
        });
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    // ---- Pointer accessors for the host page ----

    /// Whole frame buffer: header, instances, events, camera.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.shared.as_ptr()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.shared
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_uniform.view_projection.as_ptr() as *const f32
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.camera.viewport.x
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.camera.viewport.y
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
