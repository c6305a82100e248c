/// Shared frame buffer layout.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]
/// [Events: max_events × 4 floats]
/// [Camera: 16 floats, column-major view-projection]
/// ```
///
/// The runner rewrites the whole buffer after every tick. The host reads the
/// capacities from the header to compute offsets.

use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::RenderInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_MAX_INSTANCES: usize = 1;
pub const HEADER_INSTANCE_COUNT: usize = 2;
pub const HEADER_MAX_EVENTS: usize = 3;
pub const HEADER_EVENT_COUNT: usize = 4;
pub const HEADER_VIEWPORT_WIDTH: usize = 5;
pub const HEADER_VIEWPORT_HEIGHT: usize = 6;
pub const HEADER_PROTOCOL_VERSION: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance: x, y, z, spin, sx, sy, sz, node.
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Floats in the camera uniform (one 4×4 matrix).
pub const CAMERA_FLOATS: usize = 16;

/// One frame's worth of data to publish.
pub struct FrameData<'a> {
    pub frame: u64,
    pub viewport: Vec2,
    pub instances: &'a [RenderInstance],
    pub events: &'a [GameEvent],
    pub camera: &'a CameraUniform,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,
    /// Offset (in floats) where the camera matrix begins.
    pub camera_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;
        let camera_data_offset = event_data_offset + event_data_floats;

        let buffer_total_floats = camera_data_offset + CAMERA_FLOATS;

        Self {
            max_instances,
            max_events,
            instance_data_floats,
            event_data_floats,
            instance_data_offset,
            event_data_offset,
            camera_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_events)
    }

    /// A zeroed buffer of the right size with the static header fields set.
    pub fn allocate(&self) -> Vec<f32> {
        let mut buf = vec![0.0; self.buffer_total_floats];
        buf[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        buf[HEADER_MAX_EVENTS] = self.max_events as f32;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf
    }

    /// Write a frame into `buf`. Instances and events beyond capacity are
    /// dropped; stale slots past the written counts are left as they were.
    pub fn write_frame(&self, buf: &mut [f32], data: &FrameData) {
        if buf.len() < self.buffer_total_floats {
            log::error!(
                "protocol: buffer holds {} floats, layout needs {}",
                buf.len(),
                self.buffer_total_floats
            );
            return;
        }

        let instances = &data.instances[..data.instances.len().min(self.max_instances)];
        let events = &data.events[..data.events.len().min(self.max_events)];

        buf[HEADER_FRAME_COUNTER] = data.frame as f32;
        buf[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        buf[HEADER_EVENT_COUNT] = events.len() as f32;
        buf[HEADER_VIEWPORT_WIDTH] = data.viewport.x;
        buf[HEADER_VIEWPORT_HEIGHT] = data.viewport.y;

        let instance_floats: &[f32] = bytemuck::cast_slice(instances);
        buf[self.instance_data_offset..][..instance_floats.len()].copy_from_slice(instance_floats);

        let event_floats: &[f32] = bytemuck::cast_slice(events);
        buf[self.event_data_offset..][..event_floats.len()].copy_from_slice(event_floats);

        let camera_floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(data.camera));
        buf[self.camera_data_offset..][..CAMERA_FLOATS].copy_from_slice(camera_floats);
    }
}
