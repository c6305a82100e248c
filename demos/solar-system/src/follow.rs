/// Click-to-follow: which body the camera is locked onto, and the camera
/// poses for following and resetting.

use glam::Vec3;
use orrery_engine::{Camera3D, Node, OrbitControls};

use crate::registry::BodyId;

/// Camera distance from the primary when nothing is followed.
pub const RESET_DISTANCE: f32 = 20.0;
/// Extra gap beyond the body's scale when following it.
pub const FOLLOW_MARGIN: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowState {
    #[default]
    Idle,
    Following(BodyId),
}

impl FollowState {
    pub fn followed(&self) -> Option<BodyId> {
        match *self {
            FollowState::Idle => None,
            FollowState::Following(id) => Some(id),
        }
    }

    /// Apply a click that resolved to `hit` (already mapped to its owning body).
    pub fn on_pick(&mut self, hit: Option<BodyId>) -> PickOutcome {
        match (hit, *self) {
            (None, FollowState::Idle) => PickOutcome::Unchanged,
            (None, FollowState::Following(_)) => {
                *self = FollowState::Idle;
                PickOutcome::Cleared
            }
            (Some(id), FollowState::Following(current)) if id == current => PickOutcome::Unchanged,
            (Some(id), _) => {
                *self = FollowState::Following(id);
                PickOutcome::Selected(id)
            }
        }
    }
}

/// What a click did to the follow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// State unchanged: empty click while idle, or the followed body again.
    Unchanged,
    /// Now following this body (from idle or from another body).
    Selected(BodyId),
    /// Was following, now idle. The camera must be reset.
    Cleared,
}

/// Camera eye and target that frame `node` from the +Z side.
pub fn follow_pose(node: &Node) -> (Vec3, Vec3) {
    let eye = node.pos + Vec3::new(0.0, 0.0, node.scale.z + FOLLOW_MARGIN);
    (eye, node.pos)
}

pub fn apply_follow(camera: &mut Camera3D, node: &Node) {
    let (eye, target) = follow_pose(node);
    camera.set_pose(eye, target);
}

/// Recenter on `origin` at the reset distance and re-anchor the orbit controls.
pub fn apply_reset(camera: &mut Camera3D, controls: &mut OrbitControls, origin: Vec3) {
    camera.set_pose(origin + Vec3::new(0.0, 0.0, RESET_DISTANCE), origin);
    controls.target = origin;
}
