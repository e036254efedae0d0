//! Event types for Glimmer

use crate::math::Vec2;
use crate::scene::{AbsorberId, EmitterId, SceneHandle};

/// Notification emitted after every applied scene mutation.
///
/// Events are queued inside the scene and drained by
/// [`GlimmerScene::poll_events`](crate::scene::GlimmerScene::poll_events);
/// rejected mutations emit nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum GlimmerEvent {
    EmitterAdded {
        id: EmitterId,
    },
    AbsorberAdded {
        id: AbsorberId,
    },
    ObjectMoved {
        handle: SceneHandle,
        from: Vec2,
        to: Vec2,
    },
    EmitterAngleChanged {
        id: EmitterId,
        old_angle: f32,
        new_angle: f32,
    },
    ObjectRemoved {
        handle: SceneHandle,
    },
    /// A full reset-then-reclip pass finished.
    ShadowsRecomputed {
        rays: usize,
        absorbers: usize,
    },
}

impl GlimmerEvent {
    /// The object the event refers to, if it refers to one.
    pub fn handle(&self) -> Option<SceneHandle> {
        match self {
            Self::EmitterAdded { id } => Some(SceneHandle::Emitter(*id)),
            Self::AbsorberAdded { id } => Some(SceneHandle::Absorber(*id)),
            Self::ObjectMoved { handle, .. } | Self::ObjectRemoved { handle } => Some(*handle),
            Self::EmitterAngleChanged { id, .. } => Some(SceneHandle::Emitter(*id)),
            Self::ShadowsRecomputed { .. } => None,
        }
    }

    /// True for events that changed scene contents (as opposed to the
    /// recompute bookkeeping event).
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::ShadowsRecomputed { .. })
    }
}
