//! Interactive editor controller
//!
//! Translates discrete host input events into scene mutations: hotkeys
//! spawn objects under the cursor, comma/period re-aim the hovered
//! emitter, and a pointer drag moves whatever body was picked up. Pure
//! logic; the host owns the actual input polling.

use crate::emitter::EmitterKind;
use crate::error::Result;
use crate::math::{Vec2, degrees_to_radians};
use crate::scene::{GlimmerScene, SceneHandle};
use std::f32::consts::FRAC_PI_4;

/// Hotkeys understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotKey {
    /// Spawn a point emitter at the cursor.
    PointEmitter,
    /// Spawn a directional emitter at the cursor.
    DirectionalEmitter,
    /// Spawn a spot emitter at the cursor.
    SpotEmitter,
    /// Spawn an absorber at the cursor.
    Absorber,
    /// Rotate the hovered directional/spot emitter counterclockwise.
    AngleDecrement,
    /// Rotate the hovered directional/spot emitter clockwise.
    AngleIncrement,
}

/// Discrete input events the host forwards, one per poll-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    PointerDown,
    PointerUp,
    Key(HotKey),
}

/// Default facing for a freshly spawned directional emitter.
const DIRECTIONAL_SPAWN_ANGLE: f32 = FRAC_PI_4;
/// Default facing and arc for a freshly spawned spot emitter, degrees.
const SPOT_SPAWN_ANGLE_DEG: f32 = 90.0;
const SPOT_SPAWN_ARC_DEG: f32 = 20.0;

/// Tracks the cursor and an in-progress drag across input events.
#[derive(Debug, Default)]
pub struct SceneEditor {
    cursor: Vec2,
    dragging: Option<SceneHandle>,
}

impl SceneEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// The object currently being dragged, if any.
    pub fn dragging(&self) -> Option<SceneHandle> {
        self.dragging
    }

    /// Applies one input event to the scene. Each mutation runs its full
    /// regenerate/recompute pass before this returns.
    pub fn handle_event(&mut self, scene: &mut GlimmerScene, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::PointerMoved(position) => {
                self.cursor = position;
                if let Some(handle) = self.dragging {
                    scene.move_object(handle, position)?;
                }
            }
            InputEvent::PointerDown => {
                self.dragging = scene.hit_test(self.cursor);
            }
            InputEvent::PointerUp => {
                self.dragging = None;
            }
            InputEvent::Key(key) => self.handle_key(scene, key)?,
        }
        Ok(())
    }

    fn handle_key(&mut self, scene: &mut GlimmerScene, key: HotKey) -> Result<()> {
        match key {
            HotKey::PointEmitter => {
                scene.add_emitter(EmitterKind::Point, self.cursor)?;
            }
            HotKey::DirectionalEmitter => {
                let width = scene.desc().circle_radius * 2.0;
                scene.add_emitter(
                    EmitterKind::Directional {
                        angle: DIRECTIONAL_SPAWN_ANGLE,
                        width,
                    },
                    self.cursor,
                )?;
            }
            HotKey::SpotEmitter => {
                scene.add_emitter(
                    EmitterKind::Spot {
                        angle: degrees_to_radians(SPOT_SPAWN_ANGLE_DEG),
                        arc: degrees_to_radians(SPOT_SPAWN_ARC_DEG),
                    },
                    self.cursor,
                )?;
            }
            HotKey::Absorber => {
                scene.add_absorber(self.cursor)?;
            }
            HotKey::AngleDecrement => self.rotate_hovered(scene, -1.0)?,
            HotKey::AngleIncrement => self.rotate_hovered(scene, 1.0)?,
        }
        Ok(())
    }

    /// Re-aims the emitter under the cursor by one configured increment.
    /// Hovering nothing, an absorber, or a point emitter is a no-op, not
    /// an error.
    fn rotate_hovered(&self, scene: &mut GlimmerScene, sign: f32) -> Result<()> {
        let Some(SceneHandle::Emitter(id)) = scene.hit_test(self.cursor) else {
            return Ok(());
        };
        if scene.emitter(id)?.kind.angle().is_none() {
            return Ok(());
        }
        let step = scene.desc().angle_increment;
        scene.adjust_emitter_angle(id, sign * step)
    }
}
