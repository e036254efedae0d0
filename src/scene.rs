//! Scene coordinator: owns all emitters and absorbers, sequences ray
//! regeneration and shadow recomputation for every mutation.

use crate::absorber::Absorber;
use crate::color::Rgb;
use crate::config::GlimmerSceneDesc;
use crate::emitter::{Emitter, EmitterKind};
use crate::error::{GlimmerError, Result};
use crate::events::GlimmerEvent;
use crate::math::{Vec2, circle_contains};
use crate::ray::Ray;
use crate::shadow;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Stable handle to an emitter. Never reused; stays invalid after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmitterId(Uuid);

/// Stable handle to an absorber. Never reused; stays invalid after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbsorberId(Uuid);

impl EmitterId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AbsorberId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "emitter:{}", self.0)
    }
}

impl fmt::Display for AbsorberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "absorber:{}", self.0)
    }
}

/// Handle union for operations that accept either object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneHandle {
    Emitter(EmitterId),
    Absorber(AbsorberId),
}

impl From<EmitterId> for SceneHandle {
    fn from(id: EmitterId) -> Self {
        Self::Emitter(id)
    }
}

impl From<AbsorberId> for SceneHandle {
    fn from(id: AbsorberId) -> Self {
        Self::Absorber(id)
    }
}

impl fmt::Display for SceneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emitter(id) => id.fmt(f),
            Self::Absorber(id) => id.fmt(f),
        }
    }
}

/// One drawable ray: where it starts, where it currently stops, its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Rgb,
}

/// The scene: every mutation goes through here and runs to completion
/// (regenerate affected rays, then the full shadow pass) before returning,
/// so no partial state is ever observable.
///
/// Single-threaded by design; embed behind one lock or one owning actor if
/// the host is multi-threaded.
pub struct GlimmerScene {
    desc: GlimmerSceneDesc,
    emitters: HashMap<EmitterId, Emitter>,
    absorbers: HashMap<AbsorberId, Absorber>,
    /// Insertion order; the back is topmost for hit testing and is drawn
    /// last by the renderer.
    order: Vec<SceneHandle>,
    event_sender: Sender<GlimmerEvent>,
    event_receiver: Receiver<GlimmerEvent>,
}

impl GlimmerScene {
    pub fn new(desc: GlimmerSceneDesc) -> Result<Self> {
        desc.validate()?;
        let (event_sender, event_receiver) = unbounded();
        Ok(Self {
            desc,
            emitters: HashMap::new(),
            absorbers: HashMap::new(),
            order: Vec::new(),
            event_sender,
            event_receiver,
        })
    }

    pub fn desc(&self) -> &GlimmerSceneDesc {
        &self.desc
    }

    /// Creates an emitter with the scene's default radius and colors.
    pub fn add_emitter(&mut self, kind: EmitterKind, position: Vec2) -> Result<EmitterId> {
        self.add_emitter_with(
            kind,
            position,
            self.desc.circle_radius,
            self.desc.fill_color,
            self.desc.emitter_color,
        )
    }

    /// Creates an emitter with explicit body radius and colors. The ray
    /// batch is fully populated and shadowed before this returns.
    pub fn add_emitter_with(
        &mut self,
        kind: EmitterKind,
        position: Vec2,
        radius: f32,
        fill_color: Rgb,
        emitter_color: Rgb,
    ) -> Result<EmitterId> {
        check_radius(radius)?;
        let id = EmitterId::new();
        let emitter = Emitter::new(kind, position, radius, fill_color, emitter_color, &self.desc);
        debug!("add emitter {id} ({kind:?}) at {position}");
        self.emitters.insert(id, emitter);
        self.order.push(id.into());
        self.emit(GlimmerEvent::EmitterAdded { id })?;
        self.recompute()?;
        Ok(id)
    }

    /// Creates an opaque absorber with the scene's default radius.
    pub fn add_absorber(&mut self, position: Vec2) -> Result<AbsorberId> {
        self.add_absorber_with(position, self.desc.circle_radius, self.desc.fill_color, false)
    }

    pub fn add_absorber_with(
        &mut self,
        position: Vec2,
        radius: f32,
        fill_color: Rgb,
        penetrable: bool,
    ) -> Result<AbsorberId> {
        check_radius(radius)?;
        let id = AbsorberId::new();
        debug!("add absorber {id} at {position}");
        self.absorbers
            .insert(id, Absorber::new(position, radius, fill_color, penetrable));
        self.order.push(id.into());
        self.emit(GlimmerEvent::AbsorberAdded { id })?;
        self.recompute()?;
        Ok(id)
    }

    /// Moves an emitter or absorber. Emitter moves regenerate the whole
    /// ray batch from the new position; either way the shadow pass runs.
    pub fn move_object(&mut self, handle: impl Into<SceneHandle>, to: Vec2) -> Result<()> {
        let handle = handle.into();
        let from = match handle {
            SceneHandle::Emitter(id) => {
                let emitter = self
                    .emitters
                    .get_mut(&id)
                    .ok_or_else(|| unknown_handle(handle))?;
                let from = emitter.position;
                emitter.position = to;
                emitter.regenerate_rays(&self.desc);
                from
            }
            SceneHandle::Absorber(id) => {
                let absorber = self
                    .absorbers
                    .get_mut(&id)
                    .ok_or_else(|| unknown_handle(handle))?;
                let from = absorber.position;
                absorber.position = to;
                from
            }
        };
        debug!("move {handle}: {from} -> {to}");
        self.emit(GlimmerEvent::ObjectMoved { handle, from, to })?;
        self.recompute()
    }

    /// Sets the facing angle of a directional or spot emitter and rebuilds
    /// its rays. Point emitters have no angle; the call is rejected before
    /// any state changes.
    pub fn set_emitter_angle(&mut self, id: EmitterId, angle: f32) -> Result<()> {
        let emitter = self
            .emitters
            .get_mut(&id)
            .ok_or_else(|| unknown_handle(id.into()))?;
        let Some(old_angle) = emitter.kind.angle() else {
            return Err(GlimmerError::Geometry(format!(
                "{id} is a point emitter and has no angle"
            )));
        };
        emitter.kind.set_angle(angle);
        emitter.regenerate_rays(&self.desc);
        debug!("angle {id}: {old_angle} -> {angle}");
        self.emit(GlimmerEvent::EmitterAngleChanged {
            id,
            old_angle,
            new_angle: angle,
        })?;
        self.recompute()
    }

    /// Steps the facing angle by `delta` radians (the editor's comma and
    /// period keys pass the configured increment with either sign).
    pub fn adjust_emitter_angle(&mut self, id: EmitterId, delta: f32) -> Result<()> {
        let emitter = self
            .emitters
            .get(&id)
            .ok_or_else(|| unknown_handle(id.into()))?;
        let angle = emitter.kind.angle().ok_or_else(|| {
            GlimmerError::Geometry(format!("{id} is a point emitter and has no angle"))
        })?;
        self.set_emitter_angle(id, angle + delta)
    }

    /// Removes an object. Removing an emitter drops its rays with it and
    /// needs no shadow pass; removing an absorber runs one so the shadows
    /// it cast are released.
    pub fn remove(&mut self, handle: impl Into<SceneHandle>) -> Result<()> {
        let handle = handle.into();
        match handle {
            SceneHandle::Emitter(id) => {
                self.emitters
                    .remove(&id)
                    .ok_or_else(|| unknown_handle(handle))?;
                self.order.retain(|h| *h != handle);
                debug!("remove {handle}");
                self.emit(GlimmerEvent::ObjectRemoved { handle })
            }
            SceneHandle::Absorber(id) => {
                self.absorbers
                    .remove(&id)
                    .ok_or_else(|| unknown_handle(handle))?;
                self.order.retain(|h| *h != handle);
                debug!("remove {handle}");
                self.emit(GlimmerEvent::ObjectRemoved { handle })?;
                self.recompute()
            }
        }
    }

    pub fn emitter(&self, id: EmitterId) -> Result<&Emitter> {
        self.emitters.get(&id).ok_or_else(|| unknown_handle(id.into()))
    }

    pub fn absorber(&self, id: AbsorberId) -> Result<&Absorber> {
        self.absorbers.get(&id).ok_or_else(|| unknown_handle(id.into()))
    }

    /// The emitter's rays in generation order.
    pub fn query_rays(&self, id: EmitterId) -> Result<&[Ray]> {
        Ok(self.emitter(id)?.rays())
    }

    /// The emitter's rays as drawable segments.
    pub fn ray_segments(&self, id: EmitterId) -> Result<Vec<RaySegment>> {
        Ok(self
            .emitter(id)?
            .rays()
            .iter()
            .map(|ray| RaySegment {
                start: ray.origin,
                end: ray.endpoint(),
                color: ray.color,
            })
            .collect())
    }

    /// All object handles, oldest first. The back of the list is topmost.
    pub fn handles(&self) -> &[SceneHandle] {
        &self.order
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn absorber_count(&self) -> usize {
        self.absorbers.len()
    }

    /// Body circle of any object: center, radius, fill color.
    pub fn body(&self, handle: impl Into<SceneHandle>) -> Result<(Vec2, f32, Rgb)> {
        match handle.into() {
            SceneHandle::Emitter(id) => {
                let e = self.emitter(id)?;
                Ok((e.position, e.radius, e.fill_color))
            }
            SceneHandle::Absorber(id) => {
                let a = self.absorber(id)?;
                Ok((a.position, a.radius, a.fill_color))
            }
        }
    }

    /// The topmost object whose body contains `position`, if any.
    pub fn hit_test(&self, position: Vec2) -> Option<SceneHandle> {
        self.order.iter().rev().copied().find(|handle| {
            self.body(*handle)
                .map(|(center, radius, _)| circle_contains(center, radius, position))
                .unwrap_or(false)
        })
    }

    /// Runs the full reset-then-reclip pass over every ray and every
    /// absorber. Every mutation already calls this; calling it again with
    /// no intervening mutation changes nothing.
    pub fn recompute_shadows(&mut self) -> Result<()> {
        self.recompute()
    }

    /// Drains all queued mutation/recompute notifications.
    pub fn poll_events(&mut self) -> Vec<GlimmerEvent> {
        self.event_receiver.try_iter().collect()
    }

    fn recompute(&mut self) -> Result<()> {
        shadow::recompute(self.emitters.values_mut(), self.absorbers.values());
        let rays = self.emitters.values().map(|e| e.rays().len()).sum();
        let absorbers = self.absorbers.len();
        debug!("recomputed shadows: {rays} rays x {absorbers} absorbers");
        self.emit(GlimmerEvent::ShadowsRecomputed { rays, absorbers })
    }

    fn emit(&self, event: GlimmerEvent) -> Result<()> {
        self.event_sender
            .send(event)
            .map_err(|e| GlimmerError::EventChannel(format!("failed to queue event: {e}")))
    }
}

fn check_radius(radius: f32) -> Result<()> {
    if radius > 0.0 {
        Ok(())
    } else {
        Err(GlimmerError::Geometry(format!(
            "radius must be strictly positive, got {radius}"
        )))
    }
}

fn unknown_handle(handle: SceneHandle) -> GlimmerError {
    GlimmerError::InvalidHandle(format!("{handle} is unknown or was removed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn scene(n: usize) -> GlimmerScene {
        GlimmerScene::new(GlimmerSceneDesc::new().ray_count(n)).unwrap()
    }

    #[test]
    fn emitter_has_full_batch_on_creation() {
        let mut s = scene(7);
        let id = s.add_emitter(EmitterKind::Point, Vec2::new(50.0, 50.0)).unwrap();
        assert_eq!(s.query_rays(id).unwrap().len(), 7);
    }

    #[test]
    fn absorber_shadows_applied_on_creation() {
        let mut s = scene(4);
        let e = s.add_emitter(EmitterKind::Point, Vec2::new(100.0, 100.0)).unwrap();
        s.add_absorber_with(Vec2::new(100.0, 200.0), 20.0, Rgb::WHITE, false)
            .unwrap();
        let rays = s.query_rays(e).unwrap();
        assert!((rays[1].length - 80.0).abs() < 1e-3);
    }

    #[test]
    fn moving_absorber_away_restores_rays() {
        let mut s = scene(4);
        let e = s.add_emitter(EmitterKind::Point, Vec2::new(100.0, 100.0)).unwrap();
        let a = s
            .add_absorber_with(Vec2::new(100.0, 200.0), 20.0, Rgb::WHITE, false)
            .unwrap();
        assert!(s.query_rays(e).unwrap()[1].length < 1000.0);

        s.move_object(a, Vec2::new(9000.0, 9000.0)).unwrap();
        for ray in s.query_rays(e).unwrap() {
            assert_eq!(ray.length, s.desc().ray_max_length);
        }
    }

    #[test]
    fn removing_absorber_releases_shadows() {
        let mut s = scene(4);
        let e = s.add_emitter(EmitterKind::Point, Vec2::new(100.0, 100.0)).unwrap();
        let a = s
            .add_absorber_with(Vec2::new(100.0, 200.0), 20.0, Rgb::WHITE, false)
            .unwrap();
        s.remove(a).unwrap();
        for ray in s.query_rays(e).unwrap() {
            assert_eq!(ray.length, 1000.0);
        }
        assert_eq!(s.absorber_count(), 0);
    }

    #[test]
    fn moving_emitter_regenerates_from_new_position() {
        let mut s = scene(4);
        let id = s.add_emitter(EmitterKind::Point, Vec2::new(10.0, 10.0)).unwrap();
        s.move_object(id, Vec2::new(200.0, 300.0)).unwrap();
        for ray in s.query_rays(id).unwrap() {
            assert_eq!(ray.origin, Vec2::new(200.0, 300.0));
        }
    }

    #[test]
    fn set_angle_rejected_for_point_emitter() {
        let mut s = scene(4);
        let id = s.add_emitter(EmitterKind::Point, Vec2::new(10.0, 10.0)).unwrap();
        let before = s.query_rays(id).unwrap().to_vec();
        s.poll_events();

        let err = s.set_emitter_angle(id, 1.0).unwrap_err();
        assert!(matches!(err, GlimmerError::Geometry(_)));
        // Rejected mutation leaves the scene untouched and emits nothing.
        assert_eq!(s.query_rays(id).unwrap(), &before[..]);
        assert!(s.poll_events().is_empty());
    }

    #[test]
    fn adjust_angle_steps_by_delta() {
        let mut s = scene(4);
        let id = s
            .add_emitter(
                EmitterKind::Spot {
                    angle: FRAC_PI_2,
                    arc: 0.4,
                },
                Vec2::new(10.0, 10.0),
            )
            .unwrap();
        s.adjust_emitter_angle(id, 0.25).unwrap();
        assert_eq!(s.emitter(id).unwrap().kind.angle(), Some(FRAC_PI_2 + 0.25));
        s.adjust_emitter_angle(id, -0.25).unwrap();
        assert_eq!(s.emitter(id).unwrap().kind.angle(), Some(FRAC_PI_2));
    }

    #[test]
    fn stale_handles_are_invalid() {
        let mut s = scene(4);
        let id = s.add_emitter(EmitterKind::Point, Vec2::new(10.0, 10.0)).unwrap();
        s.remove(id).unwrap();
        assert!(matches!(
            s.move_object(id, Vec2::ZERO),
            Err(GlimmerError::InvalidHandle(_))
        ));
        assert!(matches!(s.remove(id), Err(GlimmerError::InvalidHandle(_))));
        assert!(matches!(s.query_rays(id), Err(GlimmerError::InvalidHandle(_))));
    }

    #[test]
    fn non_positive_radius_rejected_atomically() {
        let mut s = scene(4);
        assert!(s
            .add_absorber_with(Vec2::ZERO, 0.0, Rgb::WHITE, false)
            .is_err());
        assert!(s
            .add_emitter_with(EmitterKind::Point, Vec2::ZERO, -3.0, Rgb::WHITE, Rgb::WHITE)
            .is_err());
        assert_eq!(s.handles().len(), 0);
        assert!(s.poll_events().is_empty());
    }

    #[test]
    fn recompute_is_idempotent_via_public_api() {
        let mut s = scene(16);
        let e = s.add_emitter(EmitterKind::Point, Vec2::new(100.0, 100.0)).unwrap();
        s.add_absorber_with(Vec2::new(160.0, 100.0), 25.0, Rgb::WHITE, false)
            .unwrap();
        let first = s.ray_segments(e).unwrap();
        s.recompute_shadows().unwrap();
        let second = s.ray_segments(e).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn hit_test_picks_topmost() {
        let mut s = scene(4);
        let bottom = s.add_emitter(EmitterKind::Point, Vec2::new(50.0, 50.0)).unwrap();
        let top = s.add_absorber(Vec2::new(52.0, 50.0)).unwrap();
        assert_eq!(s.hit_test(Vec2::new(51.0, 50.0)), Some(top.into()));
        assert_eq!(s.hit_test(Vec2::new(41.5, 50.0)), Some(bottom.into()));
        assert_eq!(s.hit_test(Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn every_mutation_emits_events() {
        let mut s = scene(4);
        let e = s.add_emitter(EmitterKind::Point, Vec2::new(10.0, 10.0)).unwrap();
        let events = s.poll_events();
        assert_eq!(events[0], GlimmerEvent::EmitterAdded { id: e });
        assert!(matches!(
            events[1],
            GlimmerEvent::ShadowsRecomputed { rays: 4, absorbers: 0 }
        ));

        s.move_object(e, Vec2::new(20.0, 20.0)).unwrap();
        let events = s.poll_events();
        assert_eq!(
            events[0],
            GlimmerEvent::ObjectMoved {
                handle: e.into(),
                from: Vec2::new(10.0, 10.0),
                to: Vec2::new(20.0, 20.0),
            }
        );

        s.remove(e).unwrap();
        let events = s.poll_events();
        assert_eq!(events[0], GlimmerEvent::ObjectRemoved { handle: e.into() });
        // Emitter removal leaves no rays behind, so no shadow pass runs.
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn invariants_hold_after_arbitrary_mutations() {
        let mut s = scene(10);
        let e1 = s.add_emitter(EmitterKind::Point, Vec2::new(100.0, 100.0)).unwrap();
        let e2 = s
            .add_emitter(
                EmitterKind::Directional {
                    angle: 0.8,
                    width: 30.0,
                },
                Vec2::new(300.0, 200.0),
            )
            .unwrap();
        let a = s.add_absorber(Vec2::new(150.0, 100.0)).unwrap();
        s.add_absorber(Vec2::new(320.0, 180.0)).unwrap();
        s.move_object(e2, Vec2::new(310.0, 210.0)).unwrap();
        s.adjust_emitter_angle(e2, -0.3).unwrap();
        s.move_object(a, Vec2::new(120.0, 100.0)).unwrap();

        for id in [e1, e2] {
            let rays = s.query_rays(id).unwrap();
            assert_eq!(rays.len(), 10);
            for ray in rays {
                assert!(ray.length > 0.0);
                assert!(ray.length <= ray.max_length);
            }
        }
    }
}
