//! Glimmer: a 2D light propagation engine for interactive scene editing.
//!
//! Emitters cast bundles of rays; opaque circular absorbers cast shadows by
//! clipping any ray that would otherwise pass through them. Every scene
//! mutation regenerates the affected emitter's rays and reruns the full
//! shadow pass before returning, so rendered state is always consistent.
//!
//! Pixel rendering and input polling stay on the host side: implement
//! [`render::DrawTarget`] for your surface and feed [`editor::InputEvent`]s
//! from your poll loop.

pub mod absorber;
pub mod color;
pub mod config;
pub mod editor;
pub mod emitter;
pub mod error;
pub mod events;
pub mod math;
pub mod ray;
pub mod render;
pub mod scene;

mod shadow;

pub use absorber::Absorber;
pub use color::Rgb;
pub use config::GlimmerSceneDesc;
pub use editor::{HotKey, InputEvent, SceneEditor};
pub use emitter::{Emitter, EmitterKind};
pub use error::{GlimmerError, Result};
pub use events::GlimmerEvent;
pub use math::Vec2;
pub use ray::Ray;
pub use render::{DrawTarget, draw_scene};
pub use scene::{AbsorberId, EmitterId, GlimmerScene, RaySegment, SceneHandle};
