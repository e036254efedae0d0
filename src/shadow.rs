//! Shadow recompute pass

use crate::absorber::Absorber;
use crate::emitter::Emitter;
use log::trace;

/// Resets every ray to its full length, then reclips it against every
/// non-penetrable absorber, keeping the minimum.
///
/// Run in full after *every* scene mutation. Resetting first makes the
/// result independent of absorber iteration order and releases shadows
/// cast by absorbers that have since moved or been removed; an
/// incremental clip-only pass would leak exactly that stale state.
pub(crate) fn recompute<'a, E, A>(emitters: E, absorbers: A)
where
    E: Iterator<Item = &'a mut Emitter>,
    A: Iterator<Item = &'a Absorber> + Clone,
{
    let mut ray_total = 0usize;
    let mut clip_total = 0usize;

    for emitter in emitters {
        for ray in emitter.rays.iter_mut() {
            ray.reset();
            ray_total += 1;
            for absorber in absorbers.clone() {
                if absorber.penetrable {
                    continue;
                }
                if let Some(length) = absorber.clip_length(ray) {
                    ray.clip_to(length);
                    clip_total += 1;
                }
            }
        }
    }

    trace!("shadow pass: {ray_total} rays, {clip_total} clips applied");
}
