//! Motion rules: pure velocity transforms applied by the engine phases.

use nasch_core::{SimRng, Velocity};

/// Rule 1: `v = min(v + 1, max_velocity)`.
#[inline]
pub fn accelerate(v: Velocity, max_velocity: Velocity) -> Velocity {
    (v + 1).min(max_velocity)
}

/// Rule 3: cap the velocity at the forward gap.  Monotonic non-increasing:
/// the result is `<= v` and `<= gap`.
#[inline]
pub fn decelerate(v: Velocity, gap: usize) -> Velocity {
    v.min(gap)
}

/// Rule 4: with probability `p`, drop one velocity unit (floor 0) — the
/// driver-overreaction model.  Exactly one draw per vehicle per step, so the
/// RNG stream is reproducible; `p = 0` never triggers.
#[inline]
pub fn dally(v: Velocity, p: f64, rng: &mut SimRng) -> Velocity {
    if rng.gen_bool(p) { v.saturating_sub(1) } else { v }
}

/// One-time externally injected boost, capped at the speed limit.
#[inline]
pub fn impulse(v: Velocity, boost: Velocity, max_velocity: Velocity) -> Velocity {
    (v + boost).min(max_velocity)
}
