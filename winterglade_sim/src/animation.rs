// Per-frame visual derivations.
//
// Nothing here is state: every function is a pure mapping from elapsed
// time (and an entity id, used only to desynchronize phases) to a visual
// offset. The presentation layer recomputes these each frame and throws
// them away; they never feed back into `GameSession`, so recomputing them
// redundantly or skipping frames has no consequence.
//
// Entity ids seed the phase so thirty gifts do not bob in lockstep.
//
// See also: `session.rs` for the state these decorate, `lighting.rs` for
// the other presentation-side derivation.

use crate::types::{GiftId, SnowmanId};

const BOB_AMPLITUDE: f32 = 0.15;
const BOB_FREQUENCY: f32 = 1.6;
const SPIN_RATE: f32 = 0.8;
const WOBBLE_AMPLITUDE: f32 = 0.06;
const WOBBLE_FREQUENCY: f32 = 2.2;
const PULSE_AMPLITUDE: f32 = 0.08;
const PULSE_FREQUENCY: f32 = 5.0;

/// Per-entity phase offset, spreading animations across the scene.
fn phase(id: u32) -> f32 {
    id as f32 * 0.7
}

/// Vertical float offset for an uncollected gift.
pub fn gift_bob(elapsed: f32, id: GiftId) -> f32 {
    ((elapsed * BOB_FREQUENCY) + phase(id.0)).sin() * BOB_AMPLITUDE
}

/// Continuous yaw for a gift's idle spin, in radians. Unbounded by
/// design; the renderer wraps angles itself.
pub fn gift_spin(elapsed: f32, id: GiftId) -> f32 {
    elapsed * SPIN_RATE + phase(id.0)
}

/// Idle lean of a living snowman, in radians around its forward axis.
pub fn snowman_wobble(elapsed: f32, id: SnowmanId) -> f32 {
    ((elapsed * WOBBLE_FREQUENCY) + phase(id.0)).sin() * WOBBLE_AMPLITUDE
}

/// Uniform scale factor for a hovered (pointer-over) entity.
pub fn hover_pulse(elapsed: f32) -> f32 {
    1.0 + ((elapsed * PULSE_FREQUENCY).sin() * 0.5 + 0.5) * PULSE_AMPLITUDE
}
