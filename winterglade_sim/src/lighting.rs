// Lighting preset selection from the wall-clock hour.
//
// The hour (0–23) is the single environmental input the scene reads, and
// it only selects a preset; generation and gameplay are independent of
// it. The caller samples the local clock and passes the hour in, which
// keeps this module pure and testable.
//
// Lamps along the paths light only under the night preset.
//
// See also: `worldgen.rs` for the lamp positions this gates.

use serde::{Deserialize, Serialize};

/// Scene-wide lighting mood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightPreset {
    Day,
    Dusk,
    Night,
}

/// Select the preset for a wall-clock hour. Hours ≥ 24 fold back into
/// range rather than panicking on a bad clock read.
pub fn preset_for_hour(hour: u8) -> LightPreset {
    match hour % 24 {
        7..=16 => LightPreset::Day,
        17..=19 | 5..=6 => LightPreset::Dusk,
        _ => LightPreset::Night,
    }
}

/// Whether path lamps should be lit at this hour.
pub fn is_night(hour: u8) -> bool {
    preset_for_hour(hour) == LightPreset::Night
}
