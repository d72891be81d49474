// Shared terrain and canopy shape functions.
//
// `terrain_height` is the contract that keeps gameplay objects visually
// grounded: the world generator decides column elevations with its own
// denser, path-aware logic, but gift scatter and snowman placement look up
// elevations through this simplified function. Both sides must evaluate
// the same constants in the same order, which is why the pond and hub
// geometry lives here as consts instead of in `GameConfig`.
//
// The simplification is deliberate: this function knows nothing about the
// path network or building footprints the generator draws, so a scattered
// object near a path may rest slightly above or below it. That is an
// accepted visual approximation — do not "fix" it here, the mismatch is
// part of the scene's established look.
//
// `canopy_radius` is the other shared shape: the tree builder and the
// tree-surface gift strategy must agree on the conifer taper or gifts
// would float off (or sink into) the canopy.
//
// See also: `worldgen.rs` (column fill, tree discs), `placement.rs`
// (scatter and tree-surface strategies), `config.rs` for `TreeParams`.
//
// **Critical constraint: determinism.** Pure functions of their inputs.
// No state, no randomness.

use crate::config::TreeParams;

/// Pond center in the XZ plane.
pub const POND_CENTER: (f32, f32) = (-35.0, 35.0);
/// Pond radius; columns inside it are ice over water.
pub const POND_RADIUS: f32 = 16.0;
/// Flat plaza radius around the world center.
pub const HUB_RADIUS: f32 = 5.0;
/// Elevation of the pond's ice surface.
pub const ICE_LEVEL: i32 = -2;
/// Elevation of the single water voxel under the ice air gap.
pub const WATER_LEVEL: i32 = -5;

/// Ground elevation at a logical XZ position.
///
/// Policy, first match wins:
/// 1. inside the pond → `ICE_LEVEL`;
/// 2. inside the center hub → 0;
/// 3. layered sine/cosine noise, floored to the lattice.
pub fn terrain_height(x: f32, z: f32) -> i32 {
    let dx = x - POND_CENTER.0;
    let dz = z - POND_CENTER.1;
    if (dx * dx + dz * dz).sqrt() < POND_RADIUS {
        return ICE_LEVEL;
    }
    if (x * x + z * z).sqrt() < HUB_RADIUS {
        return 0;
    }
    ((x * 0.05).sin() * (z * 0.05).cos() * 6.0 + (x * 0.1 + z * 0.2).sin() * 2.0).floor() as i32
}

/// First canopy level above the trunk.
pub fn canopy_base(tree: &TreeParams) -> i32 {
    tree.trunk_height + 1
}

/// Canopy radius at height `y` (continuous, in voxel units): a linear
/// shrink from `base_radius` to zero at the canopy top, plus a sinusoidal
/// width perturbation, floored at 1 so every disc places voxels.
pub fn canopy_radius(y: f32, tree: &TreeParams) -> f32 {
    let base = canopy_base(tree) as f32;
    let span = (tree.height - canopy_base(tree)) as f32;
    let frac = ((y - base) / span).clamp(0.0, 1.0);
    let linear = tree.base_radius * (1.0 - frac);
    (linear + (y * tree.wobble_frequency).sin() * tree.wobble_amplitude).max(1.0)
}

/// Map a canopy height fraction in [0, 1] to a continuous Y coordinate.
/// Used by the tree-surface gift strategy to pick heights in the same
/// space the tree builder iterates over.
pub fn canopy_y(frac: f32, tree: &TreeParams) -> f32 {
    let base = canopy_base(tree) as f32;
    base + frac * (tree.height - canopy_base(tree)) as f32
}
