// Crack geometry for the pond ice pane.
//
// This is presentation geometry, not session state: the fracture *stage*
// counter (what has happened to the ice) lives in `session.rs`, while this
// module answers "what does a stage look like". A renderer calls
// `crack_pattern` whenever the stage advances and draws the returned
// polylines onto the pane; at stage 3 the pane is removed and no pattern
// is drawn at all.
//
// Each crack is a jagged polyline from the impact point out to the pond
// rim, built by recursive midpoint displacement: split the segment at its
// midpoint, push the midpoint sideways by a random amount, recurse on both
// halves with the jitter halved. More stages mean more cracks radiating
// from the same impact.
//
// Coordinates are in the pond's local XZ plane, relative to the pond
// center, so the renderer can place the pattern without knowing where the
// pond sits in the world.
//
// See also: `session.rs` (`IceState`), `terrain.rs` (`POND_RADIUS`),
// `worldgen.rs` for where the ice voxels come from.
//
// **Critical constraint: determinism.** All jitter comes from the
// caller's `GameRng`; same impact, stage, and rng state give the same
// pattern.

use crate::prng::GameRng;
use crate::terrain::POND_RADIUS;
use serde::{Deserialize, Serialize};

/// Midpoint-displacement recursion depth. Each crack ends up with
/// 2^DEPTH segments, jagged enough to read as ice at the scene's scale.
const SUBDIVISION_DEPTH: u32 = 4;

/// Initial perpendicular jitter as a fraction of the crack's length.
const JITTER_FRACTION: f32 = 0.18;

/// Cracks radiating from one impact at each stage (index = stage 1..=2).
/// Stage 0 draws nothing; stage 3 removes the pane instead of drawing.
const CRACKS_PER_STAGE: [usize; 2] = [3, 5];

/// Jagged crack polylines in pond-local XZ coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrackPattern {
    pub polylines: Vec<Vec<[f32; 2]>>,
}

/// Build the crack pattern for a fracture stage.
///
/// `impact` is the strike point relative to the pond center. Points
/// outside the pond are clamped onto the rim so a grazing hit still
/// produces a sensible pattern.
pub fn crack_pattern(impact: [f32; 2], stage: u8, rng: &mut GameRng) -> CrackPattern {
    let crack_count = match stage {
        0 => return CrackPattern::default(),
        1 => CRACKS_PER_STAGE[0],
        2 => CRACKS_PER_STAGE[1],
        _ => return CrackPattern::default(),
    };

    let impact = clamp_to_pond(impact);
    let mut polylines = Vec::with_capacity(crack_count);
    for _ in 0..crack_count {
        let angle = rng.range_f32(0.0, std::f32::consts::TAU);
        let rim = [angle.cos() * POND_RADIUS, angle.sin() * POND_RADIUS];
        let mut points = Vec::with_capacity((1 << SUBDIVISION_DEPTH) + 1);
        points.push(impact);
        subdivide(impact, rim, SUBDIVISION_DEPTH, rng, &mut points);
        points.push(rim);
        polylines.push(points);
    }
    CrackPattern { polylines }
}

/// Recursively emit the interior points of the segment `a..b`, in order,
/// displacing each midpoint perpendicular to its segment. Endpoints are
/// the caller's responsibility.
fn subdivide(a: [f32; 2], b: [f32; 2], depth: u32, rng: &mut GameRng, out: &mut Vec<[f32; 2]>) {
    if depth == 0 {
        return;
    }
    let dx = b[0] - a[0];
    let dz = b[1] - a[1];
    let len = (dx * dx + dz * dz).sqrt();
    // Jitter scales with the segment, so it naturally halves per level.
    let jitter = rng.range_f32(-1.0, 1.0) * len * JITTER_FRACTION;
    let (px, pz) = if len > f32::EPSILON {
        (-dz / len, dx / len)
    } else {
        (0.0, 0.0)
    };
    let mid = [
        (a[0] + b[0]) * 0.5 + px * jitter,
        (a[1] + b[1]) * 0.5 + pz * jitter,
    ];
    subdivide(a, mid, depth - 1, rng, out);
    out.push(mid);
    subdivide(mid, b, depth - 1, rng, out);
}

fn clamp_to_pond(p: [f32; 2]) -> [f32; 2] {
    let d = (p[0] * p[0] + p[1] * p[1]).sqrt();
    if d <= POND_RADIUS {
        return p;
    }
    let scale = POND_RADIUS / d;
    [p[0] * scale, p[1] * scale]
}
