// Gift and snowman placement.
//
// Runs once at session setup, after world generation, and grounds every
// placed object with the shared `terrain_height` function so positions
// match the rendered terrain without consulting the generator's voxel
// output.
//
// Gifts come from four strategies, executed in order, each contributing
// toward the nominal target:
// 1. tree-surface spiral — random heights on the canopy, just outside the
//    canopy radius, alternating Ornament/Star;
// 2. building interiors — 1–2 Stockings per cottage, inset from the walls;
// 3. pond surface — CandyCanes resting on the ice;
// 4. random terrain scatter — fills the remainder, rejecting only samples
//    inside the center-hub exclusion radius. There is deliberately no
//    collision check between scattered items; overlap is visually
//    acceptable and the established behavior.
//
// Snowmen: two hand-picked scenic spots, the rest sampled within a bounded
// radius with a retry cap and a fixed fallback position.
//
// See also: `terrain.rs` for `terrain_height`/`canopy_radius`/`canopy_y`,
// `config.rs` for `PlacementParams`/`SnowmanParams`, `session.rs` which
// takes ownership of the returned entities.
//
// **Critical constraint: determinism.** All randomness comes from the
// caller's `GameRng`; identical config + seed produce identical
// placements.

use crate::config::GameConfig;
use crate::palette;
use crate::prng::GameRng;
use crate::terrain::{self, ICE_LEVEL, POND_CENTER, terrain_height};
use crate::types::{Gift, GiftId, GiftKind, Snowman, SnowmanId, WorldPos};
use std::f32::consts::TAU;

/// All six kinds, in the order the scatter strategy draws from.
const SCATTER_KINDS: [GiftKind; 6] = [
    GiftKind::PlainBox,
    GiftKind::CandyCane,
    GiftKind::Ornament,
    GiftKind::Stocking,
    GiftKind::Gingerbread,
    GiftKind::Star,
];

/// Generate the session's collectible gifts via the four strategies.
pub fn generate_gifts(config: &GameConfig, rng: &mut GameRng) -> Vec<Gift> {
    let mut gifts = Vec::with_capacity(config.placement.gift_target + 8);
    let mut next_id = 1u32;
    place_tree_gifts(config, rng, &mut gifts, &mut next_id);
    place_building_gifts(config, rng, &mut gifts, &mut next_id);
    place_pond_gifts(config, rng, &mut gifts, &mut next_id);
    place_scatter_gifts(config, rng, &mut gifts, &mut next_id);
    gifts
}

/// Generate the session's snowman enemies.
pub fn generate_snowmen(config: &GameConfig, rng: &mut GameRng) -> Vec<Snowman> {
    let params = &config.snowmen;
    let mut snowmen = Vec::with_capacity(params.count);
    for i in 0..params.count {
        let (x, z) = if i < params.scenic_positions.len() {
            params.scenic_positions[i]
        } else {
            sample_snowman_spot(config, rng)
        };
        let y = (terrain_height(x, z) + 1) as f32;
        snowmen.push(Snowman {
            id: SnowmanId(i as u32 + 1),
            position: WorldPos::new(x, y, z),
            yaw: rng.range_f32(0.0, TAU),
            hit_points: params.initial_hit_points,
            is_dead: false,
        });
    }
    snowmen
}

/// Uniform sample within the spawn radius, outside the center exclusion
/// zone, with a retry cap and a fixed fallback spot.
fn sample_snowman_spot(config: &GameConfig, rng: &mut GameRng) -> (f32, f32) {
    let params = &config.snowmen;
    for _ in 0..params.retry_cap {
        let x = rng.range_f32(-params.spawn_radius, params.spawn_radius);
        let z = rng.range_f32(-params.spawn_radius, params.spawn_radius);
        let d = (x * x + z * z).sqrt();
        if (params.exclusion_radius..=params.spawn_radius).contains(&d) {
            return (x, z);
        }
    }
    params.fallback_position
}

// ---------------------------------------------------------------------------
// Gift strategies
// ---------------------------------------------------------------------------

fn push_gift(
    gifts: &mut Vec<Gift>,
    next_id: &mut u32,
    rng: &mut GameRng,
    position: WorldPos,
    kind: GiftKind,
    color: u32,
) {
    let id = GiftId(*next_id);
    *next_id += 1;
    // Small random tilt and spin so identical kinds don't read as clones.
    let rotation = [
        rng.range_f32(-0.15, 0.15),
        rng.range_f32(0.0, TAU),
        rng.range_f32(-0.15, 0.15),
    ];
    gifts.push(Gift {
        id,
        position,
        color,
        kind,
        collected: false,
        rotation: Some(rotation),
    });
}

/// Strategy 1: gifts hung on the canopy surface, alternating
/// Ornament/Star, using the same taper the tree builder uses.
fn place_tree_gifts(
    config: &GameConfig,
    rng: &mut GameRng,
    gifts: &mut Vec<Gift>,
    next_id: &mut u32,
) {
    let placement = &config.placement;
    for i in 0..placement.tree_gift_count {
        let frac = rng.range_f32(placement.tree_band.0, placement.tree_band.1);
        let y = terrain::canopy_y(frac, &config.tree);
        let radius = terrain::canopy_radius(y, &config.tree) + placement.tree_radial_offset;
        let angle = rng.range_f32(0.0, TAU);
        let kind = if i % 2 == 0 { GiftKind::Ornament } else { GiftKind::Star };
        let color = gift_color(kind, rng);
        push_gift(
            gifts,
            next_id,
            rng,
            WorldPos::new(radius * angle.cos(), y, radius * angle.sin()),
            kind,
            color,
        );
    }
}

/// Strategy 2: 1–2 Stockings on the floor of each cottage, inset from the
/// walls by a margin.
fn place_building_gifts(
    config: &GameConfig,
    rng: &mut GameRng,
    gifts: &mut Vec<Gift>,
    next_id: &mut u32,
) {
    let placement = &config.placement;
    for b in &config.buildings {
        let count = rng.range_usize(1, 3);
        let span_x = b.half_width() as f32 - placement.building_margin;
        let span_z = b.half_depth() as f32 - placement.building_margin;
        for _ in 0..count {
            let x = b.center.0 as f32 + rng.range_f32(-span_x, span_x);
            let z = b.center.1 as f32 + rng.range_f32(-span_z, span_z);
            // Floor layer sits at y = 0; rest on top of it plus the lift.
            let y = 1.0 + placement.building_lift;
            push_gift(
                gifts,
                next_id,
                rng,
                WorldPos::new(x, y, z),
                GiftKind::Stocking,
                palette::STOCKING_RED,
            );
        }
    }
}

/// Strategy 3: CandyCanes on the pond ice.
fn place_pond_gifts(
    config: &GameConfig,
    rng: &mut GameRng,
    gifts: &mut Vec<Gift>,
    next_id: &mut u32,
) {
    let placement = &config.placement;
    for _ in 0..placement.pond_gift_count {
        let angle = rng.range_f32(0.0, TAU);
        let radius = rng.range_f32(0.0, terrain::POND_RADIUS - placement.pond_inset);
        let x = POND_CENTER.0 + radius * angle.cos();
        let z = POND_CENTER.1 + radius * angle.sin();
        let y = (ICE_LEVEL + 1) as f32 + placement.pond_lift;
        push_gift(
            gifts,
            next_id,
            rng,
            WorldPos::new(x, y, z),
            GiftKind::CandyCane,
            palette::CANDY_CANE,
        );
    }
}

/// Strategy 4: fill the remainder by uniform scatter over a bounded
/// square. Retries are consumed only by the center-exclusion rejection;
/// an accepted sample always places. If a slot exhausts its retry cap the
/// slot is skipped, which in practice never happens.
fn place_scatter_gifts(
    config: &GameConfig,
    rng: &mut GameRng,
    gifts: &mut Vec<Gift>,
    next_id: &mut u32,
) {
    let placement = &config.placement;
    while gifts.len() < placement.gift_target {
        let mut placed = false;
        for _ in 0..placement.scatter_retry_cap {
            let x = rng.range_f32(-placement.scatter_extent, placement.scatter_extent);
            let z = rng.range_f32(-placement.scatter_extent, placement.scatter_extent);
            if (x * x + z * z).sqrt() < placement.scatter_exclusion_radius {
                continue;
            }
            let y = (terrain_height(x, z) + 1) as f32 + placement.scatter_lift;
            let kind = SCATTER_KINDS[rng.range_usize(0, SCATTER_KINDS.len())];
            let color = gift_color(kind, rng);
            push_gift(gifts, next_id, rng, WorldPos::new(x, y, z), kind, color);
            placed = true;
            break;
        }
        if !placed {
            break;
        }
    }
}

/// Per-kind colors; plain boxes draw random wrapping paper.
fn gift_color(kind: GiftKind, rng: &mut GameRng) -> u32 {
    match kind {
        GiftKind::PlainBox => palette::GIFT_COLORS[rng.range_usize(0, palette::GIFT_COLORS.len())],
        GiftKind::CandyCane => palette::CANDY_CANE,
        GiftKind::Ornament => {
            palette::ORNAMENT_COLORS[rng.range_usize(0, palette::ORNAMENT_COLORS.len())]
        }
        GiftKind::Stocking => palette::STOCKING_RED,
        GiftKind::Gingerbread => palette::GINGERBREAD,
        GiftKind::Star => palette::STAR_GOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::POND_RADIUS;

    fn generate() -> (GameConfig, Vec<Gift>, Vec<Snowman>) {
        let config = GameConfig::default();
        let mut rng = GameRng::new(42);
        let gifts = generate_gifts(&config, &mut rng);
        let snowmen = generate_snowmen(&config, &mut rng);
        (config, gifts, snowmen)
    }

    #[test]
    fn gift_count_converges() {
        let (config, gifts, _) = generate();
        // Fixed strategies: 12 tree + 4..=8 building + 4 pond; scatter
        // fills to the target, so the total may overshoot it by at most
        // the building strategy's variance.
        assert!(gifts.len() >= 25, "too few gifts: {}", gifts.len());
        assert!(
            gifts.len() <= config.placement.gift_target + 8,
            "too many gifts: {}",
            gifts.len()
        );
    }

    #[test]
    fn gift_ids_are_unique_and_incrementing() {
        let (_, gifts, _) = generate();
        for (i, gift) in gifts.iter().enumerate() {
            assert_eq!(gift.id, GiftId(i as u32 + 1));
            assert!(!gift.collected);
        }
    }

    #[test]
    fn tree_gifts_alternate_ornament_and_star() {
        let (config, gifts, _) = generate();
        let tree_gifts = &gifts[..config.placement.tree_gift_count];
        for (i, gift) in tree_gifts.iter().enumerate() {
            let expected = if i % 2 == 0 { GiftKind::Ornament } else { GiftKind::Star };
            assert_eq!(gift.kind, expected);
        }
    }

    #[test]
    fn tree_gifts_sit_outside_the_canopy() {
        let (config, gifts, _) = generate();
        for gift in &gifts[..config.placement.tree_gift_count] {
            let r = (gift.position.x * gift.position.x + gift.position.z * gift.position.z).sqrt();
            let canopy = terrain::canopy_radius(gift.position.y, &config.tree);
            assert!(
                r > canopy - 0.01,
                "tree gift sunk into the canopy: r={r}, canopy={canopy}"
            );
        }
    }

    #[test]
    fn building_gifts_are_stockings_inside_footprints() {
        let (config, gifts, _) = generate();
        let start = config.placement.tree_gift_count;
        let building_gifts: Vec<&Gift> = gifts[start..]
            .iter()
            .take_while(|g| g.kind == GiftKind::Stocking)
            .collect();
        assert!(building_gifts.len() >= config.buildings.len());
        assert!(building_gifts.len() <= config.buildings.len() * 2);
        for gift in &building_gifts {
            let inside = config.buildings.iter().any(|b| {
                (gift.position.x - b.center.0 as f32).abs() <= b.half_width() as f32
                    && (gift.position.z - b.center.1 as f32).abs() <= b.half_depth() as f32
            });
            assert!(inside, "stocking outside all footprints");
        }
    }

    #[test]
    fn pond_gifts_rest_on_the_ice() {
        let (config, gifts, _) = generate();
        let pond_gifts: Vec<&Gift> =
            gifts.iter().filter(|g| g.kind == GiftKind::CandyCane).collect();
        // At least the pond strategy's four; scatter may add more.
        assert!(pond_gifts.len() >= config.placement.pond_gift_count);
        let expected_y = (ICE_LEVEL + 1) as f32 + config.placement.pond_lift;
        let on_ice = pond_gifts
            .iter()
            .filter(|g| {
                let dx = g.position.x - POND_CENTER.0;
                let dz = g.position.z - POND_CENTER.1;
                (dx * dx + dz * dz).sqrt() < POND_RADIUS && g.position.y == expected_y
            })
            .count();
        assert!(on_ice >= config.placement.pond_gift_count);
    }

    #[test]
    fn scatter_respects_center_exclusion() {
        let (config, gifts, _) = generate();
        let fixed = config.placement.tree_gift_count
            + config.placement.pond_gift_count
            + config.buildings.len() * 2;
        for gift in gifts.iter().skip(fixed) {
            let d = (gift.position.x * gift.position.x + gift.position.z * gift.position.z).sqrt();
            assert!(
                d >= config.placement.scatter_exclusion_radius,
                "scatter gift inside the exclusion radius: d={d}"
            );
        }
    }

    #[test]
    fn snowman_placement() {
        let (config, _, snowmen) = generate();
        assert_eq!(snowmen.len(), config.snowmen.count);
        // The first two use the scenic coordinates verbatim.
        for (snowman, &(x, z)) in snowmen.iter().zip(&config.snowmen.scenic_positions) {
            assert_eq!(snowman.position.x, x);
            assert_eq!(snowman.position.z, z);
        }
        for snowman in &snowmen {
            assert_eq!(snowman.hit_points, config.snowmen.initial_hit_points);
            assert!(!snowman.is_dead);
            let d = (snowman.position.x * snowman.position.x
                + snowman.position.z * snowman.position.z)
                .sqrt();
            // Random spawns honor the exclusion radius; scenic and
            // fallback spots are outside it by construction.
            assert!(d >= config.snowmen.exclusion_radius);
            // Grounded on the shared height function.
            let expected = (terrain_height(snowman.position.x, snowman.position.z) + 1) as f32;
            assert_eq!(snowman.position.y, expected);
        }
    }

    #[test]
    fn placement_is_deterministic() {
        let config = GameConfig::default();
        let mut a = GameRng::new(9);
        let mut b = GameRng::new(9);
        assert_eq!(generate_gifts(&config, &mut a), generate_gifts(&config, &mut b));
        assert_eq!(generate_snowmen(&config, &mut a), generate_snowmen(&config, &mut b));
    }
}
