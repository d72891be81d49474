// Procedural world generation.
//
// Builds the complete static scene — path network with lamp posts, four
// brick cottages with doors, layered terrain columns, the frozen pond, and
// the giant tree with its light spirals and star — as immutable voxel and
// descriptor sets. Runs once, synchronously, before any gameplay
// interaction; the session never mutates `WorldData`.
//
// The pipeline is ordered: paths are carved first because the terrain
// stage consults the path-height map when deciding column elevations, and
// everything funnels through one occupancy-checked insertion so stages
// that geometrically overlap (a path under a cottage wall, the tree over
// the hub plaza) never emit two voxels on the same lattice cell. First
// writer wins; later writes are silently dropped.
//
// The occupancy set and path-height map are local to the generator context
// and thrown away with it — no module-level state. They are hash
// collections (`rustc-hash`) rather than BTree collections because they
// are only ever used for membership tests, never iterated for output, so
// iteration order cannot leak into the result.
//
// See also: `terrain.rs` for the shared height/canopy contract,
// `config.rs` for every tunable literal, `placement.rs` which grounds
// gameplay objects on the same terrain function.
//
// **Critical constraint: determinism.** All randomness comes from the
// `GameRng` passed by the caller; identical config + seed produce an
// identical `WorldData`.

use crate::config::{BuildingFootprint, GameConfig};
use crate::palette;
use crate::prng::GameRng;
use crate::terrain::{
    self, HUB_RADIUS, ICE_LEVEL, POND_CENTER, POND_RADIUS, WATER_LEVEL, terrain_height,
};
use crate::types::{Door, LampPost, Voxel, VoxelCoord, WorldPos};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Star glow rays: ten fixed directions with per-ray lengths, extending
/// outward from the diamond core.
const STAR_RAYS: [(VoxelCoord, i32); 10] = [
    (VoxelCoord::new(1, 0, 0), 3),
    (VoxelCoord::new(-1, 0, 0), 3),
    (VoxelCoord::new(0, 1, 0), 4),
    (VoxelCoord::new(0, -1, 0), 2),
    (VoxelCoord::new(0, 0, 1), 3),
    (VoxelCoord::new(0, 0, -1), 3),
    (VoxelCoord::new(1, 1, 0), 2),
    (VoxelCoord::new(-1, 1, 0), 2),
    (VoxelCoord::new(0, 1, 1), 2),
    (VoxelCoord::new(0, 1, -1), 2),
];

/// Everything the generator produces. Immutable after generation; the
/// rendering layer reads it, the session never touches it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldData {
    /// Opaque, shadow-casting voxels.
    pub regular: Vec<Voxel>,
    /// Emissive voxels (light strings, ornaments, star, lamp bulbs).
    pub glowing: Vec<Voxel>,
    /// The pond's interactive top surface layer, one voxel per column.
    pub ice: Vec<Voxel>,
    /// Decorative water under the ice air gap.
    pub water: Vec<Voxel>,
    /// One door per cottage.
    pub doors: Vec<Door>,
    /// Derived light positions along the paths.
    pub lamps: Vec<LampPost>,
}

/// Generate the full scene. The only entry point of this module.
pub fn generate_world(config: &GameConfig, rng: &mut GameRng) -> WorldData {
    let mut g = WorldGenerator {
        config,
        rng,
        occupied: FxHashSet::default(),
        path_height: FxHashMap::default(),
        out: WorldData::default(),
    };
    g.carve_paths();
    g.build_cottages();
    g.fill_terrain();
    g.grow_tree();
    g.out
}

/// Generation context: the occupancy set, the path-height map, and the
/// accumulating output. Lives only for the duration of `generate_world`.
struct WorldGenerator<'a> {
    config: &'a GameConfig,
    rng: &'a mut GameRng,
    /// Every claimed lattice cell, across all four voxel sets.
    occupied: FxHashSet<VoxelCoord>,
    /// XZ cells covered by a path, with their fixed elevation.
    path_height: FxHashMap<(i32, i32), i32>,
    out: WorldData,
}

impl WorldGenerator<'_> {
    // -----------------------------------------------------------------------
    // Occupancy-checked emission
    // -----------------------------------------------------------------------

    fn push_regular(&mut self, coord: VoxelCoord, color: u32) {
        if self.occupied.insert(coord) {
            self.out.regular.push(Voxel::new(coord, color));
        }
    }

    /// Returns whether the voxel was emitted, so callers that derive a
    /// descriptor from the cell (the lamp bulb) can skip it on collision.
    fn push_glowing(&mut self, coord: VoxelCoord, color: u32) -> bool {
        if self.occupied.insert(coord) {
            self.out.glowing.push(Voxel::new(coord, color));
            return true;
        }
        false
    }

    fn push_ice(&mut self, coord: VoxelCoord, color: u32) {
        if self.occupied.insert(coord) {
            self.out.ice.push(Voxel::new(coord, color));
        }
    }

    fn push_water(&mut self, coord: VoxelCoord, color: u32) {
        if self.occupied.insert(coord) {
            self.out.water.push(Voxel::new(coord, color));
        }
    }

    // -----------------------------------------------------------------------
    // Stage 1: path network and lamp posts
    // -----------------------------------------------------------------------

    /// The path waypoint on the pond shore, on the line from the world
    /// center to the pond center.
    fn pond_waypoint() -> (f32, f32) {
        let (px, pz) = POND_CENTER;
        let len = (px * px + pz * pz).sqrt();
        let margin = POND_RADIUS + 4.0;
        (px - px / len * margin, pz - pz / len * margin)
    }

    /// Centerline segments: world center to each cottage door, plus ring
    /// connections between fixed cottage pairs and the pond shore.
    fn path_segments(&self) -> Vec<((f32, f32), (f32, f32))> {
        let approaches: Vec<(f32, f32)> = self
            .config
            .buildings
            .iter()
            .map(BuildingFootprint::door_approach)
            .collect();
        let pond = Self::pond_waypoint();

        let mut segments: Vec<((f32, f32), (f32, f32))> =
            approaches.iter().map(|&a| ((0.0, 0.0), a)).collect();
        // Ring: cottage 0 <-> 2, cottage 1 <-> pond shore <-> cottage 3.
        segments.push((approaches[0], approaches[2]));
        segments.push((approaches[1], pond));
        segments.push((pond, approaches[3]));
        segments
    }

    fn carve_paths(&mut self) {
        for (a, b) in self.path_segments() {
            self.stamp_segment(a, b);
            self.place_lamps(a, b);
        }
    }

    /// Stamp the path-height map along a segment with perpendicular width
    /// padding. Path elevation is fixed at 0.
    fn stamp_segment(&mut self, a: (f32, f32), b: (f32, f32)) {
        let (dx, dz) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dz * dz).sqrt();
        if len == 0.0 {
            return;
        }
        let (perp_x, perp_z) = (-dz / len, dx / len);
        let steps = (len / self.config.paths.sample_step).ceil() as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let px = a.0 + dx * t;
            let pz = a.1 + dz * t;
            for off in -self.config.paths.half_width..=self.config.paths.half_width {
                let cx = (px + perp_x * off as f32).round() as i32;
                let cz = (pz + perp_z * off as f32).round() as i32;
                self.path_height.insert((cx, cz), 0);
            }
        }
    }

    /// Evenly spaced lamp posts on alternating sides of a segment. Only
    /// segments longer than the configured minimum get lamps.
    fn place_lamps(&mut self, a: (f32, f32), b: (f32, f32)) {
        let lamps = &self.config.lamps;
        let (dx, dz) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dz * dz).sqrt();
        if len <= lamps.min_segment_length {
            return;
        }
        let (perp_x, perp_z) = (-dz / len, dx / len);
        let count = ((len / lamps.spacing).floor() as usize).max(1);
        for k in 0..count {
            let t = (k + 1) as f32 / (count + 1) as f32;
            let side = if k % 2 == 0 { 1.0 } else { -1.0 };
            let px = (a.0 + dx * t + perp_x * side * lamps.side_offset).round() as i32;
            let pz = (a.1 + dz * t + perp_z * side * lamps.side_offset).round() as i32;
            // Arm points back toward the path centerline.
            let mut adx = (-perp_x * side).round() as i32;
            let adz = (-perp_z * side).round() as i32;
            if adx == 0 && adz == 0 {
                adx = 1;
            }
            self.place_lamp_post(px, pz, adx, adz, lamps.pole_height);
        }
    }

    /// One lamp post: pole, arm, four bulb fixtures, one emissive bulb.
    fn place_lamp_post(&mut self, px: i32, pz: i32, adx: i32, adz: i32, pole_height: i32) {
        for y in 1..=pole_height {
            self.push_regular(VoxelCoord::new(px, y, pz), palette::BARK);
        }
        let (bx, bz) = (px + adx, pz + adz);
        // Arm above the bulb, fixtures below and around it.
        self.push_regular(VoxelCoord::new(bx, pole_height + 1, bz), palette::IRON);
        self.push_regular(VoxelCoord::new(bx, pole_height - 1, bz), palette::IRON);
        self.push_regular(VoxelCoord::new(px + 2 * adx, pole_height, pz + 2 * adz), palette::IRON);
        self.push_regular(VoxelCoord::new(bx + adz, pole_height, bz - adx), palette::IRON);
        self.push_regular(VoxelCoord::new(bx - adz, pole_height, bz + adx), palette::IRON);
        let bulb = VoxelCoord::new(bx, pole_height, bz);
        // No LampPost without its bulb voxel: if another stage already
        // claimed the cell, this post stays dark.
        if self.push_glowing(bulb, palette::LAMP_GLOW) {
            self.out.lamps.push(LampPost { bulb });
        }
    }

    // -----------------------------------------------------------------------
    // Stage 2: cottages
    // -----------------------------------------------------------------------

    fn build_cottages(&mut self) {
        let config = self.config;
        for building in &config.buildings {
            self.build_cottage(building);
        }
    }

    fn build_cottage(&mut self, b: &BuildingFootprint) {
        let (cx, cz) = b.center;
        let (hw, hd) = (b.half_width(), b.half_depth());
        let (min_x, max_x) = (cx - hw, cx + hw);
        let (min_z, max_z) = (cz - hd, cz + hd);

        // Door gap: 2 wide, 3 tall, centered on the front face.
        let in_door_gap = |x: i32, y: i32, z: i32| -> bool {
            if !(1..=3).contains(&y) {
                return false;
            }
            if b.rotated {
                x == max_x && (z == cz || z == cz + 1)
            } else {
                z == max_z && (x == cx || x == cx + 1)
            }
        };

        // Wall shell: outer ring only, alternating brick courses.
        for y in 1..=b.height {
            for x in min_x..=max_x {
                for z in min_z..=max_z {
                    let on_ring = x == min_x || x == max_x || z == min_z || z == max_z;
                    if !on_ring || in_door_gap(x, y, z) {
                        continue;
                    }
                    let color = if (x + z + (y % 2)) % 2 == 0 {
                        palette::BRICK_LIGHT
                    } else {
                        palette::BRICK_DARK
                    };
                    self.push_regular(VoxelCoord::new(x, y, z), color);
                }
            }
        }

        // One door per cottage, hinged at the gap's fixed-side edge.
        let door = if b.rotated {
            Door {
                position: WorldPos::new(max_x as f32, 1.0, cz as f32),
                yaw: FRAC_PI_2,
                open: false,
            }
        } else {
            Door {
                position: WorldPos::new(cx as f32, 1.0, max_z as f32),
                yaw: 0.0,
                open: false,
            }
        };
        self.out.doors.push(door);

        // Floor layer.
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                self.push_regular(VoxelCoord::new(x, 0, z), palette::WOOD_FLOOR);
            }
        }

        // Tapered roof: each level insets by one; the outer ring of every
        // level carries the snow dusting.
        let levels = hw.min(hd);
        for i in 0..=levels {
            let y = b.height + 1 + i;
            for x in (min_x + i)..=(max_x - i) {
                for z in (min_z + i)..=(max_z - i) {
                    let on_edge =
                        x == min_x + i || x == max_x - i || z == min_z + i || z == max_z - i;
                    let color = if on_edge { palette::SNOW } else { palette::ROOF };
                    self.push_regular(VoxelCoord::new(x, y, z), color);
                }
            }
        }

        // Chimney pokes through the roof near the back corner; smoke puffs
        // above the stack are probabilistic.
        let (chx, chz) = (max_x - 2, min_z + 2);
        let stack_top = b.height + levels + 2;
        for y in (b.height + 1)..=stack_top {
            self.push_regular(VoxelCoord::new(chx, y, chz), palette::CHIMNEY);
        }
        for k in 1..=3 {
            if self.rng.random_bool(0.5) {
                self.push_regular(
                    VoxelCoord::new(chx + k % 2, stack_top + k, chz),
                    palette::SMOKE,
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // Stage 3: terrain columns and the pond
    // -----------------------------------------------------------------------

    fn fill_terrain(&mut self) {
        let radius = self.config.world.radius;
        for x in -radius..=radius {
            for z in -radius..=radius {
                if x * x + z * z > radius * radius {
                    continue;
                }
                self.fill_column(x, z);
            }
        }
    }

    fn fill_column(&mut self, x: i32, z: i32) {
        let (xf, zf) = (x as f32, z as f32);
        let dpx = xf - POND_CENTER.0;
        let dpz = zf - POND_CENTER.1;
        let pond_dist = (dpx * dpx + dpz * dpz).sqrt();

        if pond_dist < POND_RADIUS {
            self.fill_pond_column(x, z);
            return;
        }

        // Surface priority: pond rim > path > hub > noise terrain.
        let world = &self.config.world;
        let hub_dist = (xf * xf + zf * zf).sqrt();
        let (surface, surface_color) = if pond_dist < POND_RADIUS + world.rim_width {
            (world.rim_elevation, palette::DIRT)
        } else if let Some(&h) = self.path_height.get(&(x, z)) {
            (h, palette::PATH)
        } else if hub_dist < HUB_RADIUS {
            (0, palette::PATH)
        } else {
            // Outside pond and hub, the shared height function reduces to
            // the noise branch — same constants, same evaluation order.
            (terrain_height(xf, zf), palette::SNOW)
        };

        // Column bottom: deeper near the center, shallower at the rim,
        // with its own surface noise.
        let falloff = (1.0 - hub_dist / world.radius as f32).max(0.0);
        let depth = world.bottom_base_depth
            + falloff * world.bottom_center_bonus
            + (xf * 0.17).sin() * (zf * 0.13).cos() * 1.5;
        let bottom = surface - (depth.round() as i32).max(world.crust_depth + 1);

        // Surface voxel, crust band below it, base band at the bottom.
        // The middle of the column stays unfilled — it is never visible.
        self.push_regular(VoxelCoord::new(x, surface, z), surface_color);
        for y in (surface - world.crust_depth)..surface {
            self.push_regular(VoxelCoord::new(x, y, z), palette::SNOW_CRUST);
        }
        for y in bottom..(bottom + world.bottom_band) {
            self.push_regular(VoxelCoord::new(x, y, z), palette::STONE);
        }
    }

    /// Pond columns: interactive ice pane, an intentional air gap, one
    /// water voxel at the water line, then solid lakebed.
    fn fill_pond_column(&mut self, x: i32, z: i32) {
        self.push_ice(VoxelCoord::new(x, ICE_LEVEL, z), palette::ICE);
        // Air gap between ICE_LEVEL and WATER_LEVEL: emit nothing.
        self.push_water(VoxelCoord::new(x, WATER_LEVEL, z), palette::WATER);
        for y in (WATER_LEVEL - 2)..WATER_LEVEL {
            self.push_regular(VoxelCoord::new(x, y, z), palette::LAKEBED);
        }
    }

    // -----------------------------------------------------------------------
    // Stage 4: the giant tree and its star
    // -----------------------------------------------------------------------

    fn grow_tree(&mut self) {
        let tree = &self.config.tree;

        // Tapering trunk: thick at the base, narrow at the top.
        for y in 1..=tree.trunk_height {
            let r = if y <= tree.trunk_height / 2 { 2 } else { 1 };
            for dx in -r..=r {
                for dz in -r..=r {
                    if dx * dx + dz * dz <= r * r {
                        self.push_regular(VoxelCoord::new(dx, y, dz), palette::BARK);
                    }
                }
            }
        }

        // Conifer canopy: horizontal discs shrinking with height.
        for y in terrain::canopy_base(tree)..=tree.height {
            let r = terrain::canopy_radius(y as f32, tree);
            let ri = r.ceil() as i32;
            for dx in -ri..=ri {
                for dz in -ri..=ri {
                    let d = ((dx * dx + dz * dz) as f32).sqrt();
                    if d > r {
                        continue;
                    }
                    if d < r - 1.3 {
                        // Interior: sparse probabilistic fill.
                        if self.rng.random_bool(tree.interior_fill) {
                            self.push_needle(dx, y, dz);
                        }
                        continue;
                    }
                    // Edge cell: spiral light string, ornament, or needle.
                    let angle = (dz as f32).atan2(dx as f32);
                    let s = angle * tree.spiral_angle_frequency
                        + y as f32 * tree.spiral_height_frequency;
                    if s.sin() > tree.spiral_threshold {
                        self.push_glowing(VoxelCoord::new(dx, y, dz), palette::LIGHT_WARM);
                    } else if (s + std::f32::consts::PI).sin() > tree.spiral_threshold {
                        self.push_glowing(VoxelCoord::new(dx, y, dz), palette::LIGHT_COLD);
                    } else if self.rng.random_bool(tree.ornament_chance) {
                        let color =
                            palette::ORNAMENT_COLORS[self.rng.range_usize(0, palette::ORNAMENT_COLORS.len())];
                        self.push_glowing(VoxelCoord::new(dx, y, dz), color);
                    } else {
                        self.push_needle(dx, y, dz);
                    }
                }
            }
        }

        self.place_star(tree.height + tree.star_offset);
    }

    fn push_needle(&mut self, dx: i32, y: i32, dz: i32) {
        let color = if (dx + dz + y) % 2 == 0 {
            palette::NEEDLE_DARK
        } else {
            palette::NEEDLE_LIGHT
        };
        self.push_regular(VoxelCoord::new(dx, y, dz), color);
    }

    /// Diamond star with glow rays along ten fixed directions.
    fn place_star(&mut self, center_y: i32) {
        for dx in -2..=2_i32 {
            for dy in -2..=2_i32 {
                for dz in -2..=2_i32 {
                    if dx.abs() + dy.abs() + dz.abs() <= 2 {
                        self.push_glowing(
                            VoxelCoord::new(dx, center_y + dy, dz),
                            palette::STAR_GOLD,
                        );
                    }
                }
            }
        }
        for (dir, len) in STAR_RAYS {
            for step in 3..(3 + len) {
                self.push_glowing(
                    VoxelCoord::new(
                        dir.x * step,
                        center_y + dir.y * step,
                        dir.z * step,
                    ),
                    palette::STAR_GOLD,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn generate() -> WorldData {
        let config = GameConfig::default();
        let mut rng = GameRng::new(42);
        generate_world(&config, &mut rng)
    }

    #[test]
    fn no_two_voxels_share_a_cell() {
        let world = generate();
        let mut seen = FxHashSet::default();
        let all = world
            .regular
            .iter()
            .chain(&world.glowing)
            .chain(&world.ice)
            .chain(&world.water);
        for v in all {
            assert!(seen.insert(v.coord), "duplicate voxel at {}", v.coord);
        }
    }

    #[test]
    fn one_door_per_building_on_its_front_edge() {
        let config = GameConfig::default();
        let world = generate();
        assert_eq!(world.doors.len(), config.buildings.len());
        for (door, b) in world.doors.iter().zip(&config.buildings) {
            if b.rotated {
                assert_eq!(door.position.x, (b.center.0 + b.half_width()) as f32);
                assert_eq!(door.position.z, b.center.1 as f32);
            } else {
                assert_eq!(door.position.x, b.center.0 as f32);
                assert_eq!(door.position.z, (b.center.1 + b.half_depth()) as f32);
            }
            assert!(!door.open);
        }
    }

    #[test]
    fn pond_column_layering() {
        let world = generate();
        let center = VoxelCoord::new(POND_CENTER.0 as i32, ICE_LEVEL, POND_CENTER.1 as i32);
        assert!(world.ice.iter().any(|v| v.coord == center));
        let water = VoxelCoord::new(POND_CENTER.0 as i32, WATER_LEVEL, POND_CENTER.1 as i32);
        assert!(world.water.iter().any(|v| v.coord == water));
        // The air gap between the ice and the water line is empty.
        for y in (WATER_LEVEL + 1)..ICE_LEVEL {
            let gap = VoxelCoord::new(POND_CENTER.0 as i32, y, POND_CENTER.1 as i32);
            assert!(
                world.regular.iter().all(|v| v.coord != gap),
                "air gap filled at {gap}"
            );
        }
    }

    #[test]
    fn hub_is_flat_path_surface() {
        let world = generate();
        let hub_cell = VoxelCoord::new(1, 0, 1);
        let voxel = world.regular.iter().find(|v| v.coord == hub_cell);
        assert_eq!(voxel.map(|v| v.color), Some(palette::PATH));
    }

    #[test]
    fn lamps_registered_and_glowing() {
        // Every registered lamp must own its bulb voxel, whatever the
        // seed: a bulb cell lost to an occupancy collision must drop the
        // LampPost with it.
        for seed in [1, 7, 42, 99, 1234, 31337] {
            let config = GameConfig::default();
            let mut rng = GameRng::new(seed);
            let world = generate_world(&config, &mut rng);
            assert!(!world.lamps.is_empty(), "long segments must place lamps");
            for lamp in &world.lamps {
                assert!(
                    world.glowing.iter().any(|v| v.coord == lamp.bulb),
                    "seed {seed}: lamp bulb {} missing from glowing set",
                    lamp.bulb
                );
            }
        }
    }

    #[test]
    fn star_sits_atop_the_tree() {
        let config = GameConfig::default();
        let world = generate();
        let star_center =
            VoxelCoord::new(0, config.tree.height + config.tree.star_offset, 0);
        assert!(world.glowing.iter().any(|v| v.coord == star_center));
    }

    #[test]
    fn tree_emits_light_string_voxels() {
        let world = generate();
        let warm = world.glowing.iter().filter(|v| v.color == palette::LIGHT_WARM).count();
        let cold = world.glowing.iter().filter(|v| v.color == palette::LIGHT_COLD).count();
        assert!(warm > 10, "expected a warm spiral band, got {warm} voxels");
        assert!(cold > 10, "expected a cold spiral band, got {cold} voxels");
    }

    #[test]
    fn generation_is_deterministic() {
        let config = GameConfig::default();
        let mut rng_a = GameRng::new(7);
        let mut rng_b = GameRng::new(7);
        let a = generate_world(&config, &mut rng_a);
        let b = generate_world(&config, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn terrain_columns_stay_within_radius() {
        let config = GameConfig::default();
        let world = generate();
        let r = config.world.radius;
        for v in &world.regular {
            // Lamp fixtures and roof voxels all derive from in-radius
            // features; allow a small margin for lamp arms.
            assert!(
                v.coord.x.abs() <= r + 2 && v.coord.z.abs() <= r + 2,
                "voxel outside region at {}",
                v.coord
            );
        }
    }
}
