// Data-driven game configuration.
//
// All tunable generation and session parameters live here in `GameConfig`.
// The generator and placement code never use magic numbers — they read from
// the config, so scene variants (bigger world, more gifts) are a parameter
// edit, not a code change. The `Default` impl is the canonical scene: the
// values the shipped winter scene is generated from.
//
// Parameters are grouped into nested structs by pipeline stage:
// `WorldParams` (terrain layering), `TreeParams` (the giant tree),
// `PathParams`/`LampParams` (the path network), `BuildingFootprint` (the
// four cottages), `PlacementParams` (gift strategies), `SnowmanParams`,
// and `SessionParams` (goal and reward rules).
//
// The pond and hub geometry is deliberately NOT here — it lives as consts
// in `terrain.rs`, because the terrain height function must be bit-identical
// wherever it is evaluated and may not drift behind a configurable value.
//
// See also: `worldgen.rs` and `placement.rs` which consume these groups,
// `session.rs` for `SessionParams`, `terrain.rs` for the shared consts.
//
// **Critical constraint: determinism.** Config values feed directly into
// generation; identical configs and seeds produce identical worlds.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Terrain layering
// ---------------------------------------------------------------------------

/// Bounded square region and column-fill parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldParams {
    /// Half-extent of the generated region in voxels, centered on origin.
    pub radius: i32,
    /// Width of the dirt rim band around the pond, in voxels.
    pub rim_width: f32,
    /// Surface elevation of the pond rim band.
    pub rim_elevation: i32,
    /// Layers below the surface painted with the crust color.
    pub crust_depth: i32,
    /// Layers painted at the bottom of each column.
    pub bottom_band: i32,
    /// Minimum column depth at the world rim.
    pub bottom_base_depth: f32,
    /// Extra depth at the world center, falling off linearly to the rim.
    pub bottom_center_bonus: f32,
}

// ---------------------------------------------------------------------------
// The giant tree
// ---------------------------------------------------------------------------

/// Giant conifer at the world center.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeParams {
    /// Top of the trunk; the canopy starts one voxel above.
    pub trunk_height: i32,
    /// Top of the canopy. The star sits above this.
    pub height: i32,
    /// Canopy radius at the bottom of the canopy.
    pub base_radius: f32,
    /// Amplitude of the sinusoidal canopy-width perturbation.
    pub wobble_amplitude: f32,
    /// Vertical frequency of the canopy-width perturbation.
    pub wobble_frequency: f32,
    /// Probability an interior canopy cell is filled.
    pub interior_fill: f64,
    /// Probability an edge cell becomes a glowing ornament.
    pub ornament_chance: f64,
    /// Sine threshold above which an edge cell joins a spiral light band.
    pub spiral_threshold: f32,
    /// Angular frequency of the spiral bands (turns around the trunk).
    pub spiral_angle_frequency: f32,
    /// Vertical frequency of the spiral bands.
    pub spiral_height_frequency: f32,
    /// Star center height above the canopy top.
    pub star_offset: i32,
}

// ---------------------------------------------------------------------------
// Paths and lamps
// ---------------------------------------------------------------------------

/// Path rasterization parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathParams {
    /// Perpendicular padding on each side of a path centerline, in voxels.
    pub half_width: i32,
    /// Sampling step along a segment when stamping path cells.
    pub sample_step: f32,
}

/// Lamp post placement along path segments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LampParams {
    /// Segments shorter than this get no lamps.
    pub min_segment_length: f32,
    /// Approximate distance between lamps along a segment.
    pub spacing: f32,
    /// Perpendicular offset of a lamp post from the path centerline.
    pub side_offset: f32,
    /// Height of the lamp pole above the path surface.
    pub pole_height: i32,
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// One cottage footprint. Width and depth are odd so the center sits on the
/// lattice. `rotated` turns the front (door) face from +Z to +X.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BuildingFootprint {
    pub center: (i32, i32),
    pub width: i32,
    pub depth: i32,
    pub height: i32,
    pub rotated: bool,
}

impl BuildingFootprint {
    /// Half-extent along X.
    pub fn half_width(&self) -> i32 {
        self.width / 2
    }

    /// Half-extent along Z.
    pub fn half_depth(&self) -> i32 {
        self.depth / 2
    }

    /// The point just outside the door where the path from the world center
    /// arrives.
    pub fn door_approach(&self) -> (f32, f32) {
        let (cx, cz) = self.center;
        if self.rotated {
            ((cx + self.half_width() + 2) as f32, cz as f32)
        } else {
            (cx as f32, (cz + self.half_depth() + 2) as f32)
        }
    }
}

// ---------------------------------------------------------------------------
// Gift placement
// ---------------------------------------------------------------------------

/// Parameters for the four gift placement strategies.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlacementParams {
    /// Nominal total gift count; scatter fills up to this.
    pub gift_target: usize,
    /// Gifts placed on the tree canopy surface.
    pub tree_gift_count: usize,
    /// Height-fraction band on the canopy where tree gifts may sit.
    pub tree_band: (f32, f32),
    /// Radial offset outside the canopy surface.
    pub tree_radial_offset: f32,
    /// Inset from building walls for interior gifts.
    pub building_margin: f32,
    /// Vertical lift above the building floor.
    pub building_lift: f32,
    /// Gifts placed on the pond ice.
    pub pond_gift_count: usize,
    /// Keep pond gifts this far inside the pond radius.
    pub pond_inset: f32,
    /// Vertical lift above the ice surface.
    pub pond_lift: f32,
    /// Half-extent of the square the scatter strategy samples from.
    pub scatter_extent: f32,
    /// No scatter gifts inside this radius around the world center.
    pub scatter_exclusion_radius: f32,
    /// Attempts per scatter gift before giving up on it.
    pub scatter_retry_cap: usize,
    /// Vertical lift above the terrain surface.
    pub scatter_lift: f32,
}

// ---------------------------------------------------------------------------
// Snowmen
// ---------------------------------------------------------------------------

/// Snowman enemy placement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnowmanParams {
    /// Total snowman count.
    pub count: usize,
    /// Hand-picked scenic positions for the first snowmen.
    pub scenic_positions: Vec<(f32, f32)>,
    /// Random snowmen spawn within this radius of the center.
    pub spawn_radius: f32,
    /// No snowmen inside this radius around the world center.
    pub exclusion_radius: f32,
    /// Sampling attempts before falling back to `fallback_position`.
    pub retry_cap: usize,
    /// Used when sampling keeps landing in the exclusion zone.
    pub fallback_position: (f32, f32),
    /// Starting hit points.
    pub initial_hit_points: i32,
}

// ---------------------------------------------------------------------------
// Session rules
// ---------------------------------------------------------------------------

/// Win condition and reward rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionParams {
    /// Collected-gift count at which the game is won.
    pub total_goal: u32,
    /// Reward gift ids are `offset + snowman id`. Placement ids must stay
    /// below this — `GameSession::new` asserts it.
    pub reward_gift_id_offset: u32,
    /// Vertical lift of a reward gift above the defeated snowman.
    pub reward_lift: f32,
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Complete configuration for one generated scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub world: WorldParams,
    pub tree: TreeParams,
    pub paths: PathParams,
    pub lamps: LampParams,
    pub buildings: Vec<BuildingFootprint>,
    pub placement: PlacementParams,
    pub snowmen: SnowmanParams,
    pub session: SessionParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldParams {
                radius: 90,
                rim_width: 3.0,
                rim_elevation: -1,
                crust_depth: 2,
                bottom_band: 2,
                bottom_base_depth: 4.0,
                bottom_center_bonus: 5.0,
            },
            tree: TreeParams {
                trunk_height: 6,
                height: 34,
                base_radius: 12.0,
                wobble_amplitude: 0.8,
                wobble_frequency: 0.9,
                interior_fill: 0.3,
                ornament_chance: 0.05,
                spiral_threshold: 0.8,
                spiral_angle_frequency: 2.0,
                spiral_height_frequency: 0.55,
                star_offset: 2,
            },
            paths: PathParams {
                half_width: 2,
                sample_step: 0.5,
            },
            lamps: LampParams {
                min_segment_length: 10.0,
                spacing: 12.0,
                side_offset: 4.0,
                pole_height: 5,
            },
            buildings: vec![
                BuildingFootprint {
                    center: (42, 18),
                    width: 13,
                    depth: 11,
                    height: 8,
                    rotated: false,
                },
                BuildingFootprint {
                    center: (-44, -22),
                    width: 11,
                    depth: 9,
                    height: 7,
                    rotated: true,
                },
                BuildingFootprint {
                    center: (18, 52),
                    width: 13,
                    depth: 9,
                    height: 8,
                    rotated: false,
                },
                BuildingFootprint {
                    center: (-12, -54),
                    width: 15,
                    depth: 11,
                    height: 9,
                    rotated: true,
                },
            ],
            placement: PlacementParams {
                gift_target: 30,
                tree_gift_count: 12,
                tree_band: (0.15, 0.85),
                tree_radial_offset: 1.5,
                building_margin: 2.0,
                building_lift: 0.5,
                pond_gift_count: 4,
                pond_inset: 2.0,
                pond_lift: 0.4,
                scatter_extent: 80.0,
                scatter_exclusion_radius: 6.0,
                scatter_retry_cap: 50,
                scatter_lift: 0.4,
            },
            snowmen: SnowmanParams {
                count: 5,
                scenic_positions: vec![(-24.0, 20.0), (30.0, 38.0)],
                spawn_radius: 70.0,
                exclusion_radius: 8.0,
                retry_cap: 20,
                fallback_position: (48.0, -35.0),
                initial_hit_points: 3,
            },
            session: SessionParams {
                total_goal: 30,
                reward_gift_id_offset: 1000,
                reward_lift: 1.5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_four_buildings() {
        let config = GameConfig::default();
        assert_eq!(config.buildings.len(), 4);
        // Odd footprints keep centers on the lattice.
        for b in &config.buildings {
            assert_eq!(b.width % 2, 1, "width must be odd");
            assert_eq!(b.depth % 2, 1, "depth must be odd");
        }
    }

    #[test]
    fn door_approach_sits_outside_footprint() {
        let b = BuildingFootprint {
            center: (10, 10),
            width: 13,
            depth: 11,
            height: 8,
            rotated: false,
        };
        let (ax, az) = b.door_approach();
        assert_eq!(ax, 10.0);
        assert!(az > (10 + b.half_depth()) as f32);

        let r = BuildingFootprint { rotated: true, ..b };
        let (ax, az) = r.door_approach();
        assert!(ax > (10 + r.half_width()) as f32);
        assert_eq!(az, 10.0);
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.buildings.len(), config.buildings.len());
        assert_eq!(restored.placement.gift_target, 30);
        assert_eq!(restored.session.total_goal, 30);
    }

    #[test]
    fn goal_matches_gift_target() {
        // The win condition counts gifts; the nominal placement target and
        // the session goal must agree.
        let config = GameConfig::default();
        assert_eq!(config.session.total_goal as usize, config.placement.gift_target);
    }
}
