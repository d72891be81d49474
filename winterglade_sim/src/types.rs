// Core types shared across the simulation.
//
// Defines the voxel lattice coordinate, the colored voxel emitted by world
// generation, continuous entity positions, compact integer entity ids, and
// the gameplay entities themselves (`Gift`, `Snowman`) plus the derived
// world objects (`Door`, `LampPost`). All types derive `Serialize` and
// `Deserialize` so the rendering layer can consume plain state snapshots.
//
// Entity ids are plain `u32` newtypes rather than UUIDs: the whole entity
// population is generated once at session start from fixed parameters, so
// a small incrementing id space is enough — and the reward-gift id scheme
// in `session.rs` relies on ids being small integers.
//
// See also: `worldgen.rs` which emits `Voxel`s, `placement.rs` which
// creates `Gift`/`Snowman`, `session.rs` which owns and mutates them.
//
// **Critical constraint: determinism.** Ids are allocated in generation
// order; `BTreeMap` registries keyed by these ids iterate identically on
// every run.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position on the integer voxel lattice. Each component is in voxel units.
///
/// Right-handed axes: X east, Y up, Z south. The world is centered on the
/// origin; the giant tree stands at (0, _, 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A unit cube of the generated world: lattice coordinate plus a packed
/// 0xRRGGBB color. Whether it casts shadows or glows is decided by which
/// output set it lands in (`WorldData::regular` vs `WorldData::glowing`),
/// not by a flag on the voxel itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voxel {
    pub coord: VoxelCoord,
    pub color: u32,
}

impl Voxel {
    pub const fn new(coord: VoxelCoord, color: u32) -> Self {
        Self { coord, color }
    }
}

/// A continuous position in world space, used for gameplay entities that
/// rest on (rather than occupy) the voxel lattice.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

// ---------------------------------------------------------------------------
// Entity ids
// ---------------------------------------------------------------------------

/// Compact identifier for a collectible gift.
///
/// Placement-generated gifts get incrementing ids starting at 1. Reward
/// gifts spawned by snowman defeat use `reward_gift_id_offset + snowman id`
/// (see `session.rs`), so placement must never allocate that high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GiftId(pub u32);

/// Compact identifier for a snowman enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnowmanId(pub u32);

impl fmt::Display for GiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GiftId({})", self.0)
    }
}

impl fmt::Display for SnowmanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnowmanId({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Gameplay entities
// ---------------------------------------------------------------------------

/// The fixed set of collectible shapes the renderer knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftKind {
    PlainBox,
    CandyCane,
    Ornament,
    Stocking,
    Gingerbread,
    Star,
}

/// A collectible item.
///
/// Created once at session start (or as a snowman-defeat reward), mutated
/// only by the collect transition. Collected gifts are never removed from
/// the registry — the renderer filters on `collected` instead.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub id: GiftId,
    pub position: WorldPos,
    pub color: u32,
    pub kind: GiftKind,
    pub collected: bool,
    /// Initial tilt/spin in radians, `None` for reward gifts which spawn
    /// upright.
    pub rotation: Option<[f32; 3]>,
}

/// A destructible snowman enemy.
///
/// `is_dead` is true exactly when `hit_points` has reached zero; the hit
/// transition in `session.rs` is the only mutator and keeps the two fields
/// consistent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snowman {
    pub id: SnowmanId,
    pub position: WorldPos,
    pub yaw: f32,
    pub hit_points: i32,
    pub is_dead: bool,
}

// ---------------------------------------------------------------------------
// Derived world objects
// ---------------------------------------------------------------------------

/// A building door: hinge point on the building's front edge plus a yaw
/// from the footprint's rotation flag. Exactly one per building. The open
/// flag is independent presentation-driven state, initially closed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub position: WorldPos,
    pub yaw: f32,
    pub open: bool,
}

/// A path lamp: the lattice position of the emissive bulb, which doubles
/// as the light-source position. Lit only under night lighting — see
/// `lighting.rs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LampPost {
    pub bulb: VoxelCoord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voxel_coord_ordering() {
        // VoxelCoord needs a total order for use as a BTreeMap key.
        let a = VoxelCoord::new(0, 0, 0);
        let b = VoxelCoord::new(1, 0, 0);
        assert!(a < b);
    }

    #[test]
    fn gift_serialization_roundtrip() {
        let gift = Gift {
            id: GiftId(7),
            position: WorldPos::new(1.5, -0.6, 22.0),
            color: 0xC0_3A_2E,
            kind: GiftKind::CandyCane,
            collected: false,
            rotation: Some([0.1, 2.3, -0.1]),
        };
        let json = serde_json::to_string(&gift).unwrap();
        let restored: Gift = serde_json::from_str(&json).unwrap();
        assert_eq!(gift, restored);
    }

    #[test]
    fn snowman_serialization_roundtrip() {
        let snowman = Snowman {
            id: SnowmanId(2),
            position: WorldPos::new(-24.0, 1.0, 20.0),
            yaw: 1.2,
            hit_points: 3,
            is_dead: false,
        };
        let json = serde_json::to_string(&snowman).unwrap();
        let restored: Snowman = serde_json::from_str(&json).unwrap();
        assert_eq!(snowman, restored);
    }

    #[test]
    fn ids_order_by_value() {
        assert!(GiftId(3) < GiftId(10));
        assert!(SnowmanId(0) < SnowmanId(1));
    }
}
