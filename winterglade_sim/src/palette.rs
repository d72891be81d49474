// Color palette for every material the world generator emits.
//
// Colors are packed 0xRRGGBB. The generator stores the color directly on
// each `Voxel` rather than a material enum: the renderer draws voxels
// verbatim and never needs to re-derive appearance, and the brick/needle
// checker patterns are cheaper to bake at generation time than to compute
// per frame.
//
// See also: `worldgen.rs` for where each constant is used,
// `placement.rs` for the gift color draws.

/// Fresh surface snow.
pub const SNOW: u32 = 0xF4F8FF;
/// Packed snow crust just below the surface.
pub const SNOW_CRUST: u32 = 0xD8E2F0;
/// Deep frozen ground at the bottom of terrain columns.
pub const STONE: u32 = 0x6E7480;
/// Bare dirt ring around the pond.
pub const DIRT: u32 = 0x8A6F52;
/// Trodden path surface.
pub const PATH: u32 = 0xC9B98F;

/// Brick wall, light course.
pub const BRICK_LIGHT: u32 = 0xA6523C;
/// Brick wall, dark course.
pub const BRICK_DARK: u32 = 0x8C4434;
/// Interior wood flooring.
pub const WOOD_FLOOR: u32 = 0x7A5A3A;
/// Roof shingles under the snow dusting.
pub const ROOF: u32 = 0x4E5A6E;
/// Chimney stack.
pub const CHIMNEY: u32 = 0x5C4436;
/// Smoke puffs above the chimney.
pub const SMOKE: u32 = 0xC8C8CC;

/// Frozen pond surface.
pub const ICE: u32 = 0xA8D4E8;
/// Still water under the ice.
pub const WATER: u32 = 0x2E5E8C;
/// Lakebed below the water line.
pub const LAKEBED: u32 = 0x4A4038;

/// Tree trunk and lamp poles.
pub const BARK: u32 = 0x5A4430;
/// Conifer needles, dark checker.
pub const NEEDLE_DARK: u32 = 0x1E5A32;
/// Conifer needles, light checker.
pub const NEEDLE_LIGHT: u32 = 0x2A7040;
/// Warm phase of the spiral light string.
pub const LIGHT_WARM: u32 = 0xFFD97A;
/// Cold phase of the spiral light string.
pub const LIGHT_COLD: u32 = 0x9AD8FF;
/// Tree-topper star and its glow rays.
pub const STAR_GOLD: u32 = 0xFFE066;
/// Lamp bulb.
pub const LAMP_GLOW: u32 = 0xFFE8B0;
/// Lamp arm and bulb fixture.
pub const IRON: u32 = 0x3A3A40;

/// The six decorative ornament colors the canopy draws from.
pub const ORNAMENT_COLORS: [u32; 6] = [
    0xD44040, // red
    0x4060D4, // blue
    0xE8A030, // amber
    0xC050C0, // magenta
    0x40C0B0, // teal
    0xF0F0F0, // silver
];

/// Wrapping-paper colors for plain gift boxes.
pub const GIFT_COLORS: [u32; 5] = [0xC03A2E, 0x2E8C4A, 0x3A5AC0, 0xD4A030, 0x9040B0];

/// Fixed per-kind gift colors for the kinds with a canonical look.
pub const CANDY_CANE: u32 = 0xE84040;
pub const STOCKING_RED: u32 = 0xB03030;
pub const GINGERBREAD: u32 = 0xA06830;
