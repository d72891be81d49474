// winterglade_sim — pure Rust scene and gameplay library.
//
// This crate contains all generation and gameplay logic for Winterglade:
// the procedural winter world (terrain, cottages, paths and lamps, the
// frozen pond, the giant tree), collectible and snowman placement, and
// the session state machine. It has zero rendering dependencies and can
// be tested, benchmarked, and run headless.
//
// Module overview:
// - `terrain.rs`:   Shared terrain height and canopy shape functions.
// - `worldgen.rs`:  Voxel world generation (columns, cottages, paths, lamps, pond, tree).
// - `placement.rs`: Gift placement strategies + snowman placement.
// - `session.rs`:   GameSession — collect/hit/crack transitions, win condition.
// - `command.rs`:   SessionCommand — all session mutations.
// - `event.rs`:     Narrative SessionEvents returned by transitions.
// - `fracture.rs`:  Midpoint-displacement crack geometry for the pond ice.
// - `animation.rs`: Pure per-frame visual derivations (bob, spin, wobble).
// - `lighting.rs`:  Wall-clock hour → lighting preset selection.
// - `config.rs`:    GameConfig — all tunable parameters, grouped by stage.
// - `palette.rs`:   The scene's fixed color constants.
// - `prng`:         Re-exported from `winterglade_prng` — xoshiro256++ PRNG with SplitMix64 seeding.
// - `types.rs`:     VoxelCoord, Voxel, WorldPos, entity IDs, Gift, Snowman, Door.
//
// A rendering layer consumes `WorldData` once at setup and the session
// readout every frame. That boundary is enforced at the compiler level —
// this crate cannot depend on rendering, frame timing, or wall-clock
// entropy (the lighting hour is passed in by the caller).
//
// **Critical constraint: determinism.** Generation is a pure function:
// `(config, seed) -> world + entities`. All randomness comes from a
// seeded xoshiro256++ PRNG (re-exported from `winterglade_prng`). No
// `HashMap` iteration in outputs, no system time, no OS entropy. Use
// `BTreeMap` for ordered collections.

pub mod animation;
pub mod command;
pub mod config;
pub mod event;
pub mod fracture;
pub mod lighting;
pub mod palette;
pub mod placement;
pub use winterglade_prng as prng;
pub mod session;
pub mod terrain;
pub mod types;
pub mod worldgen;
