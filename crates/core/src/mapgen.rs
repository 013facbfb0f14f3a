//! Procedural station generation split into coherent submodules.

pub mod guard;
pub mod model;
pub mod progression;

mod bsp;
mod doors;
mod furnishing;
mod generator;
mod hazards;
mod layout;
mod placement;
mod power;
mod seed;

pub use generator::{StationGenerator, place_entities, place_entities_with};
pub use guard::{
    cuts_off_reachable, doorway_cells, is_articulation_cell, still_connected_if_blocked,
    strands_generator,
};
pub use model::{DoorPlacement, GeneratedStation, PlacementReport};
pub use progression::MAX_DOORS;
pub use seed::StationRng;

/// Generates `level` of the run seeded by `run_seed` with the default configuration.
pub fn generate_station(run_seed: u64, level: u32) -> GeneratedStation {
    StationGenerator::with_defaults(run_seed).generate(level)
}
