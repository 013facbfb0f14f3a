//! High-level station generation: partition, carve, wire, then populate.

use tracing::{debug, info};

use crate::config::{ConfigError, GeneratorConfig};
use crate::session::Session;
use crate::station::Station;

use super::bsp::{PartitionParams, connect_subtrees, partition};
use super::doors::place_doors_and_keys;
use super::furnishing::{place_furniture, place_terminals};
use super::hazards::{place_hazards, place_puzzles};
use super::layout::{Rect, carve_room, farthest_cell_from, room_names};
use super::model::{GeneratedStation, PlacementReport};
use super::placement::PlacementContext;
use super::power::place_power;
use super::progression;
use super::seed::StationRng;

pub struct StationGenerator {
    run_seed: u64,
    config: GeneratorConfig,
}

impl StationGenerator {
    pub fn new(run_seed: u64, config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { run_seed, config })
    }

    pub(super) fn with_defaults(run_seed: u64) -> Self {
        Self { run_seed, config: GeneratorConfig::default() }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Level 0 is treated as level 1.
    pub fn generate(&self, level: u32) -> GeneratedStation {
        let level = level.max(1);
        let mut rng = StationRng::for_level(self.run_seed, level);
        let mut station = self.generate_layout(level, &mut rng);
        let report = place_entities_with(&mut station, level, &mut rng, &self.config);
        info!(
            seed = self.run_seed,
            level,
            rooms = station.room_names().len(),
            doors = report.doors.len(),
            generators = report.generators.len(),
            skipped = report.skipped,
            "generated station level"
        );
        GeneratedStation { level, station, report }
    }

    /// Generates `level` and drops the player on its start cell with the
    /// configured field-of-view radius.
    pub fn start_session(&self, level: u32) -> Session {
        Session::with_fov_radius(self.generate(level).station, self.config.fov_radius)
    }

    /// Carves rooms and corridors and picks start and exit.
    ///
    /// Panics with the [`LayoutError`](crate::station::LayoutError) if the
    /// carved grid breaks a structural invariant.
    pub fn generate_layout(&self, level: u32, rng: &mut StationRng) -> Station {
        let config = &self.config;
        let mut station = Station::blank(config.width, config.height);
        let root = Rect { x: 1, y: 1, width: config.width - 2, height: config.height - 2 };
        let params = PartitionParams {
            min_node_size: progression::min_node_size(config, level),
            min_room_size: config.min_room_size,
            room_padding: config.room_padding,
        };

        let tree = partition(root, &params, rng);
        let rooms = tree.rooms();
        if rooms.is_empty() {
            let room = fallback_room(root, config.min_room_size);
            debug!(?room, "partition produced no rooms; using fallback room");
            let name = room_names(1, rng).remove(0);
            carve_room(&mut station, &room, &name);
            return finish_layout(station, &[room], rng);
        }

        let names = room_names(rooms.len(), rng);
        for (room, name) in rooms.iter().zip(&names) {
            carve_room(&mut station, room, name);
        }
        connect_subtrees(&tree, &mut station, rng);
        finish_layout(station, &rooms, rng)
    }
}

fn fallback_room(root: Rect, min_room_size: usize) -> Rect {
    let width = min_room_size.min(root.width);
    let height = min_room_size.min(root.height);
    Rect {
        x: root.x + (root.width - width) / 2,
        y: root.y + (root.height - height) / 2,
        width,
        height,
    }
}

fn finish_layout(mut station: Station, rooms: &[Rect], rng: &mut StationRng) -> Station {
    station.wire_neighbors();
    let start = rng.pick(rooms).map(|room| room.center()).unwrap_or(station.start());
    station.set_start(start);
    let exit = farthest_cell_from(&station, start);
    station.set_exit(exit);

    if let Err(error) = station.validate() {
        panic!("generated layout is invalid: {error}");
    }
    station
}

/// Populates a freshly generated station using the default configuration.
pub fn place_entities(station: &mut Station, level: u32, rng: &mut StationRng) -> PlacementReport {
    place_entities_with(station, level, rng, &GeneratorConfig::default())
}

/// Doors and keys first so later obstacles are vetted against the final gating.
pub fn place_entities_with(
    station: &mut Station,
    level: u32,
    rng: &mut StationRng,
    config: &GeneratorConfig,
) -> PlacementReport {
    let mut context = PlacementContext::new(station, rng, level);
    place_doors_and_keys(&mut context);
    place_power(&mut context, config);
    place_terminals(&mut context);
    place_hazards(&mut context);
    place_puzzles(&mut context);
    place_furniture(&mut context);
    context.report
}
