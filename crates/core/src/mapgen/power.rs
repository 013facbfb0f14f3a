//! Generators and the batteries that feed them (levels three and up).
//!
//! Rooms are picked by distance from the start. Power needs no gating
//! guarantee: batteries sit on open floor and every generator cell is vetted
//! like any other obstacle.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::reach::distances_from;
use crate::station::{Generator, Occupant, Station};
use crate::types::{BATTERY_NAME, Item, ItemKind};

use super::placement::PlacementContext;
use super::progression;

/// Shortest BFS distance from the start to any cell of each room.
pub(super) fn room_distances(station: &Station) -> BTreeMap<String, u32> {
    let mut rooms: BTreeMap<String, u32> = BTreeMap::new();
    for (pos, distance) in distances_from(station, station.start()) {
        let Some(cell) = station.cell(pos).filter(|cell| cell.is_room()) else {
            continue;
        };
        rooms
            .entry(cell.name.clone())
            .and_modify(|best| *best = (*best).min(distance))
            .or_insert(distance);
    }
    rooms
}

/// Rooms at least `min_distance` away; when none qualify, the furthest half
/// measured against the largest observed distance.
pub(super) fn distant_rooms(distances: &BTreeMap<String, u32>, min_distance: u32) -> Vec<String> {
    let qualifying: Vec<String> = distances
        .iter()
        .filter(|(_, distance)| **distance >= min_distance)
        .map(|(name, _)| name.clone())
        .collect();
    if !qualifying.is_empty() {
        return qualifying;
    }

    let max_distance = distances.values().copied().max().unwrap_or(0);
    let threshold = max_distance / 2;
    distances
        .iter()
        .filter(|(_, distance)| **distance >= threshold)
        .map(|(name, _)| name.clone())
        .collect()
}

pub(super) fn place_power(context: &mut PlacementContext<'_>, config: &GeneratorConfig) {
    let generator_target = progression::generator_count(context.level);
    if generator_target == 0 {
        return;
    }

    let distances = room_distances(context.station);
    let start_room = context.station.name_at(context.station.start()).map(str::to_string);
    let min_distance = progression::generator_min_distance(config, context.level);
    let mut candidates: Vec<String> = distant_rooms(&distances, min_distance)
        .into_iter()
        .filter(|room| Some(room) != start_room.as_ref())
        .collect();

    for slot in 0..generator_target {
        let Some(pos) = context.vetted_cell_in_any_room(candidates.clone()) else {
            debug!(slot, "no vetted cell for generator; skipping slot");
            context.report.skipped += 1;
            continue;
        };

        let room = context.station.name_at(pos).map(str::to_string);
        candidates.retain(|candidate| Some(candidate) != room.as_ref());
        let max_required = progression::max_batteries_per_generator(context.level);
        let required = context.rng.range_usize(1, max_required);
        context.commit_obstacle(
            pos,
            Occupant::Generator(Generator { required: required as u8, inserted: 0 }),
        );
        trace!(?pos, required, "placed generator");
        context.report.generators.push(pos);
        context.report.batteries_required += required;
    }

    if context.report.generators.is_empty() {
        return;
    }
    let exit = context.station.exit();
    if let Some(cell) = context.station.cell_mut(exit) {
        cell.locked = true;
    }

    let battery_target = context.report.batteries_required + progression::spare_batteries(context.level);
    let battery_rooms = distant_rooms(&distances, min_distance / 2);
    for slot in 0..battery_target {
        let mut cells: Vec<_> = battery_rooms
            .iter()
            .flat_map(|room| context.free_cells_named(room))
            .collect();
        if cells.is_empty() {
            cells = context
                .station
                .room_names()
                .iter()
                .flat_map(|room| context.free_cells_named(room))
                .collect();
        }
        let Some(&pos) = context.rng.pick(&cells) else {
            debug!(slot, "no free floor for battery; skipping slot");
            context.report.skipped += 1;
            continue;
        };
        context.station.drop_item(pos, Item { name: BATTERY_NAME.to_string(), kind: ItemKind::Battery });
        context.used.insert(pos);
        context.report.batteries.push(pos);
    }
}
