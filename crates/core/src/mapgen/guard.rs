//! Connectivity checks run before committing any blocking placement.
//!
//! The room guard keeps a room's doorways mutually reachable through the room
//! itself. The articulation check keeps every cell reachable from the start.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::reach::{reachable, reachable_count};
use crate::station::{Cell, Station};
use crate::types::Pos;

/// Room cells that touch a corridor, grouped by room name.
pub fn doorway_cells(station: &Station) -> BTreeMap<String, Vec<Pos>> {
    let mut doorways: BTreeMap<String, Vec<Pos>> = BTreeMap::new();
    for cell in station.cells().filter(|cell| cell.is_room()) {
        let touches_corridor =
            cell.links().any(|neighbor| station.cell(neighbor).is_some_and(Cell::is_corridor));
        if touches_corridor {
            doorways.entry(cell.name.clone()).or_default().push(cell.pos);
        }
    }
    doorways
}

/// True iff every doorway of `room_name` stays reachable from the others, moving
/// only through the room's passable cells, once `candidate` is blocked.
pub fn still_connected_if_blocked(
    station: &Station,
    room_name: &str,
    doorway_cells: &[Pos],
    candidate: Pos,
) -> bool {
    let Some(&origin) = doorway_cells.first() else {
        return true;
    };
    if doorway_cells.contains(&candidate) {
        return false;
    }

    let inside = |pos: Pos| {
        pos != candidate
            && station.cell(pos).is_some_and(|cell| cell.name == room_name && cell.is_passable())
    };
    if !inside(origin) {
        return false;
    }

    let mut seen = BTreeSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    while let Some(current) = queue.pop_front() {
        for neighbor in station.neighbors(current) {
            if inside(neighbor) && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    doorway_cells.iter().all(|doorway| seen.contains(doorway))
}

/// True when blocking `candidate` would cut some other cell off from the start,
/// given the obstacles already placed. Start and exit always count.
pub fn is_articulation_cell(station: &Station, candidate: Pos) -> bool {
    cuts_off_reachable(station, candidate, &[])
}

/// [`is_articulation_cell`] with the `locked` cells also treated as walls.
pub fn cuts_off_reachable(station: &Station, candidate: Pos, locked: &[Pos]) -> bool {
    let start = station.start();
    if candidate == start || candidate == station.exit() {
        return true;
    }

    let mut excluded = station.obstacles();
    excluded.extend(locked.iter().copied());
    let baseline = reachable_count(station, start, &excluded);
    if !excluded.insert(candidate) {
        return false;
    }
    reachable_count(station, start, &excluded) + 1 < baseline
}

/// True when blocking `candidate` would leave some placed generator without a
/// neighbor the player can stand on. Generators are obstacles, so the
/// articulation check alone never protects them.
pub fn strands_generator(station: &Station, candidate: Pos) -> bool {
    let mut excluded = station.obstacles();
    excluded.insert(candidate);
    let open = reachable(station, station.start(), &excluded);
    station
        .generators()
        .any(|(pos, _)| !station.neighbors(pos).any(|neighbor| open.contains(&neighbor)))
}
