//! Gating doors and their keys.
//!
//! Each door is chosen so that locking it shrinks what the player can reach, and
//! its key goes somewhere still reachable with that door and every earlier door
//! locked. Solvability therefore holds by construction.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::reach::reachable;
use crate::station::{Door, Occupant, Station, key_name};
use crate::types::{Item, ItemKind, Pos};

use super::model::DoorPlacement;
use super::placement::PlacementContext;
use super::progression;

/// Corridor cells whose linked room cells all belong to one room.
pub(super) fn boundary_cells(station: &Station) -> Vec<(Pos, String)> {
    station
        .cells()
        .filter(|cell| cell.is_corridor())
        .filter_map(|cell| {
            let rooms: BTreeSet<&str> = cell
                .links()
                .filter_map(|neighbor| station.cell(neighbor))
                .filter(|neighbor| neighbor.is_room())
                .map(|neighbor| neighbor.name.as_str())
                .collect();
            let mut only = rooms.iter();
            match (only.next(), only.next()) {
                (Some(room), None) => Some((cell.pos, room.to_string())),
                _ => None,
            }
        })
        .collect()
}

pub(super) fn place_doors_and_keys(context: &mut PlacementContext<'_>) {
    let target = progression::door_target(context.level);
    let mut candidates = boundary_cells(context.station);
    context.rng.shuffle(&mut candidates);

    let start = context.station.start();
    let exit = context.station.exit();
    let mut locked: BTreeSet<Pos> = BTreeSet::new();
    let mut guarded_rooms: BTreeSet<String> = BTreeSet::new();

    for slot in 0..target {
        let currently_reachable = reachable(context.station, start, &locked);
        let chosen = candidates.iter().find(|(pos, room)| {
            if context.used.contains(pos)
                || locked.contains(pos)
                || guarded_rooms.contains(room)
                || !currently_reachable.contains(pos)
            {
                return false;
            }
            let mut trial = locked.clone();
            trial.insert(*pos);
            let after = reachable(context.station, start, &trial);
            !after.contains(&exit) || after.len() + 1 < currently_reachable.len()
        });

        let Some((door_pos, room)) = chosen.cloned() else {
            debug!(slot, target, "no gating door candidate left; skipping slot");
            context.report.skipped += 1;
            continue;
        };

        locked.insert(door_pos);
        let before_door = reachable(context.station, start, &locked);
        let key_pos = pick_key_cell(context, &before_door);

        context.station.place_occupant(door_pos, Occupant::Door(Door::new(&room)));
        context.station.drop_item(key_pos, Item { name: key_name(&room), kind: ItemKind::Key });
        context.used.insert(door_pos);
        context.used.insert(key_pos);
        guarded_rooms.insert(room.clone());
        trace!(?door_pos, ?key_pos, room = room.as_str(), "placed door and key");
        context.report.doors.push(DoorPlacement { room, door: door_pos, key: key_pos });
    }
}

/// Uniform pick among free room cells of `region`, then any free cell, then any cell.
fn pick_key_cell(context: &mut PlacementContext<'_>, region: &BTreeSet<Pos>) -> Pos {
    let room_cells: Vec<Pos> = region
        .iter()
        .copied()
        .filter(|&pos| {
            context.is_free(pos) && context.station.cell(pos).is_some_and(|cell| cell.is_room())
        })
        .collect();
    if let Some(&pos) = context.rng.pick(&room_cells) {
        return pos;
    }

    let free_cells: Vec<Pos> =
        region.iter().copied().filter(|&pos| !context.used.contains(&pos)).collect();
    if let Some(&pos) = context.rng.pick(&free_cells) {
        return pos;
    }

    let any_cells: Vec<Pos> = region.iter().copied().collect();
    context.rng.pick(&any_cells).copied().unwrap_or_else(|| context.station.start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::seed::StationRng;
    use crate::test_support::station_from_rows;

    /// Start room on the left, a dead-end `Brig` and the exit room on the right.
    fn gated_station() -> Station {
        station_from_rows(
            &[
                "##############",
                "#aaa#####bbb##",
                "#aaa.....bbb##",
                "#aaa##.##bbb##",
                "######.#######",
                "#####ccc######",
                "#####ccc######",
                "##############",
            ],
            &[('a', "Galley"), ('b', "Bridge"), ('c', "Brig")],
        )
    }

    fn with_start_and_exit(mut station: Station, start: Pos, exit: Pos) -> Station {
        station.set_start(start);
        station.set_exit(exit);
        station
    }

    #[test]
    fn boundary_cells_touch_exactly_one_room() {
        let station = gated_station();
        let boundary: Vec<Pos> = boundary_cells(&station).into_iter().map(|(pos, _)| pos).collect();
        assert!(boundary.contains(&Pos { y: 2, x: 4 }));
        assert!(boundary.contains(&Pos { y: 2, x: 8 }));
        assert!(boundary.contains(&Pos { y: 4, x: 6 }));
        assert!(!boundary.contains(&Pos { y: 2, x: 6 }));
    }

    #[test]
    fn door_cuts_the_exit_off_and_key_stays_on_the_near_side() {
        let station =
            with_start_and_exit(gated_station(), Pos { y: 2, x: 1 }, Pos { y: 2, x: 11 });
        for seed in 0..16 {
            let mut station = station.clone();
            let mut rng = StationRng::from_seed(seed);
            let mut context = PlacementContext::new(&mut station, &mut rng, 1);
            place_doors_and_keys(&mut context);
            let report = context.report;

            assert_eq!(report.doors.len(), 1, "seed {seed}");
            let placement = &report.doors[0];
            let near_side =
                reachable(&station, station.start(), &BTreeSet::from([placement.door]));
            assert!(near_side.contains(&placement.key), "seed {seed}: key behind its own door");
            assert!(station.cell(placement.door).is_some_and(|cell| cell.locked));
            assert_eq!(station.items_named(&key_name(&placement.room)), vec![placement.key]);
        }
    }

    #[test]
    fn one_door_per_room_even_when_more_are_requested() {
        let station =
            with_start_and_exit(gated_station(), Pos { y: 2, x: 1 }, Pos { y: 2, x: 11 });
        let mut station = station.clone();
        let mut rng = StationRng::from_seed(4);
        let mut context = PlacementContext::new(&mut station, &mut rng, 6);
        place_doors_and_keys(&mut context);
        let report = context.report;

        let rooms: BTreeSet<&String> = report.doors.iter().map(|door| &door.room).collect();
        assert_eq!(rooms.len(), report.doors.len());
        assert!(report.doors.len() <= 3);
        assert_eq!(report.doors.len() + report.skipped, progression::door_target(6));
    }

    #[test]
    fn open_loop_offers_no_gating_door() {
        let mut station = station_from_rows(
            &["#######", "#.....#", "#.#a#.#", "#.....#", "#######"],
            &[('a', "Galley")],
        );
        station.set_start(Pos { y: 1, x: 1 });
        station.set_exit(Pos { y: 3, x: 5 });
        let mut rng = StationRng::from_seed(0);
        let mut context = PlacementContext::new(&mut station, &mut rng, 1);
        place_doors_and_keys(&mut context);
        assert!(context.report.doors.is_empty());
        assert_eq!(context.report.skipped, 1);
    }
}
