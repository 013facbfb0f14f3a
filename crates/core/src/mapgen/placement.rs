//! State shared by the placement passes and the vetted cell pickers.

use std::collections::{BTreeMap, BTreeSet};

use crate::station::{Occupant, Station};
use crate::types::Pos;

use super::guard::{
    cuts_off_reachable, doorway_cells, still_connected_if_blocked, strands_generator,
};
use super::model::PlacementReport;
use super::seed::StationRng;

pub(super) struct PlacementContext<'a> {
    pub(super) station: &'a mut Station,
    pub(super) rng: &'a mut StationRng,
    pub(super) level: u32,
    pub(super) used: BTreeSet<Pos>,
    pub(super) doorways: BTreeMap<String, Vec<Pos>>,
    pub(super) report: PlacementReport,
}

impl<'a> PlacementContext<'a> {
    pub(super) fn new(station: &'a mut Station, rng: &'a mut StationRng, level: u32) -> Self {
        let doorways = doorway_cells(station);
        let used = BTreeSet::from([station.start(), station.exit()]);
        Self { station, rng, level, used, doorways, report: PlacementReport::default() }
    }

    /// Unused, empty, item-free walkable cell.
    pub(super) fn is_free(&self, pos: Pos) -> bool {
        !self.used.contains(&pos)
            && self.station.cell(pos).is_some_and(|cell| {
                cell.walkable && cell.occupant.is_empty() && cell.items.is_empty()
            })
    }

    pub(super) fn free_cells_named(&self, name: &str) -> Vec<Pos> {
        self.station.cells_named(name).into_iter().filter(|&pos| self.is_free(pos)).collect()
    }

    /// Room names ordered by name, the start room excluded.
    pub(super) fn rooms_without_start(&self) -> Vec<String> {
        let start_room = self.station.name_at(self.station.start()).map(str::to_string);
        self.station
            .room_names()
            .into_iter()
            .filter(|name| Some(name) != start_room.as_ref())
            .collect()
    }

    /// Whether an obstacle may go on `candidate`: nothing reachable from the start
    /// is lost with any prefix of the placed doors locked, every generator keeps
    /// an open neighbor, and a room cell also keeps that room's doorways joined.
    pub(super) fn accepts_obstacle(&self, candidate: Pos) -> bool {
        let station: &Station = &*self.station;
        let gates: Vec<Pos> = self.report.doors.iter().map(|placement| placement.door).collect();
        if (0..=gates.len()).any(|locked| cuts_off_reachable(station, candidate, &gates[..locked])) {
            return false;
        }
        if strands_generator(station, candidate) {
            return false;
        }
        match station.cell(candidate) {
            Some(cell) if cell.is_room() => {
                let doorways = self.doorways.get(&cell.name).map(Vec::as_slice).unwrap_or(&[]);
                still_connected_if_blocked(station, &cell.name, doorways, candidate)
            }
            Some(_) => true,
            None => false,
        }
    }

    /// First vetted cell of `room` in shuffled order.
    pub(super) fn vetted_room_cell(&mut self, room: &str) -> Option<Pos> {
        let mut candidates = self.free_cells_named(room);
        self.rng.shuffle(&mut candidates);
        candidates.into_iter().find(|&candidate| self.accepts_obstacle(candidate))
    }

    /// Tries rooms in shuffled order and returns the first vetted cell found.
    pub(super) fn vetted_cell_in_any_room(&mut self, mut rooms: Vec<String>) -> Option<Pos> {
        self.rng.shuffle(&mut rooms);
        rooms.iter().find_map(|room| self.vetted_room_cell(room))
    }

    pub(super) fn commit_obstacle(&mut self, pos: Pos, occupant: Occupant) {
        self.station.place_occupant(pos, occupant);
        self.used.insert(pos);
    }
}
