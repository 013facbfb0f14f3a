//! Room rectangles, carving, room naming and start/exit selection.

use crate::reach::distances_from;
use crate::station::Station;
use crate::types::{CORRIDOR, Pos};

use super::seed::StationRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Rect {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl Rect {
    pub(super) fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub(super) fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub(super) fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }
}

const STATION_ROOM_NAMES: [&str; 20] = [
    "Med Bay",
    "Galley",
    "Bridge",
    "Engineering",
    "Hydroponics",
    "Crew Quarters",
    "Armory",
    "Cargo Hold",
    "Observatory",
    "Reactor Core",
    "Comms Array",
    "Laboratory",
    "Brig",
    "Life Support",
    "Storage",
    "Recreation",
    "Shuttle Bay",
    "Server Room",
    "Workshop",
    "Airlock Control",
];

/// Unique names for `count` rooms; the list is reused with a numeric suffix once exhausted.
pub(super) fn room_names(count: usize, rng: &mut StationRng) -> Vec<String> {
    let mut pool = STATION_ROOM_NAMES;
    rng.shuffle(&mut pool);
    (0..count)
        .map(|idx| {
            let base = pool[idx % pool.len()];
            match idx / pool.len() {
                0 => base.to_string(),
                round => format!("{base} {}", round + 1),
            }
        })
        .collect()
}

pub(super) fn carve_room(station: &mut Station, room: &Rect, name: &str) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            station.carve(Pos { y: y as i32, x: x as i32 }, name);
        }
    }
}

pub(super) fn carve_l_shaped_corridor(
    station: &mut Station,
    start: Pos,
    end: Pos,
    horizontal_first: bool,
) {
    if horizontal_first {
        carve_horizontal_line(station, start.y, start.x, end.x);
        carve_vertical_line(station, end.x, start.y, end.y);
    } else {
        carve_vertical_line(station, start.x, start.y, end.y);
        carve_horizontal_line(station, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(station: &mut Station, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        carve_corridor_cell(station, Pos { y, x });
    }
}

fn carve_vertical_line(station: &mut Station, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        carve_corridor_cell(station, Pos { y, x });
    }
}

/// Rooms take priority: an already carved cell keeps its name.
fn carve_corridor_cell(station: &mut Station, pos: Pos) {
    let (width, height) = station.dimensions();
    if pos.x <= 0 || pos.y <= 0 || pos.x as usize >= width - 1 || pos.y as usize >= height - 1 {
        return;
    }
    if !station.is_walkable(pos) {
        station.carve(pos, CORRIDOR);
    }
}

/// The walkable cell farthest from `start`; ties prefer room cells, then row-major order.
pub(super) fn farthest_cell_from(station: &Station, start: Pos) -> Pos {
    let mut best = start;
    let mut best_distance = 0_u32;
    let mut best_is_room = station.cell(start).is_some_and(|cell| cell.is_room());
    for (pos, distance) in distances_from(station, start) {
        let is_room = station.cell(pos).is_some_and(|cell| cell.is_room());
        if distance > best_distance || (distance == best_distance && is_room && !best_is_room) {
            best = pos;
            best_distance = distance;
            best_is_room = is_room;
        }
    }
    best
}
