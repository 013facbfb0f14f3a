//! Shared fixtures for unit tests across the crate.
//! Stations are drawn as rows: `#` wall, `.` corridor, `s`/`e` corridor start/exit,
//! any other character maps to a room name through `legend`.

use crate::station::Station;
use crate::types::{CORRIDOR, Pos};

pub(crate) fn station_from_rows(rows: &[&str], legend: &[(char, &str)]) -> Station {
    let height = rows.len();
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let mut station = Station::blank(width, height);
    let mut start = None;
    let mut exit = None;
    let mut walkable = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        for (x, symbol) in row.chars().enumerate() {
            let pos = Pos { y: y as i32, x: x as i32 };
            let name = match symbol {
                '#' => continue,
                '.' => CORRIDOR,
                's' => {
                    start = Some(pos);
                    CORRIDOR
                }
                'e' => {
                    exit = Some(pos);
                    CORRIDOR
                }
                other => legend
                    .iter()
                    .find(|(key, _)| *key == other)
                    .map(|(_, name)| *name)
                    .unwrap_or_else(|| panic!("no legend entry for {other:?}")),
            };
            station.carve(pos, name);
            walkable.push(pos);
        }
    }

    station.wire_neighbors();
    let first = walkable.first().copied().unwrap_or(Pos { y: 0, x: 0 });
    let last = walkable.last().copied().unwrap_or(first);
    station.set_start(start.unwrap_or(first));
    station.set_exit(exit.unwrap_or(last));
    station
}

/// A `Med Bay` lane whose two doorways (west and east) are joined by a single
/// interior path, with a dead-end nook above the lane and a `Storage` closet that
/// only opens into the nook. Returns `(station, west doorway, east doorway, lane cell)`.
pub(crate) fn med_bay_fixture() -> (Station, Pos, Pos, Pos) {
    let station = station_from_rows(
        &[
            "###########",
            "####kmm####",
            "#.mmmmmmm.#",
            "#.#######.#",
            "#s.......e#",
            "###########",
        ],
        &[('m', "Med Bay"), ('k', "Storage")],
    );
    (station, Pos { y: 2, x: 2 }, Pos { y: 2, x: 8 }, Pos { y: 2, x: 4 })
}
