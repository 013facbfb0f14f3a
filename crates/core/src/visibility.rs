//! Field-of-view reveal around the player.
//! Only ever sets `discovered`/`visited`; nothing here clears them.

use crate::station::Station;
use crate::types::{Pos, manhattan};

/// Marks every walkable cell within Manhattan `radius` of `origin` that has an
/// unobstructed sightline as discovered, and as visited when `mark_visited`.
pub fn reveal_fov(station: &mut Station, origin: Pos, radius: u32, mark_visited: bool) {
    if !station.is_walkable(origin) {
        return;
    }

    let reach = radius as i32;
    let mut seen = Vec::new();
    for y in (origin.y - reach)..=(origin.y + reach) {
        for x in (origin.x - reach)..=(origin.x + reach) {
            let target = Pos { y, x };
            if manhattan(origin, target) > radius || !station.is_walkable(target) {
                continue;
            }
            if has_direct_line_of_sight(station, origin, target) {
                seen.push(target);
            }
        }
    }

    for pos in seen {
        if let Some(cell) = station.cell_mut(pos) {
            cell.discovered = true;
            if mark_visited {
                cell.visited = true;
            }
        }
    }
}

/// Symmetric stepping from `origin` toward `target`; any non-walkable cell
/// strictly between the two blocks sight.
fn has_direct_line_of_sight(station: &Station, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_dist_x = dx.abs();
    let total_dist_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut current_step_x = 0;
    let mut current_step_y = 0;

    while current_step_x < total_dist_x || current_step_y < total_dist_y {
        let lhs = (1 + 2 * current_step_x) * total_dist_y;
        let rhs = (1 + 2 * current_step_y) * total_dist_x;

        if lhs == rhs {
            x += sx;
            y += sy;
            current_step_x += 1;
            current_step_y += 1;
        } else if lhs < rhs {
            x += sx;
            current_step_x += 1;
        } else {
            y += sy;
            current_step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if !station.is_walkable(Pos { y, x }) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::station_from_rows;

    fn flags(station: &Station) -> Vec<(bool, bool)> {
        station.cells().map(|cell| (cell.discovered, cell.visited)).collect()
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut station = station_from_rows(
            &["#########", "#aaaaaaa#", "#aaa#aaa#", "#aaaaaaa#", "#########"],
            &[('a', "Hangar")],
        );
        let origin = Pos { y: 2, x: 2 };
        reveal_fov(&mut station, origin, 3, true);
        let first = flags(&station);
        reveal_fov(&mut station, origin, 3, true);
        assert_eq!(first, flags(&station));
    }

    #[test]
    fn radius_is_manhattan_and_walls_stay_hidden() {
        let mut station =
            station_from_rows(&["#########", "#aaaaaaa#", "#########"], &[('a', "Hangar")]);
        reveal_fov(&mut station, Pos { y: 1, x: 1 }, 3, false);
        let discovered = |x| station.cell(Pos { y: 1, x }).is_some_and(|cell| cell.discovered);
        assert!(discovered(4));
        assert!(!discovered(5));
        assert!(!station.cell(Pos { y: 0, x: 1 }).is_some_and(|cell| cell.discovered));
    }

    #[test]
    fn wall_occludes_cells_behind_it() {
        let mut station = station_from_rows(
            &["#######", "#.....#", "#.###.#", "#.#.#.#", "#######"],
            &[],
        );
        reveal_fov(&mut station, Pos { y: 1, x: 3 }, 4, false);
        assert!(station.cell(Pos { y: 1, x: 5 }).is_some_and(|cell| cell.discovered));
        assert!(!station.cell(Pos { y: 3, x: 3 }).is_some_and(|cell| cell.discovered));
    }

    #[test]
    fn visited_is_set_only_when_requested() {
        let mut station =
            station_from_rows(&["######", "#aaaa#", "######"], &[('a', "Hangar")]);
        reveal_fov(&mut station, Pos { y: 1, x: 1 }, 3, false);
        assert!(station.cells().all(|cell| !cell.visited));
        reveal_fov(&mut station, Pos { y: 1, x: 1 }, 3, true);
        assert!(station.cell(Pos { y: 1, x: 3 }).is_some_and(|cell| cell.visited));
    }
}
