//! Post-generation invariant checks. A failure here is a generator bug.

use thiserror::Error;

use crate::types::{Direction, Pos};

use super::Station;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("start cell {0:?} is missing or not walkable")]
    StartNotWalkable(Pos),
    #[error("exit cell {0:?} is missing or not walkable")]
    ExitNotWalkable(Pos),
    #[error("exit flag set on {found:?} but the exit is {exit:?}")]
    StrayExitFlag { found: Pos, exit: Pos },
    #[error("walkable cell {0:?} has no name")]
    UnnamedCell(Pos),
    #[error("cell {from:?} links {direction:?} to {to:?}, which is not its walkable neighbor")]
    DanglingLink { from: Pos, direction: Direction, to: Pos },
    #[error("link from {from:?} to {to:?} is not mirrored")]
    OneWayLink { from: Pos, to: Pos },
    #[error("walkable cells {a:?} and {b:?} are adjacent but not linked")]
    MissingLink { a: Pos, b: Pos },
}

pub(super) fn validate(station: &Station) -> Result<(), LayoutError> {
    if !station.is_walkable(station.start) {
        return Err(LayoutError::StartNotWalkable(station.start));
    }
    if !station.is_walkable(station.exit) {
        return Err(LayoutError::ExitNotWalkable(station.exit));
    }

    for cell in station.cells() {
        if cell.exit && cell.pos != station.exit {
            return Err(LayoutError::StrayExitFlag { found: cell.pos, exit: station.exit });
        }
        if !cell.walkable {
            if let Some((direction, to)) = first_link(cell.links) {
                return Err(LayoutError::DanglingLink { from: cell.pos, direction, to });
            }
            continue;
        }
        if cell.name.is_empty() {
            return Err(LayoutError::UnnamedCell(cell.pos));
        }

        for direction in Direction::ALL {
            let adjacent = cell.pos.step(direction);
            match cell.links[direction.index()] {
                Some(to) => {
                    if to != adjacent || !station.is_walkable(to) {
                        return Err(LayoutError::DanglingLink { from: cell.pos, direction, to });
                    }
                    let mirrored = station
                        .cell(to)
                        .is_some_and(|other| other.links[direction.opposite().index()] == Some(cell.pos));
                    if !mirrored {
                        return Err(LayoutError::OneWayLink { from: cell.pos, to });
                    }
                }
                None => {
                    if station.is_walkable(adjacent) {
                        return Err(LayoutError::MissingLink { a: cell.pos, b: adjacent });
                    }
                }
            }
        }
    }

    Ok(())
}

fn first_link(links: [Option<Pos>; 4]) -> Option<(Direction, Pos)> {
    Direction::ALL.into_iter().find_map(|direction| links[direction.index()].map(|to| (direction, to)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::station_from_rows;

    #[test]
    fn well_formed_station_passes() {
        let station = station_from_rows(&["#####", "#s.e#", "#####"], &[]);
        assert_eq!(station.validate(), Ok(()));
    }

    #[test]
    fn missing_link_is_reported() {
        let mut station = station_from_rows(&["#####", "#s.e#", "#####"], &[]);
        let corridor = Pos { y: 1, x: 2 };
        if let Some(cell) = station.cell_mut(corridor) {
            cell.links = [None; 4];
        }
        assert!(matches!(
            station.validate(),
            Err(LayoutError::MissingLink { .. } | LayoutError::OneWayLink { .. })
        ));
    }

    #[test]
    fn unwalkable_start_is_reported() {
        let mut station = station_from_rows(&["#####", "#s.e#", "#####"], &[]);
        station.start = Pos { y: 0, x: 0 };
        assert_eq!(station.validate(), Err(LayoutError::StartNotWalkable(Pos { y: 0, x: 0 })));
    }
}
