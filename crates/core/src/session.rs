//! A player walking one generated station: doors, generators, the exit lock,
//! item pickup and field-of-view reveal.

use tracing::trace;

use crate::config::DEFAULT_FOV_RADIUS;
use crate::station::{Occupant, Station};
use crate::types::{Direction, ItemId, ItemKind, Pos};
use crate::visibility::reveal_fov;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Blocked,
    Locked { key_name: String },
    /// The door opened and the player stepped through.
    Unlocked,
    Powered,
    NeedsBatteries { missing: u8 },
    ExitLocked,
    Moved,
    ReachedExit,
}

pub struct Session {
    station: Station,
    player: Pos,
    inventory: Vec<ItemId>,
    fov_radius: u32,
}

impl Session {
    pub fn new(station: Station) -> Self {
        Self::with_fov_radius(station, DEFAULT_FOV_RADIUS)
    }

    /// Puts the player on the start cell, picking up anything lying there.
    pub fn with_fov_radius(station: Station, fov_radius: u32) -> Self {
        let player = station.start();
        let mut session = Self { station, player, inventory: Vec::new(), fov_radius };
        session.move_to(player);
        session
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    pub fn holds(&self, name: &str) -> bool {
        self.inventory
            .iter()
            .any(|id| self.station.items.get(*id).is_some_and(|item| item.name == name))
    }

    pub fn all_generators_powered(&self) -> bool {
        self.station.generators().all(|(_, generator)| generator.is_powered())
    }

    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        let Some(target) = self.station.cell(self.player).and_then(|cell| cell.neighbor(direction))
        else {
            return StepOutcome::Blocked;
        };
        let Some(cell) = self.station.cell(target) else {
            return StepOutcome::Blocked;
        };
        let occupant = cell.occupant.clone();
        let exit_locked = cell.exit && cell.locked;

        let outcome = match occupant {
            Occupant::Door(door) if door.locked => {
                let key_name = door.key_name();
                if !self.holds(&key_name) {
                    return StepOutcome::Locked { key_name };
                }
                self.unlock_door(target);
                StepOutcome::Unlocked
            }
            Occupant::Generator(_) => return self.feed_generator(target),
            other if other.is_obstacle() => return StepOutcome::Blocked,
            _ if exit_locked => return StepOutcome::ExitLocked,
            _ => StepOutcome::Moved,
        };

        self.move_to(target);
        if target == self.station.exit() { StepOutcome::ReachedExit } else { outcome }
    }

    fn unlock_door(&mut self, pos: Pos) {
        if let Some(cell) = self.station.cell_mut(pos) {
            if let Occupant::Door(door) = &mut cell.occupant {
                door.locked = false;
            }
            cell.locked = false;
        }
        trace!(?pos, "door unlocked");
    }

    /// Inserts carried batteries up to the generator's requirement; the player
    /// does not move.
    fn feed_generator(&mut self, pos: Pos) -> StepOutcome {
        let Some(missing) = self
            .station
            .cell(pos)
            .and_then(|cell| cell.occupant.as_generator())
            .map(|generator| generator.missing())
        else {
            return StepOutcome::Blocked;
        };

        let mut inserted = 0_u8;
        let station = &self.station;
        self.inventory.retain(|id| {
            let is_battery = station.items.get(*id).is_some_and(|item| item.kind == ItemKind::Battery);
            if is_battery && inserted < missing {
                inserted += 1;
                false
            } else {
                true
            }
        });

        let mut remaining = missing;
        if let Some(cell) = self.station.cell_mut(pos)
            && let Occupant::Generator(generator) = &mut cell.occupant
        {
            generator.inserted += inserted;
            remaining = generator.missing();
        }
        self.refresh_exit_lock();

        if remaining == 0 {
            StepOutcome::Powered
        } else {
            StepOutcome::NeedsBatteries { missing: remaining }
        }
    }

    fn refresh_exit_lock(&mut self) {
        if !self.all_generators_powered() {
            return;
        }
        let exit = self.station.exit();
        if let Some(cell) = self.station.cell_mut(exit) {
            cell.locked = false;
        }
    }

    fn move_to(&mut self, pos: Pos) {
        self.player = pos;
        if let Some(cell) = self.station.cell_mut(pos) {
            self.inventory.append(&mut cell.items);
        }
        reveal_fov(&mut self.station, pos, self.fov_radius, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::{Door, Generator, key_name};
    use crate::test_support::station_from_rows;
    use crate::types::{BATTERY_NAME, Item};

    /// `s . D . e` along one corridor with a side room holding the key.
    fn door_station() -> Station {
        let mut station = station_from_rows(
            &["#######", "#s...e#", "#k#####", "#######"],
            &[('k', "Galley")],
        );
        station.place_occupant(Pos { y: 1, x: 3 }, Occupant::Door(Door::new("Galley")));
        station
    }

    #[test]
    fn locked_door_needs_its_key_then_opens() {
        let mut station = door_station();
        let key_spot = Pos { y: 2, x: 1 };
        station.drop_item(key_spot, Item { name: key_name("Galley"), kind: ItemKind::Key });
        let mut session = Session::new(station);

        assert_eq!(session.step(Direction::East), StepOutcome::Moved);
        assert_eq!(
            session.step(Direction::East),
            StepOutcome::Locked { key_name: "Galley Keycard".to_string() }
        );
        assert_eq!(session.step(Direction::West), StepOutcome::Moved);
        assert_eq!(session.step(Direction::South), StepOutcome::Moved);
        assert!(session.holds("Galley Keycard"));
        assert_eq!(session.step(Direction::North), StepOutcome::Moved);
        assert_eq!(session.step(Direction::East), StepOutcome::Moved);
        assert_eq!(session.step(Direction::East), StepOutcome::Unlocked);
        assert_eq!(session.step(Direction::East), StepOutcome::Moved);
        assert_eq!(session.step(Direction::East), StepOutcome::ReachedExit);
    }

    #[test]
    fn walls_block_and_reveal_marks_visited() {
        let mut session = Session::new(door_station());
        assert_eq!(session.step(Direction::North), StepOutcome::Blocked);
        assert_eq!(session.player(), Pos { y: 1, x: 1 });
        assert!(session.station().cell(Pos { y: 1, x: 2 }).is_some_and(|cell| cell.visited));
    }

    #[test]
    fn generator_takes_batteries_and_unlocks_the_exit() {
        let mut station = station_from_rows(
            &["######", "#s.be#", "#gr###", "######"],
            &[('g', "Reactor"), ('r', "Reactor"), ('b', "Reactor")],
        );
        station.place_occupant(
            Pos { y: 2, x: 1 },
            Occupant::Generator(Generator { required: 2, inserted: 0 }),
        );
        let exit = station.exit();
        if let Some(cell) = station.cell_mut(exit) {
            cell.locked = true;
        }
        let battery = Item { name: BATTERY_NAME.to_string(), kind: ItemKind::Battery };
        station.drop_item(Pos { y: 1, x: 3 }, battery.clone());
        station.drop_item(Pos { y: 2, x: 2 }, battery);
        let mut session = Session::new(station);

        assert_eq!(session.step(Direction::South), StepOutcome::NeedsBatteries { missing: 2 });
        assert_eq!(session.step(Direction::East), StepOutcome::Moved);
        assert_eq!(session.step(Direction::East), StepOutcome::Moved);
        assert_eq!(session.step(Direction::East), StepOutcome::ExitLocked);
        assert_eq!(session.step(Direction::West), StepOutcome::Moved);
        assert_eq!(session.step(Direction::South), StepOutcome::Moved);
        assert_eq!(session.step(Direction::West), StepOutcome::Powered);
        assert!(session.all_generators_powered());
        assert!(session.inventory().is_empty());
        assert_eq!(session.step(Direction::North), StepOutcome::Moved);
        assert_eq!(session.step(Direction::East), StepOutcome::Moved);
        assert_eq!(session.step(Direction::East), StepOutcome::ReachedExit);
    }
}
