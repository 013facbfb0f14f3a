//! The single entity a cell may hold, modelled as one tagged variant.

use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Door {
    pub room: String,
    pub locked: bool,
}

impl Door {
    pub fn new(room: &str) -> Self {
        Self { room: room.to_string(), locked: true }
    }

    pub fn name(&self) -> String {
        door_name(&self.room)
    }

    pub fn key_name(&self) -> String {
        key_name(&self.room)
    }
}

pub fn door_name(room: &str) -> String {
    format!("{room} Door")
}

pub fn key_name(room: &str) -> String {
    format!("{room} Keycard")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generator {
    pub required: u8,
    pub inserted: u8,
}

impl Generator {
    pub fn is_powered(&self) -> bool {
        self.inserted >= self.required
    }

    pub fn missing(&self) -> u8 {
        self.required.saturating_sub(self.inserted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FurnitureKind {
    Crate,
    Locker,
    Bench,
    Console,
    Bunk,
}

impl FurnitureKind {
    pub const ALL: [FurnitureKind; 5] = [
        FurnitureKind::Crate,
        FurnitureKind::Locker,
        FurnitureKind::Bench,
        FurnitureKind::Console,
        FurnitureKind::Bunk,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HazardKind {
    CoolantLeak,
    ExposedWiring,
    RadiationLeak,
}

impl HazardKind {
    pub const ALL: [HazardKind; 3] =
        [HazardKind::CoolantLeak, HazardKind::ExposedWiring, HazardKind::RadiationLeak];
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Door(Door),
    Generator(Generator),
    Terminal,
    Puzzle {
        solved: bool,
    },
    Furniture(FurnitureKind),
    Hazard {
        kind: HazardKind,
        active: bool,
    },
    HazardControl {
        hazard: Pos,
    },
    MaintenanceTerminal,
}

impl Occupant {
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// Permanent obstacles. Doors and hazards never count: doors open with a key
    /// and hazards only hurt.
    pub fn is_obstacle(&self) -> bool {
        matches!(
            self,
            Occupant::Generator(_)
                | Occupant::Terminal
                | Occupant::Puzzle { .. }
                | Occupant::Furniture(_)
                | Occupant::HazardControl { .. }
                | Occupant::MaintenanceTerminal
        )
    }

    pub fn blocks_movement(&self) -> bool {
        match self {
            Occupant::Door(door) => door.locked,
            other => other.is_obstacle(),
        }
    }

    pub fn as_door(&self) -> Option<&Door> {
        match self {
            Occupant::Door(door) => Some(door),
            _ => None,
        }
    }

    pub fn as_generator(&self) -> Option<&Generator> {
        match self {
            Occupant::Generator(generator) => Some(generator),
            _ => None,
        }
    }

    pub(crate) fn code(&self) -> u8 {
        match self {
            Occupant::Empty => 0,
            Occupant::Door(_) => 1,
            Occupant::Generator(_) => 2,
            Occupant::Terminal => 3,
            Occupant::Puzzle { .. } => 4,
            Occupant::Furniture(_) => 5,
            Occupant::Hazard { .. } => 6,
            Occupant::HazardControl { .. } => 7,
            Occupant::MaintenanceTerminal => 8,
        }
    }
}
