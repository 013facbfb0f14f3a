//! Public results of generating and populating one level.

use crate::station::Station;
use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoorPlacement {
    pub room: String,
    pub door: Pos,
    pub key: Pos,
}

/// What the planner placed, in placement order, and how many slots it skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub doors: Vec<DoorPlacement>,
    pub generators: Vec<Pos>,
    pub batteries_required: usize,
    pub batteries: Vec<Pos>,
    pub terminals: Vec<Pos>,
    pub maintenance_terminals: Vec<Pos>,
    pub furniture: Vec<Pos>,
    pub puzzles: Vec<Pos>,
    pub hazards: Vec<Pos>,
    pub hazard_controls: Vec<Pos>,
    pub skipped: usize,
}

#[derive(Clone, Debug)]
pub struct GeneratedStation {
    pub level: u32,
    pub station: Station,
    pub report: PlacementReport,
}
