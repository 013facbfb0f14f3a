//! Corridor hazards with their control panels, and puzzle consoles.

use tracing::{debug, trace};

use crate::station::{HazardKind, Occupant};
use crate::types::Pos;

use super::placement::PlacementContext;
use super::progression;

fn free_corridor_cells(context: &PlacementContext<'_>) -> Vec<Pos> {
    context
        .station
        .cells()
        .filter(|cell| cell.is_corridor())
        .map(|cell| cell.pos)
        .filter(|&pos| context.is_free(pos))
        .collect()
}

/// First shuffled free walkable cell, room or corridor, that may take an obstacle.
fn vetted_free_cell(context: &mut PlacementContext<'_>) -> Option<Pos> {
    let mut candidates: Vec<Pos> = context
        .station
        .cells()
        .map(|cell| cell.pos)
        .filter(|&pos| context.is_free(pos))
        .collect();
    context.rng.shuffle(&mut candidates);
    candidates.into_iter().find(|&pos| context.accepts_obstacle(pos))
}

/// Active hazards on corridor cells. Each one comes with a control panel in
/// some room; a hazard whose panel finds no safe cell is not placed.
pub(super) fn place_hazards(context: &mut PlacementContext<'_>) {
    let target = progression::hazard_count(context.level);
    for slot in 0..target {
        let corridor = free_corridor_cells(context);
        let Some(&hazard_pos) = context.rng.pick(&corridor) else {
            debug!(slot, "no free corridor cell for hazard; skipping slot");
            context.report.skipped += 1;
            continue;
        };

        context.used.insert(hazard_pos);
        let rooms: Vec<String> = context.station.room_names().into_iter().collect();
        let Some(control_pos) = context.vetted_cell_in_any_room(rooms) else {
            context.used.remove(&hazard_pos);
            debug!(slot, ?hazard_pos, "no vetted cell for hazard control; skipping slot");
            context.report.skipped += 1;
            continue;
        };

        let kind = context.rng.pick(&HazardKind::ALL).copied().unwrap_or(HazardKind::CoolantLeak);
        context.station.place_occupant(hazard_pos, Occupant::Hazard { kind, active: true });
        context.commit_obstacle(control_pos, Occupant::HazardControl { hazard: hazard_pos });
        trace!(?hazard_pos, ?control_pos, ?kind, "placed hazard");
        context.report.hazards.push(hazard_pos);
        context.report.hazard_controls.push(control_pos);
    }
}

pub(super) fn place_puzzles(context: &mut PlacementContext<'_>) {
    let target = progression::puzzle_count(context.level);
    for slot in 0..target {
        let Some(pos) = vetted_free_cell(context) else {
            debug!(slot, "no vetted cell for puzzle; skipping slot");
            context.report.skipped += 1;
            continue;
        };
        context.commit_obstacle(pos, Occupant::Puzzle { solved: false });
        context.report.puzzles.push(pos);
    }
}
