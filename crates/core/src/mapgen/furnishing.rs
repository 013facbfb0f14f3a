//! Terminals and per-room furniture.

use tracing::{debug, trace};

use crate::station::{FurnitureKind, Occupant};

use super::placement::PlacementContext;
use super::progression;

const CELLS_PER_FURNITURE: usize = 16;
const MAX_FURNITURE_PER_ROOM: usize = 4;

/// One CCTV terminal and one maintenance terminal, both away from the start room.
pub(super) fn place_terminals(context: &mut PlacementContext<'_>) {
    if !progression::has_terminals(context.level) {
        return;
    }

    for occupant in [Occupant::Terminal, Occupant::MaintenanceTerminal] {
        let rooms = context.rooms_without_start();
        let Some(pos) = context.vetted_cell_in_any_room(rooms) else {
            debug!(?occupant, "no vetted room cell for terminal; skipping");
            context.report.skipped += 1;
            continue;
        };
        let maintenance = matches!(occupant, Occupant::MaintenanceTerminal);
        context.commit_obstacle(pos, occupant);
        if maintenance {
            context.report.maintenance_terminals.push(pos);
        } else {
            context.report.terminals.push(pos);
        }
    }
}

pub(super) fn place_furniture(context: &mut PlacementContext<'_>) {
    for room in context.station.room_names() {
        let size = context.station.cells_named(&room).len();
        let max_count = (size / CELLS_PER_FURNITURE).min(MAX_FURNITURE_PER_ROOM);
        let count = context.rng.range_usize(0, max_count);
        for _ in 0..count {
            let Some(pos) = context.vetted_room_cell(&room) else {
                break;
            };
            let kind = context.rng.pick(&FurnitureKind::ALL).copied().unwrap_or(FurnitureKind::Crate);
            context.commit_obstacle(pos, Occupant::Furniture(kind));
            trace!(?pos, ?kind, room = room.as_str(), "placed furniture");
            context.report.furniture.push(pos);
        }
    }
}
