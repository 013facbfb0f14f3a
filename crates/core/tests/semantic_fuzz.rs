use std::collections::BTreeSet;

use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use station_core::mapgen::{MAX_DOORS, doorway_cells, progression, still_connected_if_blocked};
use station_core::reach::reachable;
use station_core::{Occupant, Pos, generate_station};

fn check_station(seed: u64, level: u32) -> Result<(), String> {
    let generated = generate_station(seed, level);
    let station = &generated.station;
    let report = &generated.report;

    station.validate().map_err(|error| format!("seed={seed} level={level}: {error}"))?;

    let obstacles = station.obstacles();
    let open: BTreeSet<Pos> = station
        .cells()
        .filter(|cell| cell.walkable && !obstacles.contains(&cell.pos))
        .map(|cell| cell.pos)
        .collect();
    if reachable(station, station.start(), &obstacles) != open {
        return Err(format!("seed={seed} level={level}: open cells cut off from the start"));
    }

    for &generator in &report.generators {
        if !station.neighbors(generator).any(|neighbor| open.contains(&neighbor)) {
            return Err(format!("seed={seed} level={level}: generator {generator:?} walled in"));
        }
    }

    let mut locked = obstacles.clone();
    for placement in &report.doors {
        locked.insert(placement.door);
        if !reachable(station, station.start(), &locked).contains(&placement.key) {
            return Err(format!("seed={seed} level={level}: {} key is unreachable", placement.room));
        }
    }

    if report.doors.len() > progression::door_target(level).min(MAX_DOORS) {
        return Err(format!("seed={seed} level={level}: {} doors", report.doors.len()));
    }

    for (room, doorways) in doorway_cells(station) {
        if !still_connected_if_blocked(station, &room, &doorways, Pos { y: -1, x: -1 }) {
            return Err(format!("seed={seed} level={level}: doorways of {room} split"));
        }
    }

    let exit_locked = station.cell(station.exit()).is_some_and(|cell| cell.locked);
    if exit_locked != !report.generators.is_empty() {
        return Err(format!("seed={seed} level={level}: exit lock disagrees with generators"));
    }
    if !report.generators.is_empty() && report.batteries.len() < report.batteries_required {
        return Err(format!("seed={seed} level={level}: not enough batteries"));
    }

    for (&hazard, &control) in report.hazards.iter().zip(&report.hazard_controls) {
        let controls_hazard = station
            .cell(control)
            .is_some_and(|cell| cell.occupant == Occupant::HazardControl { hazard });
        let hazard_active = station
            .cell(hazard)
            .is_some_and(|cell| matches!(cell.occupant, Occupant::Hazard { active: true, .. }));
        if !controls_hazard || !hazard_active {
            return Err(format!("seed={seed} level={level}: hazard {hazard:?} miswired"));
        }
    }

    Ok(())
}

#[test]
fn test_fuzz_generated_stations_keep_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    let inputs = (any::<u64>(), 1_u32..=15);

    runner
        .run(&inputs, |(seed, level)| {
            check_station(seed, level).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("generated stations should preserve invariants");
}
