use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use serde::Serialize;
use station_core::mapgen::{doorway_cells, still_connected_if_blocked};
use station_core::reach::reachable;
use station_core::{GeneratedStation, Pos, StationGenerator};
use tools::{config_or_default, init_tracing};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 200)]
    seeds: u64,
    #[arg(short, long, default_value_t = 12)]
    max_level: u32,
    #[arg(long, default_value_t = 0)]
    first_seed: u64,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Default, Serialize)]
struct FuzzReport {
    stations: u64,
    failures: Vec<String>,
    doors: usize,
    generators: usize,
    skipped_slots: usize,
}

fn check(generated: &GeneratedStation) -> Vec<&'static str> {
    let station = &generated.station;
    let mut problems = Vec::new();

    if station.validate().is_err() {
        problems.push("invalid layout");
    }

    let obstacles = station.obstacles();
    let open: BTreeSet<Pos> = station
        .cells()
        .filter(|cell| cell.walkable && !obstacles.contains(&cell.pos))
        .map(|cell| cell.pos)
        .collect();
    if reachable(station, station.start(), &obstacles) != open {
        problems.push("open cells cut off");
    }

    if generated
        .report
        .generators
        .iter()
        .any(|&generator| !station.neighbors(generator).any(|neighbor| open.contains(&neighbor)))
    {
        problems.push("generator walled in");
    }

    let mut locked = obstacles;
    for placement in &generated.report.doors {
        locked.insert(placement.door);
        if !reachable(station, station.start(), &locked).contains(&placement.key) {
            problems.push("key behind its door");
        }
    }

    let nowhere = Pos { y: -1, x: -1 };
    if doorway_cells(station)
        .iter()
        .any(|(room, doorways)| !still_connected_if_blocked(station, room, doorways, nowhere))
    {
        problems.push("room doorways split");
    }

    problems
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = config_or_default(args.config.as_deref())?;

    let mut report = FuzzReport::default();
    for seed in args.first_seed..args.first_seed + args.seeds {
        let generator = StationGenerator::new(seed, config.clone())?;
        for level in 1..=args.max_level {
            let generated = generator.generate(level);
            report.stations += 1;
            report.doors += generated.report.doors.len();
            report.generators += generated.report.generators.len();
            report.skipped_slots += generated.report.skipped;
            for problem in check(&generated) {
                warn!(seed, level, problem, "invariant violated");
                report.failures.push(format!("seed={seed} level={level}: {problem}"));
            }
        }
    }

    info!(stations = report.stations, failures = report.failures.len(), "fuzz sweep finished");
    println!("{}", serde_json::to_string(&report)?);
    if !report.failures.is_empty() {
        bail!("{} invariant violations", report.failures.len());
    }
    Ok(())
}
