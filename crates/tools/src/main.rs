use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use station_core::{Occupant, Pos, Station, StationGenerator};
use tools::{config_or_default, init_tracing};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    /// Optional TOML file overriding generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Also print the grid
    #[arg(long)]
    map: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = config_or_default(args.config.as_deref())?;
    let generator = StationGenerator::new(args.seed, config)?;
    let generated = generator.generate(args.level);
    let station = &generated.station;
    let report = &generated.report;

    println!("Seed {} level {}", args.seed, generated.level);
    println!("Grid: {}x{}", station.width(), station.height());
    println!("Rooms: {}", station.room_names().len());
    println!("Start: {:?}  Exit: {:?}", station.start(), station.exit());
    for placement in &report.doors {
        println!(
            "Door into {} at {:?}, key at {:?}",
            placement.room, placement.door, placement.key
        );
    }
    println!(
        "Generators: {} (batteries {}/{} required)",
        report.generators.len(),
        report.batteries.len(),
        report.batteries_required
    );
    println!(
        "Terminals: {}  Maintenance: {}  Puzzles: {}  Hazards: {}  Furniture: {}",
        report.terminals.len(),
        report.maintenance_terminals.len(),
        report.puzzles.len(),
        report.hazards.len(),
        report.furniture.len()
    );
    println!("Skipped slots: {}", report.skipped);
    let session = generator.start_session(args.level);
    let revealed = session.station().cells().filter(|cell| cell.discovered).count();
    println!("Revealed from start: {revealed} cells (radius {})", generator.config().fov_radius);
    println!("Fingerprint: {:016x}", station.fingerprint());

    if args.map {
        for y in 0..station.height() {
            let row: String = (0..station.width())
                .map(|x| {
                    let pos = Pos { y: y as i32, x: x as i32 };
                    map_glyph(station, pos)
                })
                .collect();
            println!("{row}");
        }
    }

    Ok(())
}

fn map_glyph(station: &Station, pos: Pos) -> char {
    let Some(cell) = station.cell(pos).filter(|cell| cell.walkable) else {
        return '#';
    };
    if pos == station.start() {
        return '@';
    }
    if cell.exit {
        return if cell.locked { 'X' } else { '>' };
    }
    match &cell.occupant {
        Occupant::Door(_) => '+',
        Occupant::Generator(_) => 'G',
        Occupant::Terminal => 'T',
        Occupant::MaintenanceTerminal => 'M',
        Occupant::Puzzle { .. } => '?',
        Occupant::Furniture(_) => '=',
        Occupant::Hazard { .. } => '!',
        Occupant::HazardControl { .. } => 'h',
        Occupant::Empty if !cell.items.is_empty() => 'k',
        Occupant::Empty if cell.is_corridor() => ',',
        Occupant::Empty => '.',
    }
}
