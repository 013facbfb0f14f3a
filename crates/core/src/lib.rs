pub mod config;
pub mod mapgen;
pub mod reach;
pub mod session;
pub mod station;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, GeneratorConfig};
pub use mapgen::{GeneratedStation, PlacementReport, StationGenerator, generate_station};
pub use session::{Session, StepOutcome};
pub use station::{Cell, LayoutError, Occupant, Station};
pub use types::*;
