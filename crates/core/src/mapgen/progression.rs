//! Level scaling curves used by the partitioner and the placement planner.

use crate::config::GeneratorConfig;

pub const MAX_DOORS: usize = 10;
pub const FIRST_POWERED_LEVEL: u32 = 3;
const MAX_GENERATORS: usize = 4;
const MAX_BATTERIES_PER_GENERATOR: usize = 4;
const MAX_HAZARDS: usize = 4;

pub fn door_target(level: u32) -> usize {
    let target = match level {
        0 | 1 => 1,
        2 => 2,
        _ => 2 + (level as usize - 2),
    };
    target.min(MAX_DOORS)
}

/// Shrinks by one every second level, never below the configured floor.
pub fn min_node_size(config: &GeneratorConfig, level: u32) -> usize {
    let shrink = (level.saturating_sub(1) / 2) as usize;
    config.base_min_node_size.saturating_sub(shrink).max(config.min_node_floor)
}

pub fn generator_count(level: u32) -> usize {
    if level < FIRST_POWERED_LEVEL {
        return 0;
    }
    (1 + (level - FIRST_POWERED_LEVEL) as usize / 3).min(MAX_GENERATORS)
}

/// Upper bound of the per-generator battery requirement; the lower bound is one.
pub fn max_batteries_per_generator(level: u32) -> usize {
    (2 + level.saturating_sub(FIRST_POWERED_LEVEL) as usize / 2).min(MAX_BATTERIES_PER_GENERATOR)
}

pub fn spare_batteries(level: u32) -> usize {
    1 + level as usize / 5
}

pub fn generator_min_distance(config: &GeneratorConfig, level: u32) -> u32 {
    config.generator_min_distance + 2 * level.saturating_sub(FIRST_POWERED_LEVEL)
}

pub fn hazard_count(level: u32) -> usize {
    (level.saturating_sub(1) as usize).min(MAX_HAZARDS)
}

pub fn has_terminals(level: u32) -> bool {
    level >= 2
}

pub fn puzzle_count(level: u32) -> usize {
    if level < 4 { 0 } else { 1 + (level as usize - 4) / 3 }
}
