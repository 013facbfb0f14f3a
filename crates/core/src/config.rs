//! Generator tuning knobs. Loaded from TOML by the tools crate; every field has
//! a default so partial files are accepted.

use serde::Deserialize;
use thiserror::Error;

pub const MIN_GRID_SIDE: usize = 8;
pub const DEFAULT_FOV_RADIUS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    pub min_room_size: usize,
    /// Cells a room gives up inside its leaf, split across both sides.
    pub room_padding: usize,
    pub base_min_node_size: usize,
    pub min_node_floor: usize,
    pub generator_min_distance: u32,
    pub fov_radius: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 48,
            height: 28,
            min_room_size: 4,
            room_padding: 2,
            base_min_node_size: 10,
            min_node_floor: 7,
            generator_min_distance: 12,
            fov_radius: DEFAULT_FOV_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} is smaller than the {MIN_GRID_SIDE}x{MIN_GRID_SIDE} minimum")]
    GridTooSmall { width: usize, height: usize },
    #[error("min_room_size must be at least 2, got {0}")]
    RoomTooSmall(usize),
    #[error("min_node_floor {floor} cannot hold a room of {min_room_size} plus padding {padding}")]
    NodeFloorTooSmall { floor: usize, min_room_size: usize, padding: usize },
    #[error("base_min_node_size {base} is below min_node_floor {floor}")]
    NodeBaseBelowFloor { base: usize, floor: usize },
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall { width: self.width, height: self.height });
        }
        if self.min_room_size < 2 {
            return Err(ConfigError::RoomTooSmall(self.min_room_size));
        }
        if self.min_node_floor < self.min_room_size + self.room_padding {
            return Err(ConfigError::NodeFloorTooSmall {
                floor: self.min_node_floor,
                min_room_size: self.min_room_size,
                padding: self.room_padding,
            });
        }
        if self.base_min_node_size < self.min_node_floor {
            return Err(ConfigError::NodeBaseBelowFloor {
                base: self.base_min_node_size,
                floor: self.min_node_floor,
            });
        }
        Ok(())
    }
}
