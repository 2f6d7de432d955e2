//! Snap functionality for wall drawing and room placement.

mod room;
mod wall;

pub use room::{GuideAxis, SnapGuide, SnapResult, snap_room_move};
pub use wall::{WallSnapResult, WallSnapRule, WallSnapper, snap_wall_point};

use serde::{Deserialize, Serialize};

use crate::config::GRID_SIZE;
use crate::geometry::Position2D;

/// Grid configuration as seen by the draw tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Grid spacing in meters.
    pub size: f64,
    /// Whether grid snapping is active.
    pub enabled: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            enabled: true,
        }
    }
}

impl GridSettings {
    pub fn disabled(size: f64) -> Self {
        Self {
            size,
            enabled: false,
        }
    }

    /// Round `value` to the grid when enabled, otherwise pass it through.
    pub fn apply(&self, value: f64) -> f64 {
        if self.enabled {
            snap_value(value, self.size)
        } else {
            value
        }
    }
}

/// Round a coordinate to the nearest multiple of `grid_size`, halves away
/// from zero.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Position2D, grid_size: f64) -> Position2D {
    Position2D::new(snap_value(point.x, grid_size), snap_value(point.z, grid_size))
}
