//! Cursor snapping for the wall draw tool.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use super::GridSettings;
use crate::config::{ANGLE_SNAP_THRESHOLD, KernelConfig};
use crate::geometry::{Position2D, WallSegment};

/// Which rule produced a wall snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSnapRule {
    /// Raw cursor position.
    #[default]
    None,
    /// Exactly on an existing wall endpoint.
    Endpoint,
    /// Both coordinates on the grid.
    Grid,
    /// Axis-locked to the segment start point.
    Angle,
}

/// Result of snapping a wall draw point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSnapResult {
    pub position: Position2D,
    pub rule: WallSnapRule,
    /// The endpoint snapped to, or the start point an angle snap locked to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Position2D>,
}

impl WallSnapResult {
    /// A result with no snapping.
    pub fn none(position: Position2D) -> Self {
        Self {
            position,
            rule: WallSnapRule::None,
            source: None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.rule != WallSnapRule::None
    }
}

/// Wall snapping parameters for one draw session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSnapper {
    pub grid: GridSettings,
    /// Endpoint capture radius, also the minimum segment length for angle snapping.
    pub tolerance: f64,
    /// Maximum deviation from an axis, in radians, for the angle snap.
    pub angle_threshold: f64,
}

impl WallSnapper {
    pub fn new(grid: GridSettings, tolerance: f64) -> Self {
        Self {
            grid,
            tolerance,
            angle_threshold: ANGLE_SNAP_THRESHOLD,
        }
    }

    pub fn from_config(config: &KernelConfig, grid_enabled: bool) -> Self {
        Self {
            grid: GridSettings {
                size: config.grid_size,
                enabled: grid_enabled,
            },
            tolerance: config.wall_snap_tolerance,
            angle_threshold: config.angle_snap_threshold,
        }
    }

    /// Snap `cursor`. Endpoint beats angle beats grid; the first match wins.
    pub fn snap(
        &self,
        cursor: Position2D,
        walls: &[WallSegment],
        start_point: Option<Position2D>,
    ) -> WallSnapResult {
        if let Some(endpoint) = self.find_endpoint(cursor, walls) {
            log::trace!("Wall snap: endpoint ({}, {})", endpoint.x, endpoint.z);
            return WallSnapResult {
                position: endpoint,
                rule: WallSnapRule::Endpoint,
                source: Some(endpoint),
            };
        }

        if let Some(start) = start_point {
            if let Some(position) = self.lock_to_axis(cursor, start) {
                log::trace!("Wall snap: angle ({}, {})", position.x, position.z);
                return WallSnapResult {
                    position,
                    rule: WallSnapRule::Angle,
                    source: Some(start),
                };
            }
        }

        if self.grid.enabled {
            return WallSnapResult {
                position: super::snap_to_grid(cursor, self.grid.size),
                rule: WallSnapRule::Grid,
                source: None,
            };
        }

        WallSnapResult::none(cursor)
    }

    /// First endpoint in wall order (`from` before `to`) inside the tolerance.
    fn find_endpoint(&self, cursor: Position2D, walls: &[WallSegment]) -> Option<Position2D> {
        walls
            .iter()
            .flat_map(WallSegment::endpoints)
            .find(|endpoint| cursor.distance(*endpoint) < self.tolerance)
    }

    /// Lock the cursor to the horizontal or vertical line through `start`.
    fn lock_to_axis(&self, cursor: Position2D, start: Position2D) -> Option<Position2D> {
        if cursor.distance(start) <= self.tolerance {
            return None;
        }

        // Unsigned bearing in [0, PI]; horizontal is near 0 or PI.
        let bearing = start.vector_to(cursor).atan2().abs();
        if bearing < self.angle_threshold || PI - bearing < self.angle_threshold {
            Some(Position2D::new(self.grid.apply(cursor.x), start.z))
        } else if (bearing - FRAC_PI_2).abs() < self.angle_threshold {
            Some(Position2D::new(start.x, self.grid.apply(cursor.z)))
        } else {
            None
        }
    }
}

/// Snap a wall draw point against existing walls, the segment start and the grid.
pub fn snap_wall_point(
    cursor: Position2D,
    walls: &[WallSegment],
    start_point: Option<Position2D>,
    grid: GridSettings,
    tolerance: f64,
) -> WallSnapResult {
    WallSnapper::new(grid, tolerance).snap(cursor, walls, start_point)
}
