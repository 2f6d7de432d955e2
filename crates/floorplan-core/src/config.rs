//! Tolerances and thresholds used by the kernel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Two points closer than this are the same graph vertex (1 cm).
pub const VERTEX_EPSILON: f64 = 0.01;

/// Faces at or below this area are treated as numerical noise (m²).
pub const MIN_FACE_AREA: f64 = 0.1;

/// Wall endpoint and angle snap distance while drawing.
pub const WALL_SNAP_TOLERANCE: f64 = 0.3;

/// Maximum deviation from an axis for the angle snap (~9.7°).
pub const ANGLE_SNAP_THRESHOLD: f64 = 0.17;

/// Edge/center alignment distance while moving rooms.
pub const ROOM_SNAP_TOLERANCE: f64 = 0.2;

/// Default grid spacing in meters.
pub const GRID_SIZE: f64 = 0.5;

/// A candidate whose center lies this close to an existing room's center...
pub const DEDUPE_CENTER_DISTANCE: f64 = 0.5;

/// ...and whose area differs by less than this is the same room.
pub const DEDUPE_AREA_DELTA: f64 = 1.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} (must be finite and positive)")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Named, overridable kernel tolerances.
///
/// Missing fields in a JSON document fall back to the defaults above, so a
/// caller can override a single value with `{"grid_size": 0.25}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub vertex_epsilon: f64,
    pub min_face_area: f64,
    pub wall_snap_tolerance: f64,
    pub angle_snap_threshold: f64,
    pub room_snap_tolerance: f64,
    pub grid_size: f64,
    pub dedupe_center_distance: f64,
    pub dedupe_area_delta: f64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            vertex_epsilon: VERTEX_EPSILON,
            min_face_area: MIN_FACE_AREA,
            wall_snap_tolerance: WALL_SNAP_TOLERANCE,
            angle_snap_threshold: ANGLE_SNAP_THRESHOLD,
            room_snap_tolerance: ROOM_SNAP_TOLERANCE,
            grid_size: GRID_SIZE,
            dedupe_center_distance: DEDUPE_CENTER_DISTANCE,
            dedupe_area_delta: DEDUPE_AREA_DELTA,
        }
    }
}

impl KernelConfig {
    /// Check that every tolerance is finite and strictly positive.
    pub fn validate(&self) -> ConfigResult<()> {
        let fields = [
            ("vertex_epsilon", self.vertex_epsilon),
            ("min_face_area", self.min_face_area),
            ("wall_snap_tolerance", self.wall_snap_tolerance),
            ("angle_snap_threshold", self.angle_snap_threshold),
            ("room_snap_tolerance", self.room_snap_tolerance),
            ("grid_size", self.grid_size),
            ("dedupe_center_distance", self.dedupe_center_distance),
            ("dedupe_area_delta", self.dedupe_area_delta),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a configuration document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!("Loaded kernel config: {:?}", config);
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
