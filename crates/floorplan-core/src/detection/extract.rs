//! Turn a detected polygon into the data needed to create a room from it.

use serde::{Deserialize, Serialize};

use super::DetectedPolygon;
use crate::geometry::{Position2D, bounds_of};

/// Room-creation request derived from a detected polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDraft {
    /// X extent of the bounding box.
    pub length: f64,
    /// Z extent of the bounding box.
    pub width: f64,
    /// Minimum corner of the bounding box.
    pub position: Position2D,
    /// Polygon vertices relative to `position`, in the polygon's order.
    pub vertices: Vec<Position2D>,
}

impl RoomDraft {
    /// Center of the draft's bounding box in world space.
    pub fn center(&self) -> Position2D {
        self.position.offset(self.length / 2.0, self.width / 2.0)
    }

    /// Vertices translated back to world space.
    pub fn world_vertices(&self) -> Vec<Position2D> {
        self.vertices
            .iter()
            .map(|v| self.position.offset(v.x, v.z))
            .collect()
    }
}

/// Axis-aligned box of `polygon` plus its vertices relative to the box corner.
///
/// An empty polygon yields a zero-sized draft at the origin.
pub fn extract_room(polygon: &DetectedPolygon) -> RoomDraft {
    let Some(bounds) = bounds_of(&polygon.vertices) else {
        return RoomDraft {
            length: 0.0,
            width: 0.0,
            position: Position2D::ORIGIN,
            vertices: Vec::new(),
        };
    };

    let position = Position2D::new(bounds.x0, bounds.y0);
    let vertices = polygon
        .vertices
        .iter()
        .map(|v| Position2D::new(v.x - position.x, v.z - position.z))
        .collect();

    RoomDraft {
        length: bounds.width(),
        width: bounds.height(),
        position,
        vertices,
    }
}
