//! Enclosed-area detection: recover room polygons from loose wall segments.
//!
//! The walls form a planar graph. Every bounded face of that graph is a room
//! candidate; the unbounded outer face and sliver faces are filtered out by
//! area.

mod candidates;
mod extract;
mod faces;
mod graph;

pub use candidates::{filter_new_candidates, is_existing_room, room_candidates};
pub use extract::{RoomDraft, extract_room};

use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::config::KernelConfig;
use crate::geometry::{Position2D, WallSegment, bounds_of, signed_area};
use graph::WallGraph;

/// A closed region found between walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPolygon {
    /// Boundary in traversal order. The last vertex connects back to the first.
    pub vertices: Vec<Position2D>,
    /// Positive shoelace area in m².
    pub area: f64,
}

impl DetectedPolygon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounds, or a zero rect at the origin when empty.
    pub fn bounds(&self) -> Rect {
        bounds_of(&self.vertices).unwrap_or(Rect::ZERO)
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Position2D {
        self.bounds().center().into()
    }
}

/// Detect enclosed areas with the default tolerances.
pub fn detect_enclosed_areas(walls: &[WallSegment]) -> Vec<DetectedPolygon> {
    detect_enclosed_areas_with(walls, &KernelConfig::default())
}

/// Detect every minimal closed region bounded by `walls`.
///
/// Never fails: open or disconnected wall sets simply produce fewer polygons.
/// The output order follows the input order of the walls.
pub fn detect_enclosed_areas_with(
    walls: &[WallSegment],
    config: &KernelConfig,
) -> Vec<DetectedPolygon> {
    if walls.len() < 3 {
        return Vec::new();
    }

    let graph = WallGraph::build(walls, config.vertex_epsilon);
    let cycles = faces::trace_faces(&graph);
    let cycle_count = cycles.len();

    let polygons: Vec<DetectedPolygon> = cycles
        .into_iter()
        .filter_map(|cycle| {
            let vertices: Vec<Position2D> = cycle
                .into_iter()
                .map(|index| graph.vertex(index).position)
                .collect();
            let area = signed_area(&vertices);
            (area > config.min_face_area).then_some(DetectedPolygon { vertices, area })
        })
        .collect();

    log::debug!(
        "Detected {} enclosed areas from {} walls ({} vertices, {} cycles)",
        polygons.len(),
        walls.len(),
        graph.vertices().len(),
        cycle_count
    );

    polygons
}
