//! Room-creation candidates: detected polygons that are not already rooms.

use super::{DetectedPolygon, detect_enclosed_areas_with};
use crate::config::KernelConfig;
use crate::geometry::{RoomGeometry, WallSegment};

/// Whether `polygon` duplicates one of `rooms`: bounding-box centers closer
/// than `dedupe_center_distance` and areas within `dedupe_area_delta`.
pub fn is_existing_room(
    polygon: &DetectedPolygon,
    rooms: &[RoomGeometry],
    config: &KernelConfig,
) -> bool {
    let center = polygon.center();
    rooms.iter().any(|room| {
        center.distance(room.center()) < config.dedupe_center_distance
            && (room.area() - polygon.area).abs() < config.dedupe_area_delta
    })
}

/// Drop polygons that already have a matching room, keeping order.
pub fn filter_new_candidates(
    polygons: Vec<DetectedPolygon>,
    rooms: &[RoomGeometry],
    config: &KernelConfig,
) -> Vec<DetectedPolygon> {
    let total = polygons.len();
    let candidates: Vec<DetectedPolygon> = polygons
        .into_iter()
        .filter(|polygon| !is_existing_room(polygon, rooms, config))
        .collect();
    if candidates.len() < total {
        log::trace!(
            "Suppressed {} candidates matching existing rooms",
            total - candidates.len()
        );
    }
    candidates
}

/// Detect enclosed areas and keep those not yet turned into rooms.
pub fn room_candidates(
    walls: &[WallSegment],
    rooms: &[RoomGeometry],
    config: &KernelConfig,
) -> Vec<DetectedPolygon> {
    filter_new_candidates(detect_enclosed_areas_with(walls, config), rooms, config)
}
