//! Edge and center alignment while dragging a room.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::geometry::{Position2D, RoomGeometry};

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    /// Constant Z, spanning X.
    Horizontal,
    /// Constant X, spanning Z.
    Vertical,
}

/// An alignment line to draw while dragging. Purely advisory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    pub axis: GuideAxis,
    /// Z for horizontal guides, X for vertical guides.
    pub offset: f64,
    pub start: f64,
    pub end: f64,
}

/// Result of a room move snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    pub position: Position2D,
    pub guides: Vec<SnapGuide>,
}

impl SnapResult {
    /// A result with no snapping.
    pub fn none(position: Position2D) -> Self {
        Self {
            position,
            guides: Vec::new(),
        }
    }

    pub fn is_snapped(&self) -> bool {
        !self.guides.is_empty()
    }
}

/// Pairs closer than this count as already aligned.
const ALIGNED_EPSILON: f64 = 1e-9;

/// Min, center and max along one axis.
fn interest_points(min: f64, max: f64) -> [f64; 3] {
    [min, min + (max - min) / 2.0, max]
}

/// Closest (moving, other) pair found so far on one axis.
struct AxisMatch {
    distance: f64,
    /// Shift that brings the moving point onto the other point.
    delta: f64,
    offset: f64,
    other_bounds: Rect,
}

/// Running search on one axis. Only strictly closer pairs replace the
/// current best, so ties go to the first pair seen. Distances within
/// `ALIGNED_EPSILON` of each other are ties.
struct AxisSearch {
    best: Option<AxisMatch>,
    limit: f64,
}

impl AxisSearch {
    fn new(tolerance: f64) -> Self {
        Self {
            best: None,
            limit: tolerance,
        }
    }

    fn consider(&mut self, moving: &[f64; 3], other: &[f64; 3], other_bounds: Rect) {
        for &m in moving {
            for &o in other {
                let distance = (m - o).abs();
                let closer = match &self.best {
                    Some(best) => distance < best.distance - ALIGNED_EPSILON,
                    None => distance < self.limit,
                };
                if !closer {
                    continue;
                }
                let (distance, delta) = if distance <= ALIGNED_EPSILON {
                    (0.0, 0.0)
                } else {
                    (distance, o - m)
                };
                self.best = Some(AxisMatch {
                    distance,
                    delta,
                    offset: o,
                    other_bounds,
                });
            }
        }
    }
}

/// Align a room being moved to `proposed` with the edges and centers of
/// `others`, independently on X and Z.
///
/// The room itself is ignored if it appears in `others`. Guides span the union
/// of both rooms' extents on the cross axis, measured at the snapped position,
/// so feeding the result back in returns it unchanged.
pub fn snap_room_move(
    moving: &RoomGeometry,
    others: &[RoomGeometry],
    proposed: Position2D,
    tolerance: f64,
) -> SnapResult {
    let bounds = moving.at(proposed).bounds();
    let moving_x = interest_points(bounds.x0, bounds.x1);
    let moving_z = interest_points(bounds.y0, bounds.y1);

    let mut search_x = AxisSearch::new(tolerance);
    let mut search_z = AxisSearch::new(tolerance);

    for other in others.iter().filter(|other| other.id != moving.id) {
        let other_bounds = other.bounds();
        search_x.consider(
            &moving_x,
            &interest_points(other_bounds.x0, other_bounds.x1),
            other_bounds,
        );
        search_z.consider(
            &moving_z,
            &interest_points(other_bounds.y0, other_bounds.y1),
            other_bounds,
        );
    }

    let mut result = SnapResult::none(proposed);
    if let Some(m) = &search_x.best {
        result.position.x += m.delta;
    }
    if let Some(m) = &search_z.best {
        result.position.z += m.delta;
    }

    let snapped = moving.at(result.position).bounds();
    if let Some(m) = search_x.best {
        result.guides.push(SnapGuide {
            axis: GuideAxis::Vertical,
            offset: m.offset,
            start: snapped.y0.min(m.other_bounds.y0),
            end: snapped.y1.max(m.other_bounds.y1),
        });
    }
    if let Some(m) = search_z.best {
        result.guides.push(SnapGuide {
            axis: GuideAxis::Horizontal,
            offset: m.offset,
            start: snapped.x0.min(m.other_bounds.x0),
            end: snapped.x1.max(m.other_bounds.x1),
        });
    }

    if result.is_snapped() {
        log::trace!(
            "Room snap: ({}, {}) -> ({}, {}) with {} guides",
            proposed.x,
            proposed.z,
            result.position.x,
            result.position.z,
            result.guides.len()
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ROOM_SNAP_TOLERANCE;
    use crate::geometry::Rotation;

    fn room(x: f64, z: f64, length: f64, width: f64) -> RoomGeometry {
        RoomGeometry::new(Position2D::new(x, z), length, width)
    }

    #[test]
    fn test_left_edges_align() {
        let moving = room(0.0, 0.0, 5.0, 4.0);
        let others = vec![room(0.0, 10.0, 4.0, 4.0)];

        let result = snap_room_move(
            &moving,
            &others,
            Position2D::new(0.1, 0.0),
            ROOM_SNAP_TOLERANCE,
        );
        assert!(result.position.x.abs() < 1e-9);
        assert_eq!(result.position.z, 0.0);
        assert_eq!(
            result.guides,
            vec![SnapGuide {
                axis: GuideAxis::Vertical,
                offset: 0.0,
                start: 0.0,
                end: 14.0,
            }]
        );
    }

    #[test]
    fn test_nothing_in_range() {
        let moving = room(0.0, 0.0, 3.0, 3.0);
        let others = vec![room(10.3, 20.7, 4.0, 4.0)];
        let proposed = Position2D::new(1.0, 1.0);

        let result = snap_room_move(&moving, &others, proposed, ROOM_SNAP_TOLERANCE);
        assert_eq!(result, SnapResult::none(proposed));
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_both_axes_snap_independently() {
        let moving = room(0.0, 0.0, 2.0, 2.0);
        // Right edge of the moving room meets the left edge of the other, and
        // the Z centers line up.
        let others = vec![room(5.0, 3.0, 4.0, 4.0)];

        let result = snap_room_move(
            &moving,
            &others,
            Position2D::new(2.9, 3.85),
            ROOM_SNAP_TOLERANCE,
        );
        assert!((result.position.x - 3.0).abs() < 1e-9);
        assert!((result.position.z - 4.0).abs() < 1e-9);
        assert_eq!(result.guides.len(), 2);
        assert_eq!(result.guides[0].axis, GuideAxis::Vertical);
        assert!((result.guides[0].offset - 5.0).abs() < 1e-9);
        assert_eq!(result.guides[1].axis, GuideAxis::Horizontal);
        assert!((result.guides[1].offset - 5.0).abs() < 1e-9);
        // Guide extents are measured at the snapped position.
        assert!((result.guides[0].start - 3.0).abs() < 1e-9);
        assert!((result.guides[0].end - 7.0).abs() < 1e-9);
        assert!((result.guides[1].start - 3.0).abs() < 1e-9);
        assert!((result.guides[1].end - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_closest_pair_wins() {
        let moving = room(0.0, 0.0, 4.0, 4.0);
        let others = vec![room(0.15, 20.0, 4.0, 4.0), room(-0.05, 30.0, 4.0, 4.0)];

        let result = snap_room_move(&moving, &others, Position2D::ORIGIN, ROOM_SNAP_TOLERANCE);
        assert!((result.position.x + 0.05).abs() < 1e-9);
        assert_eq!(result.guides.len(), 1);
        assert!((result.guides[0].start - 0.0).abs() < 1e-9);
        assert!((result.guides[0].end - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_goes_to_first_room() {
        let moving = room(0.0, 0.0, 4.0, 4.0);
        let others = vec![room(0.125, 20.0, 4.0, 4.0), room(-0.125, 30.0, 4.0, 4.0)];

        let result = snap_room_move(&moving, &others, Position2D::ORIGIN, ROOM_SNAP_TOLERANCE);
        assert_eq!(result.position.x, 0.125);
        assert_eq!(result.guides[0].offset, 0.125);
    }

    #[test]
    fn test_moving_room_ignores_itself() {
        let moving = room(0.0, 0.0, 4.0, 4.0);
        let others = vec![moving.clone()];

        let result = snap_room_move(
            &moving,
            &others,
            Position2D::new(0.1, 0.1),
            ROOM_SNAP_TOLERANCE,
        );
        assert!(!result.is_snapped());
        assert_eq!(result.position, Position2D::new(0.1, 0.1));
    }

    #[test]
    fn test_rotation_swaps_extents() {
        // 6 x 2 rotated a quarter turn is 2 wide on X.
        let moving = room(0.0, 0.0, 6.0, 2.0).with_rotation(Rotation::Deg90);
        let others = vec![room(2.1, 20.0, 3.0, 3.0)];

        let result = snap_room_move(&moving, &others, Position2D::ORIGIN, ROOM_SNAP_TOLERANCE);
        // Right edge at 2.0 aligns with the other's left edge at 2.1.
        assert!((result.position.x - 0.1).abs() < 1e-9);
        assert!((result.guides[0].end - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapped_position_is_fixed_point() {
        let moving = room(0.0, 0.0, 5.0, 4.0);
        let others = vec![room(0.0, 10.0, 4.0, 4.0), room(7.0, 0.0, 2.0, 3.0)];

        let first = snap_room_move(
            &moving,
            &others,
            Position2D::new(0.1, 0.05),
            ROOM_SNAP_TOLERANCE,
        );
        assert_eq!(first.guides.len(), 2);
        let second = snap_room_move(&moving, &others, first.position, ROOM_SNAP_TOLERANCE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resnapping_is_stable_across_positions() {
        let moving = room(0.0, 0.0, 5.0, 4.0);
        let others = vec![
            room(0.0, 10.0, 4.0, 4.0),
            room(7.0, 0.0, 2.0, 3.0),
            room(-6.3, -4.15, 3.7, 2.9),
        ];

        for i in 0..400 {
            let proposed = Position2D::new(
                -8.0 + i as f64 * 0.043_917,
                -6.0 + (i * 7 % 400) as f64 * 0.037_211,
            );
            let first = snap_room_move(&moving, &others, proposed, ROOM_SNAP_TOLERANCE);
            let second = snap_room_move(&moving, &others, first.position, ROOM_SNAP_TOLERANCE);
            assert_eq!(first, second, "proposed {proposed:?}");
        }
    }

    #[test]
    fn test_aligned_pair_keeps_position() {
        let moving = room(0.0, 0.0, 2.0, 2.0);
        let others = vec![room(0.3, 5.0, 2.0, 2.0)];
        let proposed = Position2D::new(0.3 + 1e-12, 1.0);

        let result = snap_room_move(&moving, &others, proposed, ROOM_SNAP_TOLERANCE);
        assert_eq!(result.position, proposed);
        assert_eq!(result.guides[0].offset, 0.3);
    }
}
