//! Floorplan Core Library
//!
//! Spatial geometry kernel for the floorplan editor: room detection from
//! drawn walls, and snapping for wall drawing and room placement.

pub mod config;
pub mod detection;
pub mod geometry;
pub mod snap;

pub use config::{ConfigError, KernelConfig};
pub use detection::{
    DetectedPolygon, RoomDraft, detect_enclosed_areas, detect_enclosed_areas_with, extract_room,
    filter_new_candidates, room_candidates,
};
pub use geometry::{GeometryError, Position2D, RoomGeometry, RoomId, Rotation, WallId, WallSegment};
pub use snap::{
    GridSettings, GuideAxis, SnapGuide, SnapResult, WallSnapResult, WallSnapRule, WallSnapper,
    snap_room_move, snap_to_grid, snap_wall_point,
};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::geometry::{Position2D, WallSegment};

    pub fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    pub fn wall(x1: f64, z1: f64, x2: f64, z2: f64) -> WallSegment {
        WallSegment::new(Position2D::new(x1, z1), Position2D::new(x2, z2))
    }
}
