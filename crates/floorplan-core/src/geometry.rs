//! Plan-view geometry primitives shared by detection and snapping.
//!
//! Coordinates are meters on the X-Z ground plane (Y is height in the 3D view).
//! When converting to `kurbo` types, `z` maps onto kurbo's `y`.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a wall.
pub type WallId = Uuid;

/// Unique identifier for a room.
pub type RoomId = Uuid;

/// Errors raised when geometry enters the kernel in an invalid form.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid rotation: {0} degrees (expected 0, 90, 180 or 270)")]
    InvalidRotation(i64),
}

/// Result type for geometry conversions.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// A point on the floor plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub z: f64,
}

impl Position2D {
    pub const ORIGIN: Position2D = Position2D { x: 0.0, z: 0.0 };

    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Position2D) -> f64 {
        self.to_point().distance(other.to_point())
    }

    /// Fuzzy equality: true when the two points are closer than `epsilon`.
    pub fn approx_eq(self, other: Position2D, epsilon: f64) -> bool {
        self.distance(other) < epsilon
    }

    /// Vector from `self` to `other`.
    pub fn vector_to(self, other: Position2D) -> Vec2 {
        other.to_point() - self.to_point()
    }

    pub fn offset(self, dx: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.z)
    }
}

impl From<Point> for Position2D {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Position2D> for Point {
    fn from(position: Position2D) -> Self {
        position.to_point()
    }
}

/// A straight wall drawn on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub id: WallId,
    pub from: Position2D,
    pub to: Position2D,
    /// Wall thickness in meters.
    pub thickness: f64,
}

impl WallSegment {
    /// Default wall thickness used by the draw tool.
    pub const DEFAULT_THICKNESS: f64 = 0.2;

    /// Create a new wall with a fresh id and the default thickness.
    pub fn new(from: Position2D, to: Position2D) -> Self {
        Self::with_id(Uuid::new_v4(), from, to)
    }

    pub fn with_id(id: WallId, from: Position2D, to: Position2D) -> Self {
        Self {
            id,
            from,
            to,
            thickness: Self::DEFAULT_THICKNESS,
        }
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// Both endpoints, `from` first.
    pub fn endpoints(&self) -> [Position2D; 2] {
        [self.from, self.to]
    }
}

/// Quarter-turn rotation of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> i64 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether the room's length runs along Z instead of X.
    pub fn swaps_extents(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<i64> for Rotation {
    type Error = GeometryError;

    fn try_from(degrees: i64) -> GeometryResult<Self> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(GeometryError::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for i64 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// The geometric view of a room: everything the kernel needs, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomGeometry {
    pub id: RoomId,
    /// Minimum corner before rotation.
    pub position: Position2D,
    /// X extent at rotation 0.
    pub length: f64,
    /// Z extent at rotation 0.
    pub width: f64,
    #[serde(default)]
    pub rotation: Rotation,
}

impl RoomGeometry {
    /// Create an unrotated room with a fresh id.
    pub fn new(position: Position2D, length: f64, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            length,
            width,
            rotation: Rotation::Deg0,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Copy of this room placed at another position.
    pub fn at(&self, position: Position2D) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// (X extent, Z extent) after applying rotation.
    pub fn effective_extents(&self) -> (f64, f64) {
        if self.rotation.swaps_extents() {
            (self.width, self.length)
        } else {
            (self.length, self.width)
        }
    }

    /// Axis-aligned bounds in world space. kurbo's `y` carries Z.
    pub fn bounds(&self) -> Rect {
        let (dx, dz) = self.effective_extents();
        Rect::new(
            self.position.x,
            self.position.z,
            self.position.x + dx,
            self.position.z + dz,
        )
    }

    pub fn center(&self) -> Position2D {
        self.bounds().center().into()
    }

    /// Corners clockwise starting from the minimum corner.
    pub fn corners(&self) -> [Position2D; 4] {
        let b = self.bounds();
        [
            Position2D::new(b.x0, b.y0),
            Position2D::new(b.x1, b.y0),
            Position2D::new(b.x1, b.y1),
            Position2D::new(b.x0, b.y1),
        ]
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// True when the two rooms share interior area. Touching edges do not count.
    pub fn overlaps(&self, other: &RoomGeometry) -> bool {
        let a = self.bounds();
        let b = other.bounds();
        a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
    }
}

/// Bounding rectangle of a set of points, or `None` when empty.
pub fn bounds_of(points: &[Position2D]) -> Option<Rect> {
    let first = points.first()?;
    let seed = Rect::from_points(first.to_point(), first.to_point());
    Some(
        points[1..]
            .iter()
            .fold(seed, |rect, p| rect.union_pt(p.to_point())),
    )
}

/// Signed area by the shoelace formula. Positive for the winding the face walk
/// produces for bounded faces.
pub fn signed_area(vertices: &[Position2D]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.z - b.x * a.z
        })
        .sum();
    twice / 2.0
}
