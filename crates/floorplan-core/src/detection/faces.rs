//! Face enumeration over the wall graph.

use std::collections::HashSet;

use super::graph::{GraphEdge, WallGraph};
use crate::geometry::WallId;

/// Directed half-edge: leaving `vertex` along `wall`.
type HalfEdgeKey = (usize, WallId);

/// Walk every directed half-edge once and return the closed vertex cycles.
///
/// From each arrival vertex the walk continues along the edge that precedes
/// the back edge in the vertex's bearing-sorted list. Bounded faces come out
/// with positive shoelace area; the unbounded face comes out negative.
pub(crate) fn trace_faces(graph: &WallGraph) -> Vec<Vec<usize>> {
    let max_steps = graph.half_edge_count();
    let mut visited: HashSet<HalfEdgeKey> = HashSet::with_capacity(max_steps);
    let mut faces = Vec::new();

    for (start, vertex) in graph.vertices().iter().enumerate() {
        for edge in &vertex.edges {
            if !visited.insert((start, edge.wall_id)) {
                continue;
            }
            if let Some(face) = walk_face(graph, start, edge, &mut visited, max_steps) {
                faces.push(face);
            }
        }
    }

    faces
}

/// Follow one face from `start` along `first`. Returns `None` when the walk
/// runs into a half-edge claimed by an earlier walk.
fn walk_face(
    graph: &WallGraph,
    start: usize,
    first: &GraphEdge,
    visited: &mut HashSet<HalfEdgeKey>,
    max_steps: usize,
) -> Option<Vec<usize>> {
    let mut path = vec![start];
    let mut current = first.to;
    let mut wall = first.wall_id;

    while current != start {
        // Each step claims a fresh half-edge, so the path is bounded by the
        // half-edge count.
        debug_assert!(path.len() <= max_steps);
        path.push(current);

        let edges = &graph.vertex(current).edges;
        let back = edges.iter().position(|e| e.wall_id == wall)?;
        let next = edges[(back + edges.len() - 1) % edges.len()];

        if !visited.insert((current, next.wall_id)) {
            return None;
        }
        current = next.to;
        wall = next.wall_id;
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Position2D, WallSegment};
    use crate::test_support::wall;
    use uuid::Uuid;

    #[test]
    fn test_square_yields_inner_and_outer_cycle() {
        let graph = WallGraph::build(
            &[
                wall(0.0, 0.0, 4.0, 0.0),
                wall(4.0, 0.0, 4.0, 4.0),
                wall(4.0, 4.0, 0.0, 4.0),
                wall(0.0, 4.0, 0.0, 0.0),
            ],
            0.01,
        );
        let faces = trace_faces(&graph);
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0], vec![0, 1, 2, 3]);
        assert_eq!(faces[1], vec![0, 3, 2, 1]);
    }

    #[test]
    fn test_every_half_edge_used_at_most_once() {
        let graph = WallGraph::build(
            &[
                wall(0.0, 0.0, 4.0, 0.0),
                wall(4.0, 0.0, 4.0, 4.0),
                wall(4.0, 4.0, 0.0, 4.0),
                wall(0.0, 4.0, 0.0, 0.0),
                wall(4.0, 0.0, 8.0, 0.0),
                wall(8.0, 0.0, 8.0, 4.0),
                wall(8.0, 4.0, 4.0, 4.0),
            ],
            0.01,
        );
        let faces = trace_faces(&graph);
        let used: usize = faces.iter().map(Vec::len).sum();
        assert!(used <= graph.half_edge_count());
        assert_eq!(faces.len(), 3);
    }

    #[test]
    fn test_open_path_wraps_around_both_sides() {
        // An open polyline has a single face that runs out and back.
        let graph = WallGraph::build(&[wall(0.0, 0.0, 4.0, 0.0), wall(4.0, 0.0, 4.0, 4.0)], 0.01);
        let faces = trace_faces(&graph);
        assert_eq!(faces, vec![vec![0, 1, 2, 1]]);
    }

    #[test]
    fn test_walk_into_claimed_half_edge_is_dropped() {
        // Two walls leaving the corner share an id, so the corner's back-edge
        // lookup always lands on the first one and later walks collide.
        let shared = Uuid::new_v4();
        let corner = Position2D::new(0.0, 0.0);
        let east = Position2D::new(4.0, 0.0);
        let north = Position2D::new(0.0, 4.0);
        let graph = WallGraph::build(
            &[
                WallSegment::with_id(shared, corner, east),
                WallSegment::new(east, north),
                WallSegment::with_id(shared, north, corner),
            ],
            0.01,
        );
        let faces = trace_faces(&graph);
        assert_eq!(faces, vec![vec![0, 1, 2]]);
    }
}
