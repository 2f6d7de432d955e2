//! Planar wall graph with fuzzy vertex identity.
//!
//! Vertices live in an arena indexed by registration order. Wall endpoints are
//! matched against existing vertices through a spatial hash whose cells are
//! `epsilon` wide, so any vertex within `epsilon` of a query point sits in the
//! query cell or one of its eight neighbours.

use std::collections::HashMap;

use crate::geometry::{Position2D, WallId, WallSegment};

/// One side of an undirected wall as seen from a vertex.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GraphEdge {
    /// Index of the vertex at the other end.
    pub to: usize,
    pub wall_id: WallId,
    /// Absolute bearing toward `to`, `atan2(dz, dx)`.
    pub bearing: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct GraphVertex {
    pub position: Position2D,
    /// Incident edges sorted by ascending bearing once the graph is built.
    pub edges: Vec<GraphEdge>,
}

type CellKey = (i64, i64);

#[derive(Debug)]
pub(crate) struct WallGraph {
    vertices: Vec<GraphVertex>,
    cells: HashMap<CellKey, Vec<usize>>,
    epsilon: f64,
}

impl WallGraph {
    /// Build the graph from walls in input order. Walls whose endpoints
    /// collapse onto one vertex contribute no edge.
    pub fn build(walls: &[WallSegment], epsilon: f64) -> Self {
        let mut graph = Self {
            vertices: Vec::new(),
            cells: HashMap::new(),
            epsilon,
        };

        for wall in walls {
            let u = graph.vertex_for(wall.from);
            let v = graph.vertex_for(wall.to);
            if u == v {
                log::trace!("Skipping degenerate wall {}", wall.id);
                continue;
            }
            graph.connect(u, v, wall.id);
        }

        for vertex in &mut graph.vertices {
            vertex.edges.sort_by(|a, b| a.bearing.total_cmp(&b.bearing));
        }

        graph
    }

    pub fn vertices(&self) -> &[GraphVertex] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> &GraphVertex {
        &self.vertices[index]
    }

    /// Number of directed half-edges (twice the number of edges).
    pub fn half_edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum()
    }

    /// Far coordinates or a tiny epsilon saturate at the `i64` limits. Distinct
    /// vertices may then share a cell; `approx_eq` still separates them.
    fn cell_of(&self, p: Position2D) -> CellKey {
        (
            (p.x / self.epsilon).floor() as i64,
            (p.z / self.epsilon).floor() as i64,
        )
    }

    /// Earliest-registered vertex within epsilon of `p`, registering a new one
    /// when none matches.
    fn vertex_for(&mut self, p: Position2D) -> usize {
        let (cx, cz) = self.cell_of(p);
        let mut found: Option<usize> = None;
        for dx in -1..=1 {
            for dz in -1..=1 {
                let key = (cx.saturating_add(dx), cz.saturating_add(dz));
                let Some(bucket) = self.cells.get(&key) else {
                    continue;
                };
                for &index in bucket {
                    if found.is_some_and(|f| f <= index) {
                        continue;
                    }
                    if self.vertices[index].position.approx_eq(p, self.epsilon) {
                        found = Some(index);
                    }
                }
            }
        }

        if let Some(index) = found {
            return index;
        }

        let index = self.vertices.len();
        self.vertices.push(GraphVertex {
            position: p,
            edges: Vec::new(),
        });
        self.cells.entry((cx, cz)).or_default().push(index);
        index
    }

    fn connect(&mut self, u: usize, v: usize, wall_id: WallId) {
        let pu = self.vertices[u].position;
        let pv = self.vertices[v].position;
        self.vertices[u].edges.push(GraphEdge {
            to: v,
            wall_id,
            bearing: pu.vector_to(pv).atan2(),
        });
        self.vertices[v].edges.push(GraphEdge {
            to: u,
            wall_id,
            bearing: pv.vector_to(pu).atan2(),
        });
    }
}
