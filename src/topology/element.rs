//! Row types stored in the vertex and element tables.

use crate::topology::point::{CellId, VertexId};
use serde::Serialize;

/// A mesh vertex `(id, x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    /// Returns the `(id, x, y)` triple handed to grid consumers.
    #[inline]
    pub fn as_triple(&self) -> (usize, f64, f64) {
        (self.id.get(), self.x, self.y)
    }

    #[inline]
    pub fn xy(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// A raw element: a vertex loop in source order.
///
/// The loop is not guaranteed to be winding-consistent; see
/// [`create_cell2d`](crate::topology::cell2d::create_cell2d).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Element {
    pub id: CellId,
    pub vertex_ids: Vec<VertexId>,
}

impl Element {
    /// Number of vertices in the loop.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_ids.len()
    }
}
