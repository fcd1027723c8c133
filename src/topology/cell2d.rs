//! Cell2D records: winding-normalized polygons built from raw elements.
//!
//! Building happens in two passes that mirror how the data is consumed:
//! [`process_vertices`] joins each element's vertex ids to coordinates and
//! computes its centroid, then [`create_cell2d`] fixes the loop orientation.
//! [`build_cell2d`] runs both.
//!
//! # Orientation
//! Only strictly clockwise source loops are kept as they are; every other
//! loop is reversed. That includes degenerate (zero-area) loops, which have
//! no orientation of their own and are reversed like counter-clockwise ones.

use serde::Serialize;

use crate::geometry::orientation::{Winding, centroid, winding};
use crate::mesh_error::MeshDisvError;
use crate::topology::arena::{ElementTable, VertexTable};
use crate::topology::element::Element;
use crate::topology::point::{CellId, VertexId};

/// Per-element geometry: centroid plus the coordinate loop in element order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementGeometry {
    pub centroid: [f64; 2],
    pub xy: Vec<[f64; 2]>,
}

/// A finalized DISV polygon.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cell2d {
    pub id: CellId,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub vertex_count: usize,
    /// Clockwise vertex loop (reversed source order for degenerate loops).
    pub vertex_ids: Vec<VertexId>,
    /// Orientation of the source loop before normalization.
    #[serde(skip)]
    pub source_winding: Winding,
}

impl Cell2d {
    /// Flat `(id, centroid_x, centroid_y, vertex_count, vertex_ids)` row.
    pub fn to_record(&self) -> (usize, f64, f64, usize, Vec<usize>) {
        (
            self.id.get(),
            self.centroid_x,
            self.centroid_y,
            self.vertex_count,
            self.vertex_ids.iter().map(|v| v.get()).collect(),
        )
    }

    /// `true` if the source loop was reversed.
    #[inline]
    pub fn was_reversed(&self) -> bool {
        self.source_winding != Winding::Clockwise
    }

    /// The last `n` vertices of the loop (fewer if the loop is shorter).
    pub fn trailing_vertices(&self, n: usize) -> &[VertexId] {
        let start = self.vertex_ids.len().saturating_sub(n);
        &self.vertex_ids[start..]
    }
}

fn element_xy(element: &Element, vertices: &VertexTable) -> Result<Vec<[f64; 2]>, MeshDisvError> {
    element
        .vertex_ids
        .iter()
        .map(|&vid| {
            vertices
                .get(vid)
                .map(|v| v.xy())
                .ok_or(MeshDisvError::MissingVertex {
                    element: element.id,
                    vertex: vid,
                })
        })
        .collect()
}

/// Compute centroid and coordinate loop for every element, in element order.
pub fn process_vertices(
    elements: &ElementTable,
    vertices: &VertexTable,
) -> Result<Vec<ElementGeometry>, MeshDisvError> {
    elements
        .iter()
        .map(|element| {
            let xy = element_xy(element, vertices)?;
            let centroid = centroid(&xy).ok_or(MeshDisvError::EmptyElement(element.id))?;
            Ok(ElementGeometry { centroid, xy })
        })
        .collect()
}

/// Build clockwise Cell2D records from elements and their precomputed geometry.
///
/// `geometry[k]` must belong to the `k`-th element.
pub fn create_cell2d(
    elements: &ElementTable,
    geometry: &[ElementGeometry],
) -> Result<Vec<Cell2d>, MeshDisvError> {
    if geometry.len() != elements.len() {
        return Err(MeshDisvError::MalformedInput(format!(
            "geometry for {} elements supplied for {} elements",
            geometry.len(),
            elements.len()
        )));
    }

    let mut reversed = 0usize;
    let mut degenerate = 0usize;
    let cells: Vec<Cell2d> = elements
        .iter()
        .zip(geometry)
        .map(|(element, geom)| {
            let source_winding = winding(&geom.xy);
            let vertex_ids = match source_winding {
                Winding::Clockwise => element.vertex_ids.clone(),
                Winding::CounterClockwise | Winding::Degenerate => {
                    if source_winding == Winding::Degenerate {
                        degenerate += 1;
                        log::debug!("cell {} has a zero-area loop", element.id);
                    }
                    reversed += 1;
                    element.vertex_ids.iter().rev().copied().collect()
                }
            };
            Cell2d {
                id: element.id,
                centroid_x: geom.centroid[0],
                centroid_y: geom.centroid[1],
                vertex_count: element.vertex_count(),
                vertex_ids,
                source_winding,
            }
        })
        .collect();

    log::debug!(
        "built {} cell2d records ({reversed} reversed, {degenerate} degenerate)",
        elements.len()
    );
    Ok(cells)
}

/// [`process_vertices`] followed by [`create_cell2d`].
pub fn build_cell2d(
    elements: &ElementTable,
    vertices: &VertexTable,
) -> Result<Vec<Cell2d>, MeshDisvError> {
    let geometry = process_vertices(elements, vertices)?;
    create_cell2d(elements, &geometry)
}
