//! Inflow boundary features and physical-boundary cell classification.
//!
//! # Inflow features
//! Vertices in the left-edge inflow band are sorted top to bottom, and every
//! consecutive pair `(pt1, pt2)` is stitched to the injection line
//! `x = injection_x` with a thin quadrilateral
//! `[pt1, pt2, pt3, pt4]`, where `pt3 = (injection_x, pt2.y)` is new and `pt4`
//! is the previous feature's `pt3`. The first feature has no predecessor, so
//! its `pt4 = (injection_x, pt1.y)` is created as well. Consecutive features
//! therefore share an edge along the injection line.
//!
//! New vertices and elements are appended to the tables; nothing already in
//! them is touched, so every existing id keeps its meaning.
//!
//! # Boundary cells
//! [`determine_boundary_cells`] classifies finished cells as lying on the left
//! or right model edge by looking at the last three vertices of each loop.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshDisvError;
use crate::topology::arena::{ElementTable, VertexTable};
use crate::topology::cell2d::Cell2d;
use crate::topology::element::{Element, Vertex};
use crate::topology::point::{CellId, VertexId};

/// Spatial band selecting the inflow vertices, and where features are stitched to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflowBand {
    /// Inclusive lower y bound.
    pub y_min: f64,
    /// Inclusive upper y bound.
    pub y_max: f64,
    /// Exclusive upper x bound.
    pub x_max: f64,
    /// x coordinate of the vertices created for the features.
    pub injection_x: f64,
}

impl Default for InflowBand {
    fn default() -> Self {
        Self {
            y_min: 15.0,
            y_max: 35.0,
            x_max: 0.5,
            injection_x: 0.0,
        }
    }
}

impl InflowBand {
    #[inline]
    pub fn contains(&self, v: &Vertex) -> bool {
        v.y >= self.y_min && v.y <= self.y_max && v.x < self.x_max
    }
}

/// Band used to decide whether a cell sits on the left or right model edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryBand {
    pub y_min: f64,
    pub y_max: f64,
    /// Vertices with `x < left_x_max` count toward the left edge.
    pub left_x_max: f64,
    /// Vertices with `x > right_x - tolerance` count toward the right edge.
    pub right_x: f64,
    pub tolerance: f64,
}

impl Default for BoundaryBand {
    fn default() -> Self {
        Self {
            y_min: 15.0,
            y_max: 35.0,
            left_x_max: 0.25,
            right_x: 135.0,
            tolerance: 0.01,
        }
    }
}

/// Left and right boundary cells, each in cell order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BoundaryCells {
    pub left: Vec<CellId>,
    pub right: Vec<CellId>,
}

/// Vertices inside the inflow band, in id order.
pub fn select_inflow_vertices(vertices: &VertexTable, band: &InflowBand) -> Vec<Vertex> {
    vertices.iter().filter(|v| band.contains(v)).copied().collect()
}

/// Sort vertices top to bottom (descending y). Equal y keeps the input order.
pub fn sort_along_boundary(candidates: &mut [Vertex]) {
    candidates.sort_by(|a, b| b.y.total_cmp(&a.y));
}

/// Inflow-band vertices in boundary traversal order.
pub fn inflow_candidates(vertices: &VertexTable, band: &InflowBand) -> Vec<Vertex> {
    let mut candidates = select_inflow_vertices(vertices, band);
    sort_along_boundary(&mut candidates);
    candidates
}

/// Carried between consecutive vertex pairs while stitching features.
#[derive(Default)]
struct Stitch {
    /// `pt3` of the previous feature; `None` before the first pair.
    previous: Option<VertexId>,
    pair_index: usize,
    features: Vec<Element>,
}

/// Stitch one feature per consecutive pair of `candidates`.
///
/// `candidates` must already be in traversal order (see
/// [`sort_along_boundary`]). Fewer than two candidates yields no features and
/// leaves both tables untouched. Returns the appended elements.
pub fn generate_boundary_features(
    vertices: &mut VertexTable,
    elements: &mut ElementTable,
    candidates: &[Vertex],
    injection_x: f64,
) -> Vec<Element> {
    let stitched = candidates
        .iter()
        .tuple_windows()
        .fold(Stitch::default(), |mut acc, (pt1, pt2)| {
            let pt3 = vertices.push(injection_x, pt2.y);
            let pt4 = match acc.previous {
                Some(previous) => previous,
                None => vertices.push(injection_x, pt1.y),
            };
            let vertex_ids = vec![pt1.id, pt2.id, pt3, pt4];
            let id = elements.push(vertex_ids.clone());
            log::trace!("inflow feature {} (pair {}): {vertex_ids:?}", id, acc.pair_index);
            acc.features.push(Element { id, vertex_ids });
            acc.previous = Some(pt3);
            acc.pair_index += 1;
            acc
        });

    log::debug!(
        "stitched {} inflow features from {} boundary vertices",
        stitched.features.len(),
        candidates.len()
    );
    stitched.features
}

/// Select, sort and stitch the inflow features for `band`.
pub fn add_inflow_features(
    vertices: &mut VertexTable,
    elements: &mut ElementTable,
    band: &InflowBand,
) -> Vec<Element> {
    let candidates = inflow_candidates(vertices, band);
    if candidates.len() < 2 {
        log::debug!(
            "inflow band holds {} vertices; no features generated",
            candidates.len()
        );
    }
    generate_boundary_features(vertices, elements, &candidates, band.injection_x)
}

/// Classify cells on the left and right model edges.
///
/// A cell is a left (right) boundary cell if at least two of the last three
/// vertices of its loop lie in the y band and satisfy the left (right) x test.
pub fn determine_boundary_cells(
    cells: &[Cell2d],
    vertices: &VertexTable,
    band: &BoundaryBand,
) -> Result<BoundaryCells, MeshDisvError> {
    let mut out = BoundaryCells::default();
    for cell in cells {
        let mut left = 0usize;
        let mut right = 0usize;
        for &vid in cell.trailing_vertices(3) {
            let v = vertices.get(vid).ok_or(MeshDisvError::MissingVertex {
                element: cell.id,
                vertex: vid,
            })?;
            if v.y < band.y_min || v.y > band.y_max {
                continue;
            }
            if v.x < band.left_x_max {
                left += 1;
                if left == 2 {
                    out.left.push(cell.id);
                }
            } else if v.x > band.right_x - band.tolerance {
                right += 1;
                if right == 2 {
                    out.right.push(cell.id);
                }
            }
        }
    }
    log::debug!(
        "{} left and {} right boundary cells",
        out.left.len(),
        out.right.len()
    );
    Ok(out)
}
