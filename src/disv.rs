//! End-to-end conversion of a legacy FE mesh into a DISV grid.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. read the mesh sections ([`FemReader`]) and build the vertex and element
//!    tables ([`RawMesh::into_tables`]);
//! 2. append the inflow features ([`add_inflow_features`]);
//! 3. build Cell2D records over the extended tables ([`build_cell2d`]).
//!
//! Zones, boundary cells and parameter arrays are derived from the resulting
//! [`DisvGrid`] on demand.
//!
//! # Example
//! ```rust
//! use mesh_disv::disv::{DisvOptions, read_finite_element_mesh_from};
//! use mesh_disv::algs::zones::ZoneRule;
//!
//! let text = "DIMENS\n3 1\nNODE\n1 2 3\nCOOR\n0,1,0,\n0,0,1,\nEND_GK_COOR\n";
//! let grid = read_finite_element_mesh_from(text.as_bytes(), &DisvOptions::default())?;
//! assert_eq!(grid.nvert(), 3);
//! assert_eq!(grid.ncpl(), 1);
//!
//! let k = grid.param(&ZoneRule::default(), 10.0, 0.1)?;
//! assert_eq!(k, vec![0.1]);
//! # Ok::<(), mesh_disv::mesh_error::MeshDisvError>(())
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algs::boundary::{
    BoundaryBand, BoundaryCells, InflowBand, add_inflow_features, determine_boundary_cells,
};
use crate::algs::zones::{ZoneAssignment, ZoneRule, determine_param, determine_zones};
use crate::debug_invariants::DebugInvariants;
use crate::geometry::orientation::{Winding, signed_area};
use crate::io::MeshReader;
use crate::io::fem::{FemMarkers, FemReader, RawMesh};
use crate::mesh_error::MeshDisvError;
use crate::topology::arena::{ElementTable, VertexTable};
use crate::topology::cell2d::{Cell2d, build_cell2d};
use crate::topology::element::{Element, Vertex};
use crate::topology::point::{CellId, VertexId};

/// Options for [`read_finite_element_mesh`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisvOptions {
    pub markers: FemMarkers,
    pub inflow: InflowBand,
    /// Set to `false` to convert the mesh without inflow features.
    pub add_inflow_features: bool,
}

impl Default for DisvOptions {
    fn default() -> Self {
        Self {
            markers: FemMarkers::default(),
            inflow: InflowBand::default(),
            add_inflow_features: true,
        }
    }
}

/// Vertices, cells and inflow features of a converted mesh.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisvGrid {
    vertices: VertexTable,
    #[serde(skip)]
    elements: ElementTable,
    cells: Vec<Cell2d>,
    inflow_features: Vec<Element>,
}

impl DisvGrid {
    /// Augment the tables with inflow features and build the cell records.
    pub fn assemble(
        mut vertices: VertexTable,
        mut elements: ElementTable,
        options: &DisvOptions,
    ) -> Result<Self, MeshDisvError> {
        let inflow_features = if options.add_inflow_features {
            add_inflow_features(&mut vertices, &mut elements, &options.inflow)
        } else {
            Vec::new()
        };
        let cells = build_cell2d(&elements, &vertices)?;
        let grid = Self {
            vertices,
            elements,
            cells,
            inflow_features,
        };
        grid.debug_assert_invariants();
        log::debug!(
            "disv grid: {} vertices, {} cells, {} inflow features",
            grid.nvert(),
            grid.ncpl(),
            grid.inflow_features.len()
        );
        Ok(grid)
    }

    /// Validate a raw mesh and convert it.
    pub fn from_raw(raw: RawMesh, options: &DisvOptions) -> Result<Self, MeshDisvError> {
        let (vertices, elements) = raw.into_tables()?;
        Self::assemble(vertices, elements, options)
    }

    /// Number of vertices, including those added for inflow features.
    #[inline]
    pub fn nvert(&self) -> usize {
        self.vertices.len()
    }

    /// Number of cells per layer.
    #[inline]
    pub fn ncpl(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn vertices(&self) -> &VertexTable {
        &self.vertices
    }

    #[inline]
    pub fn elements(&self) -> &ElementTable {
        &self.elements
    }

    #[inline]
    pub fn cells(&self) -> &[Cell2d] {
        &self.cells
    }

    #[inline]
    pub fn inflow_features(&self) -> &[Element] {
        &self.inflow_features
    }

    pub fn inflow_feature_ids(&self) -> Vec<CellId> {
        self.inflow_features.iter().map(|e| e.id).collect()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Flat `(id, centroid_x, centroid_y, vertex_count, vertex_ids)` rows.
    pub fn cell2d_records(&self) -> Vec<(usize, f64, f64, usize, Vec<usize>)> {
        self.cells.iter().map(Cell2d::to_record).collect()
    }

    pub fn zones(&self, rule: &ZoneRule) -> ZoneAssignment {
        determine_zones(&self.cells, rule)
    }

    pub fn boundary_cells(&self, band: &BoundaryBand) -> Result<BoundaryCells, MeshDisvError> {
        determine_boundary_cells(&self.cells, &self.vertices, band)
    }

    /// Dense per-cell parameter from the two-zone split.
    pub fn param<T: Copy>(
        &self,
        rule: &ZoneRule,
        value_high: T,
        value_low: T,
    ) -> Result<Vec<T>, MeshDisvError> {
        determine_param(&self.zones(rule), value_high, value_low)
    }

    /// Give the tables back, e.g. to append more features.
    pub fn into_tables(self) -> (VertexTable, ElementTable) {
        (self.vertices, self.elements)
    }
}

impl DebugInvariants for DisvGrid {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "DisvGrid");
    }

    fn validate_invariants(&self) -> Result<(), MeshDisvError> {
        self.vertices.validate_invariants()?;
        self.elements.validate_invariants()?;
        if self.cells.len() != self.elements.len() {
            return Err(MeshDisvError::InvariantViolation(format!(
                "{} cells for {} elements",
                self.cells.len(),
                self.elements.len()
            )));
        }
        for (pos, cell) in self.cells.iter().enumerate() {
            if cell.id.get() != pos {
                return Err(MeshDisvError::InvariantViolation(format!(
                    "cell at position {pos} carries id {}",
                    cell.id
                )));
            }
            let mut xy = Vec::with_capacity(cell.vertex_ids.len());
            for &vid in &cell.vertex_ids {
                let v = self.vertices.get(vid).ok_or(MeshDisvError::MissingVertex {
                    element: cell.id,
                    vertex: vid,
                })?;
                xy.push(v.xy());
            }
            if cell.source_winding != Winding::Degenerate && signed_area(&xy) > 0.0 {
                return Err(MeshDisvError::InvariantViolation(format!(
                    "cell {} is counter-clockwise after normalization",
                    cell.id
                )));
            }
        }
        if let Some(feature) = self.inflow_features.iter().find(|f| f.id.get() >= self.cells.len()) {
            return Err(MeshDisvError::InvariantViolation(format!(
                "inflow feature {} has no cell",
                feature.id
            )));
        }
        Ok(())
    }
}

/// Read a mesh file and convert it into a DISV grid.
pub fn read_finite_element_mesh<P: AsRef<Path>>(
    path: P,
    options: &DisvOptions,
) -> Result<DisvGrid, MeshDisvError> {
    let raw = FemReader::with_markers(options.markers.clone()).read_path(path)?;
    DisvGrid::from_raw(raw, options)
}

/// [`read_finite_element_mesh`] over any reader.
pub fn read_finite_element_mesh_from<R: Read>(
    reader: R,
    options: &DisvOptions,
) -> Result<DisvGrid, MeshDisvError> {
    let raw = FemReader::with_markers(options.markers.clone()).read(reader)?;
    DisvGrid::from_raw(raw, options)
}
