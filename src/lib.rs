//! # mesh-disv
//!
//! mesh-disv converts legacy finite-element meshes (FEFLOW-style `.fem` text)
//! into the unstructured polygonal DISV grid used by groundwater-flow
//! simulators. On the way it stitches thin inflow-injection cells along the
//! left model edge and splits the cells into two material zones.
//!
//! ## Pipeline
//! - [`io::fem`]: section-cursor reader for the `DIMENS`, `NODE` and `COOR`
//!   blocks of the mesh text
//! - [`topology`]: append-only vertex/element tables and clockwise Cell2D records
//! - [`algs::boundary`]: inflow feature synthesis and left/right boundary cells
//! - [`algs::zones`]: two-zone classification and dense parameter arrays
//! - [`disv`]: the end-to-end [`read_finite_element_mesh`](disv::read_finite_element_mesh)
//!
//! ## Ids
//! Vertex and cell ids are zero-based positions in their tables. The tables
//! only grow, so ids stay valid while inflow features are appended.
//!
//! ## Errors
//! All fallible APIs return [`MeshDisvError`](mesh_error::MeshDisvError); no
//! public function panics on malformed input.
//!
//! ## Logging
//! The crate logs through the [`log`] facade and installs no logger.

pub mod algs;
pub mod debug_invariants;
pub mod disv;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::boundary::{
        BoundaryBand, BoundaryCells, InflowBand, add_inflow_features, determine_boundary_cells,
        generate_boundary_features,
    };
    pub use crate::algs::zones::{
        Zone, ZoneAssignment, ZoneRule, determine_param, determine_zones,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::disv::{
        DisvGrid, DisvOptions, read_finite_element_mesh, read_finite_element_mesh_from,
    };
    pub use crate::geometry::orientation::Winding;
    pub use crate::io::MeshReader;
    pub use crate::io::fem::{FemMarkers, FemReader, RawMesh};
    pub use crate::mesh_error::MeshDisvError;
    pub use crate::topology::arena::{ElementTable, VertexTable};
    pub use crate::topology::cell2d::{Cell2d, build_cell2d};
    pub use crate::topology::element::{Element, Vertex};
    pub use crate::topology::point::{CellId, VertexId};
}
