//! Mesh tables and the polygon records built from them.
//!
//! - [`point`]: dense `VertexId` / `CellId` handles
//! - [`element`]: vertex and raw element rows
//! - [`arena`]: append-only vertex and element tables
//! - [`cell2d`]: winding-normalized Cell2D records

pub mod arena;
pub mod cell2d;
pub mod element;
pub mod point;

pub use arena::{Arena, ElementTable, VertexTable};
pub use cell2d::{Cell2d, ElementGeometry, build_cell2d, create_cell2d, process_vertices};
pub use element::{Element, Vertex};
pub use point::{CellId, VertexId};
