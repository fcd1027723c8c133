//! Mesh readers.
//!
//! Readers turn mesh storage into a [`RawMesh`](fem::RawMesh): the sections of
//! the file exactly as read, before they are cross-checked and turned into
//! vertex and element tables.

pub mod fem;

use crate::mesh_error::MeshDisvError;
use std::io::Read;

pub use fem::{Dimensions, FemMarkers, FemReader, FemSections, RawMesh, split_coordinates};

/// Trait for mesh readers that produce raw node/element sections.
pub trait MeshReader {
    /// Parse mesh data from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<RawMesh, MeshDisvError>;
}
