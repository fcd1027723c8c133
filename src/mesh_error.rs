//! MeshDisvError: Unified error type for mesh-disv public APIs
//!
//! Every fallible operation in the crate returns this error instead of
//! panicking. Parse problems are reported where the broken text is found;
//! missing sections surface as [`MeshDisvError::MalformedInput`] the first
//! time the absent data is needed.

use crate::topology::point::{CellId, VertexId};
use thiserror::Error;

/// Unified error type for mesh-disv operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshDisvError {
    /// A mesh section exists but its content could not be parsed.
    #[error("Mesh IO parse error: {0}")]
    MeshIoParse(String),
    /// The underlying reader failed.
    #[error("Mesh IO error: {0}")]
    Io(String),
    /// A required section was missing or its sizes disagree with the header.
    #[error("Malformed mesh input: {0}")]
    MalformedInput(String),
    /// An element refers to a vertex that is not in the vertex table.
    #[error("Topology error: element {element} references missing vertex {vertex}")]
    MissingVertex { element: CellId, vertex: VertexId },
    /// An element has an empty vertex loop.
    #[error("Topology error: element {0} has no vertices")]
    EmptyElement(CellId),
    /// A cell id in `[0, max_id]` belongs to neither zone.
    #[error("Zone coverage error: cell {id} (0-based) is missing from both zones")]
    ZoneCoverage { id: CellId },
    /// A cell id was assigned more than once (to both zones, or twice to one).
    #[error("Zone coverage error: cell {id} (0-based) is assigned more than once")]
    ZoneOverlap { id: CellId },
    /// A table or grid failed its structural checks.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<std::io::Error> for MeshDisvError {
    fn from(err: std::io::Error) -> Self {
        MeshDisvError::Io(err.to_string())
    }
}
