//! Legacy finite-element mesh reader (FEFLOW-style `.fem` text).
//!
//! # Supported sections
//! Sections are found by substring markers; the first line containing a
//! marker opens that section.
//!
//! - `DIMENS`: the next line holds the node count and the element count.
//!   Extra tokens are ignored.
//! - `NODE`: the next `element_count` lines each hold one element as a
//!   whitespace-separated list of **1-based** vertex indices. Line `k`
//!   becomes element `k`; indices are stored 0-based.
//! - `COOR`: the following lines, up to a line containing `GK_COOR`, hold
//!   comma-separated reals. Empty tokens (trailing commas) are skipped. The
//!   flat list is every x coordinate followed by every y coordinate.
//!
//! # Failure policy
//! A section whose marker never appears is read as empty; the gap is reported
//! by [`RawMesh::into_tables`] when the data is first needed. A section that is
//! present but broken (bad numbers, short connectivity block, missing
//! `GK_COOR` terminator) fails immediately with
//! [`MeshDisvError::MeshIoParse`].
//!
//! # Limitations
//! - Only the sections above are read; everything else in the file is ignored.
//! - Coordinates are 2D. Elevation blocks are not read.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::MeshReader;
use crate::mesh_error::MeshDisvError;
use crate::topology::arena::{ElementTable, VertexTable};
use crate::topology::point::{CellId, VertexId};

/// Section markers searched for in the mesh text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FemMarkers {
    pub dimensions: String,
    pub connectivity: String,
    pub coordinates: String,
    /// Closes the coordinate block. Must not be a substring of ordinary data lines.
    pub coordinates_end: String,
}

impl Default for FemMarkers {
    fn default() -> Self {
        Self {
            dimensions: "DIMENS".into(),
            connectivity: "NODE".into(),
            coordinates: "COOR".into(),
            coordinates_end: "GK_COOR".into(),
        }
    }
}

/// Node and element counts from the `DIMENS` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub nodes: usize,
    pub elements: usize,
}

/// Line indices of the section marker lines, found in one forward scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FemSections {
    pub dimensions: Option<usize>,
    pub connectivity: Option<usize>,
    pub coordinates: Option<usize>,
}

impl FemSections {
    /// Records the first line containing each marker.
    pub fn scan(lines: &[&str], markers: &FemMarkers) -> Self {
        let mut sections = Self::default();
        for (idx, line) in lines.iter().enumerate() {
            if sections.dimensions.is_none() && line.contains(markers.dimensions.as_str()) {
                sections.dimensions = Some(idx);
            }
            if sections.connectivity.is_none() && line.contains(markers.connectivity.as_str()) {
                sections.connectivity = Some(idx);
            }
            if sections.coordinates.is_none() && line.contains(markers.coordinates.as_str()) {
                sections.coordinates = Some(idx);
            }
            if sections.is_complete() {
                break;
            }
        }
        sections
    }

    pub fn is_complete(&self) -> bool {
        self.dimensions.is_some() && self.connectivity.is_some() && self.coordinates.is_some()
    }
}

/// Mesh content exactly as read, before any cross-section validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMesh {
    /// `None` when the file has no `DIMENS` section.
    pub dimensions: Option<Dimensions>,
    /// 0-based vertex loops; element `k` is `elements[k]`.
    pub elements: Vec<Vec<VertexId>>,
    /// Flat coordinate list: all x values, then all y values.
    pub coordinates: Vec<f64>,
}

impl RawMesh {
    /// `(vertex_count, element_count)` from the `DIMENS` record.
    pub fn counts(&self) -> Option<(usize, usize)> {
        self.dimensions.map(|d| (d.nodes, d.elements))
    }

    /// Cross-check the sections and build the vertex and element tables.
    ///
    /// This is where a missing section surfaces: no `DIMENS` record, a
    /// coordinate list that does not split into `nodes` pairs, a connectivity
    /// block with the wrong number of elements, or a vertex index past the
    /// node count.
    pub fn into_tables(self) -> Result<(VertexTable, ElementTable), MeshDisvError> {
        let dims = self.dimensions.ok_or_else(|| {
            MeshDisvError::MalformedInput("mesh has no DIMENS section".into())
        })?;
        let pairs = split_coordinates(&self.coordinates)?;
        if pairs.len() != dims.nodes {
            return Err(MeshDisvError::MalformedInput(format!(
                "DIMENS declares {} nodes but the COOR section holds {} coordinate pairs",
                dims.nodes,
                pairs.len()
            )));
        }
        if self.elements.len() != dims.elements {
            return Err(MeshDisvError::MalformedInput(format!(
                "DIMENS declares {} elements but the NODE section holds {}",
                dims.elements,
                self.elements.len()
            )));
        }
        for (k, element) in self.elements.iter().enumerate() {
            if let Some(&vertex) = element.iter().find(|v| v.get() >= dims.nodes) {
                return Err(MeshDisvError::MissingVertex {
                    element: CellId::new(k),
                    vertex,
                });
            }
        }
        Ok((
            VertexTable::from_xy(pairs),
            ElementTable::from_loops(self.elements),
        ))
    }
}

/// Split a flat `x…x y…y` list at its midpoint and zip into `(x, y)` pairs.
///
/// Pair `i` is `(flat[i], flat[n + i])` with `n = flat.len() / 2`.
pub fn split_coordinates(flat: &[f64]) -> Result<Vec<[f64; 2]>, MeshDisvError> {
    if flat.len() % 2 != 0 {
        return Err(MeshDisvError::MalformedInput(format!(
            "coordinate list has odd length {}; expected all x values then all y values",
            flat.len()
        )));
    }
    let (xs, ys) = flat.split_at(flat.len() / 2);
    Ok(xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect())
}

/// Reader for FEFLOW-style `.fem` text meshes.
#[derive(Clone, Debug, Default)]
pub struct FemReader {
    pub markers: FemMarkers,
}

impl FemReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markers(markers: FemMarkers) -> Self {
        Self { markers }
    }

    /// Read and parse a mesh file from disk.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<RawMesh, MeshDisvError> {
        let path = path.as_ref();
        log::debug!("reading mesh file {}", path.display());
        let file = std::fs::File::open(path)?;
        self.read(std::io::BufReader::new(file))
    }

    /// Parse mesh text held in memory.
    pub fn parse_str(&self, contents: &str) -> Result<RawMesh, MeshDisvError> {
        let lines: Vec<&str> = contents.lines().collect();
        let sections = FemSections::scan(&lines, &self.markers);
        log::debug!("mesh section cursors: {sections:?}");

        let dimensions = match sections.dimensions {
            Some(at) => Some(Self::parse_dimensions(&lines, at)?),
            None => {
                log::warn!("no `{}` marker found; mesh has no dimensions", self.markers.dimensions);
                None
            }
        };

        let elements = match (sections.connectivity, dimensions) {
            (Some(at), Some(dims)) => Self::parse_connectivity(&lines, at, dims.elements)?,
            (None, _) => {
                log::warn!("no `{}` marker found; mesh has no elements", self.markers.connectivity);
                Vec::new()
            }
            (Some(_), None) => Vec::new(),
        };

        let coordinates = match sections.coordinates {
            Some(at) => self.parse_coordinates(&lines, at)?,
            None => {
                log::warn!("no `{}` marker found; mesh has no coordinates", self.markers.coordinates);
                Vec::new()
            }
        };

        log::debug!(
            "read {} elements and {} coordinate values",
            elements.len(),
            coordinates.len()
        );
        Ok(RawMesh {
            dimensions,
            elements,
            coordinates,
        })
    }

    fn parse_dimensions(lines: &[&str], marker_at: usize) -> Result<Dimensions, MeshDisvError> {
        let line = lines
            .get(marker_at + 1)
            .ok_or_else(|| MeshDisvError::MeshIoParse("missing DIMENS data line".into()))?;
        let mut parts = line.split_whitespace();
        let nodes = Self::parse_count(parts.next(), "node count", line)?;
        let elements = Self::parse_count(parts.next(), "element count", line)?;
        Ok(Dimensions { nodes, elements })
    }

    fn parse_count(raw: Option<&str>, what: &str, line: &str) -> Result<usize, MeshDisvError> {
        let raw = raw.ok_or_else(|| {
            MeshDisvError::MeshIoParse(format!("missing {what} in DIMENS line `{line}`"))
        })?;
        raw.parse::<usize>()
            .map_err(|_| MeshDisvError::MeshIoParse(format!("invalid {what}: {raw}")))
    }

    fn parse_connectivity(
        lines: &[&str],
        marker_at: usize,
        element_count: usize,
    ) -> Result<Vec<Vec<VertexId>>, MeshDisvError> {
        (0..element_count)
            .map(|k| {
                let line = lines.get(marker_at + 1 + k).ok_or_else(|| {
                    MeshDisvError::MeshIoParse(format!(
                        "connectivity block ended after {k} of {element_count} elements"
                    ))
                })?;
                line.split_whitespace()
                    .map(|raw| Self::parse_vertex_index(raw, k))
                    .collect()
            })
            .collect()
    }

    fn parse_vertex_index(raw: &str, element: usize) -> Result<VertexId, MeshDisvError> {
        let one_based = raw.parse::<usize>().map_err(|_| {
            MeshDisvError::MeshIoParse(format!("invalid vertex index in element {element}: {raw}"))
        })?;
        one_based
            .checked_sub(1)
            .map(VertexId::new)
            .ok_or_else(|| {
                MeshDisvError::MeshIoParse(format!(
                    "vertex index 0 in element {element}; indices are 1-based"
                ))
            })
    }

    fn parse_coordinates(&self, lines: &[&str], marker_at: usize) -> Result<Vec<f64>, MeshDisvError> {
        let end_marker = self.markers.coordinates_end.as_str();
        let mut values = Vec::new();
        for line in &lines[marker_at + 1..] {
            if line.contains(end_marker) {
                return Ok(values);
            }
            for raw in line.trim().split(',') {
                let raw = raw.trim();
                if raw.is_empty() {
                    continue;
                }
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| MeshDisvError::MeshIoParse(format!("invalid coordinate: {raw}")))?;
                values.push(value);
            }
        }
        Err(MeshDisvError::MeshIoParse(format!(
            "coordinate block is not terminated by `{end_marker}`"
        )))
    }
}

impl MeshReader for FemReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<RawMesh, MeshDisvError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        self.parse_str(&contents)
    }
}
