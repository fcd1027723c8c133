//! Two-zone material classification and dense per-cell parameter arrays.
//!
//! Cells whose centroid lies at or above `low_at_or_above`, or at or below
//! `low_at_or_below`, belong to the low zone; every other cell belongs to the
//! high zone. [`determine_param`] turns the two id lists into an array indexed
//! by cell id and refuses to do so unless the lists partition
//! `[0, max_id]` exactly.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshDisvError;
use crate::topology::cell2d::Cell2d;
use crate::topology::point::CellId;

/// Zone a cell belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Low,
    High,
}

/// Centroid-y thresholds for the low zone (both inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneRule {
    pub low_at_or_above: f64,
    pub low_at_or_below: f64,
}

impl Default for ZoneRule {
    fn default() -> Self {
        Self {
            low_at_or_above: 35.0,
            low_at_or_below: 15.0,
        }
    }
}

impl ZoneRule {
    pub fn classify(&self, centroid_y: f64) -> Zone {
        if centroid_y >= self.low_at_or_above || centroid_y <= self.low_at_or_below {
            Zone::Low
        } else {
            Zone::High
        }
    }
}

/// Sorted cell ids per zone.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ZoneAssignment {
    pub low: Vec<CellId>,
    pub high: Vec<CellId>,
}

impl ZoneAssignment {
    pub fn ids(&self, zone: Zone) -> &[CellId] {
        match zone {
            Zone::Low => &self.low,
            Zone::High => &self.high,
        }
    }

    /// Largest id in either list.
    pub fn max_id(&self) -> Option<CellId> {
        self.low.iter().chain(&self.high).copied().max()
    }

    /// Dense `zone[id]` lookup; fails like [`determine_param`].
    ///
    /// Works on the sorted union of both lists, so memory is bounded by the
    /// number of listed ids whatever the largest id is. The first position
    /// where the union stops matching `0, 1, 2, ...` decides the error.
    pub fn zone_per_cell(&self) -> Result<Vec<Zone>, MeshDisvError> {
        let mut tagged: Vec<(CellId, Zone)> = self
            .low
            .iter()
            .map(|&id| (id, Zone::Low))
            .chain(self.high.iter().map(|&id| (id, Zone::High)))
            .collect();
        tagged.sort_by_key(|&(id, _)| id);

        for (pos, &(id, _)) in tagged.iter().enumerate() {
            if id.get() < pos {
                return Err(MeshDisvError::ZoneOverlap { id });
            }
            if id.get() > pos {
                return Err(MeshDisvError::ZoneCoverage { id: CellId::new(pos) });
            }
        }
        Ok(tagged.into_iter().map(|(_, zone)| zone).collect())
    }
}

/// Split cells into low and high zones by centroid y.
pub fn determine_zones(cells: &[Cell2d], rule: &ZoneRule) -> ZoneAssignment {
    let mut out = ZoneAssignment::default();
    for cell in cells {
        match rule.classify(cell.centroid_y) {
            Zone::Low => out.low.push(cell.id),
            Zone::High => out.high.push(cell.id),
        }
    }
    out.low.sort_unstable();
    out.high.sort_unstable();
    log::debug!(
        "zoned {} cells: {} low, {} high",
        cells.len(),
        out.low.len(),
        out.high.len()
    );
    out
}

/// Dense parameter array: `value_high` for high-zone ids, `value_low` for low-zone ids.
///
/// Fails with the offending id if some id in `[0, max_id]` is in neither list
/// ([`MeshDisvError::ZoneCoverage`]) or in both ([`MeshDisvError::ZoneOverlap`]).
/// A coverage failure means the topology upstream is inconsistent; callers
/// should not paper over it.
pub fn determine_param<T: Copy>(
    zones: &ZoneAssignment,
    value_high: T,
    value_low: T,
) -> Result<Vec<T>, MeshDisvError> {
    let per_cell = zones.zone_per_cell()?;
    Ok(per_cell
        .into_iter()
        .map(|zone| match zone {
            Zone::High => value_high,
            Zone::Low => value_low,
        })
        .collect())
}
