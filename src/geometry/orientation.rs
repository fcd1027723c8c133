//! Polygon winding and centroid helpers for `(x, y)` vertex loops.
//!
//! # Sign convention
//! [`signed_area`] is the shoelace sum `½ Σ (xᵢ·yᵢ₊₁ − xᵢ₊₁·yᵢ)` over the closed
//! loop. It is positive for counter-clockwise loops and negative for
//! clockwise loops in a y-up frame.
//!
//! # Degenerate loops
//! Inflow features stitched along `x = 0` can collapse to a line when the
//! boundary vertices themselves sit on `x = 0`. Such loops have zero area and
//! no meaningful orientation; [`winding`] reports them as
//! [`Winding::Degenerate`] instead of picking a side.
//! [`create_cell2d`](crate::topology::cell2d::create_cell2d) reverses them,
//! since only strictly clockwise loops are kept as read.

use serde::Serialize;

/// Relative tolerance for treating a loop as zero-area.
///
/// The threshold is scaled by the squared extent of the loop, so it behaves
/// the same for meshes in metres or kilometres.
pub const DEGENERATE_AREA_RTOL: f64 = 1e-12;

/// Orientation of a closed vertex loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Zero-area loop (collinear or repeated vertices, or fewer than three).
    Degenerate,
}

/// Shoelace signed area of a closed loop.
pub fn signed_area(points: &[[f64; 2]]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a[0] * b[1] - b[0] * a[1])
        .sum();
    0.5 * twice
}

/// Classifies the orientation of a closed loop.
pub fn winding(points: &[[f64; 2]]) -> Winding {
    let area = signed_area(points);
    if !area.is_finite() || area.abs() <= DEGENERATE_AREA_RTOL * extent_sq(points).max(1.0) {
        return Winding::Degenerate;
    }
    if area < 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

/// `true` only for strictly clockwise loops.
#[inline]
pub fn is_clockwise(points: &[[f64; 2]]) -> bool {
    winding(points) == Winding::Clockwise
}

/// Arithmetic mean of the loop's x and y coordinates, or `None` for an empty loop.
pub fn centroid(points: &[[f64; 2]]) -> Option<[f64; 2]> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    Some([sx / n, sy / n])
}

fn extent_sq(points: &[[f64; 2]]) -> f64 {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in points {
        for k in 0..2 {
            min[k] = min[k].min(p[k]);
            max[k] = max[k].max(p[k]);
        }
    }
    let dx = max[0] - min[0];
    let dy = max[1] - min[1];
    dx * dx + dy * dy
}
