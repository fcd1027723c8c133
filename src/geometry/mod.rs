//! Planar geometry used when building cell records.

pub mod orientation;

pub use orientation::{Winding, centroid, is_clockwise, signed_area, winding};
