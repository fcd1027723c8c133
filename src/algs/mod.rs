//! Algorithms that walk the vertex/element tables and the finished cells.

pub mod boundary;
pub mod zones;

pub use boundary::{
    BoundaryBand, BoundaryCells, InflowBand, add_inflow_features, determine_boundary_cells,
    generate_boundary_features, inflow_candidates,
};
pub use zones::{Zone, ZoneAssignment, ZoneRule, determine_param, determine_zones};
