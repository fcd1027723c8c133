mod common;

use proptest::prelude::*;

use mesh_disv::algs::boundary::{InflowBand, add_inflow_features};
use mesh_disv::algs::zones::{ZoneAssignment, ZoneRule, determine_param, determine_zones};
use mesh_disv::debug_invariants::DebugInvariants;
use mesh_disv::disv::{DisvOptions, read_finite_element_mesh_from};
use mesh_disv::geometry::orientation::{Winding, signed_area};
use mesh_disv::io::fem::split_coordinates;
use mesh_disv::topology::arena::{ElementTable, VertexTable};
use mesh_disv::topology::cell2d::build_cell2d;
use mesh_disv::topology::point::CellId;

fn coordinate() -> impl Strategy<Value = f64> {
    (-1000i32..1000).prop_map(|v| f64::from(v) * 0.25)
}

proptest! {
    #[test]
    fn split_pairs_index_i_with_n_plus_i(flat in prop::collection::vec(coordinate(), 0..40)) {
        let even = &flat[..flat.len() / 2 * 2];
        let pairs = split_coordinates(even).unwrap();
        let n = even.len() / 2;
        prop_assert_eq!(pairs.len(), n);
        for (i, pair) in pairs.iter().enumerate() {
            prop_assert_eq!(*pair, [even[i], even[n + i]]);
        }
    }

    #[test]
    fn repeated_augmentation_keeps_tables_dense(
        ys in prop::collection::vec(0i32..50, 0..12),
        rounds in 1usize..4,
    ) {
        let mut vertices = VertexTable::from_xy(ys.iter().map(|&y| [0.3, f64::from(y)]));
        let mut elements = ElementTable::new();
        for _ in 0..rounds {
            let before_vertices = vertices.len();
            let before_elements = elements.len();
            let features = add_inflow_features(&mut vertices, &mut elements, &InflowBand::default());
            for (k, feature) in features.iter().enumerate() {
                prop_assert_eq!(feature.id, CellId::new(before_elements + k));
                prop_assert!(feature.vertex_ids.iter().all(|v| v.get() < vertices.len()));
            }
            prop_assert!(vertices.len() >= before_vertices);
            prop_assert!(vertices.validate_invariants().is_ok());
            prop_assert!(elements.validate_invariants().is_ok());
        }
    }

    #[test]
    fn finished_cells_are_never_counter_clockwise(
        nx in 1usize..6,
        ny in 1usize..8,
        x0 in 0i32..3,
    ) {
        let x0 = f64::from(x0) * 0.2;
        let text = common::quad_mesh_text(nx, ny, x0, x0 + 10.0 * nx as f64, 0.0, 50.0);
        let grid = read_finite_element_mesh_from(text.as_bytes(), &DisvOptions::default()).unwrap();
        prop_assert!(grid.validate_invariants().is_ok());
        for cell in grid.cells() {
            let xy: Vec<_> = cell
                .vertex_ids
                .iter()
                .map(|&v| grid.vertex(v).unwrap().xy())
                .collect();
            if cell.source_winding != Winding::Degenerate {
                prop_assert!(signed_area(&xy) < 0.0);
            }
        }
    }

    #[test]
    fn zones_partition_every_cell(
        centroids in prop::collection::vec(-10i32..60, 1..30),
    ) {
        let mut vertices = VertexTable::new();
        let mut elements = ElementTable::new();
        for &cy in &centroids {
            let y = f64::from(cy);
            let a = vertices.push(0.0, y - 1.0);
            let b = vertices.push(1.0, y + 0.5);
            let c = vertices.push(-1.0, y + 0.5);
            elements.push(vec![a, b, c]);
        }
        let cells = build_cell2d(&elements, &vertices).unwrap();
        let zones = determine_zones(&cells, &ZoneRule::default());

        prop_assert_eq!(zones.low.len() + zones.high.len(), cells.len());
        prop_assert!(zones.low.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(zones.high.windows(2).all(|w| w[0] < w[1]));

        let param = determine_param(&zones, 1u8, 0u8).unwrap();
        prop_assert_eq!(param.len(), cells.len());
        let highs = param.iter().filter(|&&v| v == 1).count();
        prop_assert_eq!(highs, zones.high.len());
    }

    #[test]
    fn dropping_an_id_is_reported(len in 2usize..30, drop in 0usize..29) {
        let drop = drop % (len - 1);
        let low: Vec<CellId> = (0..len).filter(|&i| i != drop).map(CellId::new).collect();
        let zones = ZoneAssignment { low, high: Vec::new() };
        let err = determine_param(&zones, 1.0, 2.0).unwrap_err();
        prop_assert_eq!(err, mesh_disv::mesh_error::MeshDisvError::ZoneCoverage { id: CellId::new(drop) });
    }
}
