use mesh_disv::algs::boundary::{
    InflowBand, add_inflow_features, generate_boundary_features, inflow_candidates,
};
use mesh_disv::debug_invariants::DebugInvariants;
use mesh_disv::topology::arena::{ElementTable, VertexTable};
use mesh_disv::topology::cell2d::build_cell2d;
use mesh_disv::topology::element::Vertex;
use mesh_disv::topology::point::{CellId, VertexId};

fn vids(raw: &[usize]) -> Vec<VertexId> {
    raw.iter().copied().map(VertexId::new).collect()
}

/// Two triangles along a left edge at x = 0.3 plus an interior vertex.
fn edge_tables() -> (VertexTable, ElementTable) {
    let vertices = VertexTable::from_xy([
        [0.3, 20.0],
        [0.3, 30.0],
        [5.0, 25.0],
        [0.3, 40.0],
    ]);
    let elements = ElementTable::from_loops([vids(&[0, 2, 1]), vids(&[1, 2, 3])]);
    (vertices, elements)
}

#[test]
fn two_band_vertices_append_two_vertices_and_one_element() {
    let (mut vertices, mut elements) = edge_tables();
    let features = add_inflow_features(&mut vertices, &mut elements, &InflowBand::default());

    assert_eq!(features.len(), 1);
    assert_eq!(vertices.len(), 4 + 2);
    assert_eq!(elements.len(), 2 + 1);

    // top-to-bottom: pt1 = (0.3, 30), pt2 = (0.3, 20)
    assert_eq!(features[0].id, CellId::new(2));
    assert_eq!(features[0].vertex_ids, vids(&[1, 0, 4, 5]));
    assert_eq!(vertices.get(VertexId::new(4)).unwrap().xy(), [0.0, 20.0]);
    assert_eq!(vertices.get(VertexId::new(5)).unwrap().xy(), [0.0, 30.0]);
}

#[test]
fn existing_entries_are_untouched_by_augmentation() {
    let (mut vertices, mut elements) = edge_tables();
    let before_vertices: Vec<Vertex> = vertices.iter().copied().collect();
    let before_elements = elements.as_slice().to_vec();

    add_inflow_features(&mut vertices, &mut elements, &InflowBand::default());

    assert_eq!(&vertices.as_slice()[..before_vertices.len()], &before_vertices[..]);
    assert_eq!(&elements.as_slice()[..before_elements.len()], &before_elements[..]);
}

#[test]
fn three_candidates_make_two_features_sharing_a_vertex() {
    let mut vertices = VertexTable::from_xy([[0.1, 40.0], [0.1, 30.0], [0.1, 20.0]]);
    let mut elements = ElementTable::new();
    let candidates: Vec<Vertex> = vertices.iter().copied().collect();

    let features = generate_boundary_features(&mut vertices, &mut elements, &candidates, 0.0);

    assert_eq!(features.len(), 2);
    assert_eq!(vertices.len(), 3 + 3);
    let first = &features[0].vertex_ids;
    let second = &features[1].vertex_ids;
    // second feature's closing vertex is the first feature's pt3
    assert_eq!(second[3], first[2]);
    let shared: Vec<_> = first.iter().filter(|v| second.contains(v)).collect();
    assert_eq!(shared.len(), 2); // pt2 of the first is pt1 of the second, plus pt3
}

#[test]
fn ties_in_y_keep_id_order() {
    let vertices = VertexTable::from_xy([[0.4, 25.0], [0.1, 30.0], [0.2, 25.0]]);
    let order: Vec<usize> = inflow_candidates(&vertices, &InflowBand::default())
        .iter()
        .map(|v| v.id.get())
        .collect();
    assert_eq!(order, vec![1, 0, 2]);
}

#[test]
fn custom_band_moves_the_injection_line() {
    let mut vertices = VertexTable::from_xy([[100.0, 5.0], [100.0, 0.0], [50.0, 2.0]]);
    let mut elements = ElementTable::new();
    let band = InflowBand {
        y_min: 0.0,
        y_max: 10.0,
        x_max: f64::INFINITY,
        injection_x: -1.0,
    };
    let features = add_inflow_features(&mut vertices, &mut elements, &band);
    // sorted y: 5 (id 0), 2 (id 2), 0 (id 1)
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].vertex_ids[..2], vids(&[0, 2])[..]);
    assert!(vertices.iter().skip(3).all(|v| v.x == -1.0));
}

#[test]
fn repeated_augmentation_keeps_ids_dense() {
    let (mut vertices, mut elements) = edge_tables();
    for _ in 0..3 {
        add_inflow_features(&mut vertices, &mut elements, &InflowBand::default());
        vertices.validate_invariants().unwrap();
        elements.validate_invariants().unwrap();
    }
    // every element still resolves after the tables grew
    let cells = build_cell2d(&elements, &vertices).unwrap();
    assert_eq!(cells.len(), elements.len());
}
