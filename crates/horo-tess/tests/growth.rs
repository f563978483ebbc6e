use horo::Geometry;
use horo_tess::{Orientation, Tessellation, TessellationError};

#[test]
fn seed_and_three_neighbours_agree_on_every_edge() {
    let mut t = Tessellation::new([2, 3, 5]).unwrap();
    let seed = t.create_seed_face().unwrap();
    let neighbours: Vec<_> = (0..3).map(|e| t.create_adjacent_face(seed, e).unwrap()).collect();

    for (e, &n) in neighbours.iter().enumerate() {
        assert_eq!(t.face(seed).unwrap().adjacent_face(e), n);
        assert_eq!(t.face(n).unwrap().adjacent_face(e), seed);
        assert_eq!(t.orientation(n), Some(Orientation::Negative));
    }
    for face in t.face_refs() {
        let f = t.face(face).unwrap();
        for e in 0..3 {
            let other = f.adjacent_face(e);
            if !other.is_null() {
                assert_eq!(t.face(other).unwrap().adjacent_face(e), face, "{face} edge {e}");
            }
        }
    }
    t.check_consistency().unwrap();
}

#[test]
fn fifteen_rings_of_2_4_5_stay_consistent() {
    let mut t = Tessellation::new([2, 4, 5]).unwrap();
    let report = t.grow(15).unwrap();
    assert_eq!(report.rounds, 15);
    assert!(!report.closed);
    t.check_consistency().unwrap();

    for (i, face) in t.faces().iter().enumerate() {
        for &v in face.vertices() {
            let vertex = t.vertex(v).unwrap();
            assert!(vertex.fan().iter().any(|f| f.index() == Some(i)));
        }
    }
    for v in t.vertices() {
        if v.is_saturated() {
            assert_eq!(v.fan().len(), 2 * t.shape()[v.kind()] as usize);
            assert!(v.fan().iter().all(|f| !f.is_null()));
        }
    }
    assert!(t.saturated_vertices() > 0);
}

#[test]
fn every_round_adds_a_ring() {
    let mut t = Tessellation::new([2, 4, 5]).unwrap();
    let first = t.grow(1).unwrap();
    assert_eq!((first.rounds, first.faces_added), (1, 3));
    assert_eq!(t.num_faces(), 4);

    let mut faces = t.num_faces();
    for round in 2..=10 {
        let report = t.grow(1).unwrap();
        assert_eq!(report.rounds, 1, "round {round}");
        assert!(t.num_faces() > faces, "round {round} added nothing");
        faces = t.num_faces();
    }
    assert!(faces > 40, "{faces} faces after ten rounds");
    t.check_consistency().unwrap();
}

#[test]
fn icosahedral_rounds_grow_until_closed() {
    let mut t = Tessellation::new([2, 3, 5]).unwrap();
    let mut counts = vec![t.num_faces()];
    while !t.grow(1).unwrap().closed {
        counts.push(t.num_faces());
        assert!(counts.len() < 50);
    }
    assert!(counts.windows(2).all(|w| w[0] < w[1]), "{counts:?}");
    assert_eq!(t.num_faces(), 120);
}

#[test]
fn icosahedral_tiling_closes_up() {
    let mut t = Tessellation::new([2, 3, 5]).unwrap();
    let report = t.grow(100).unwrap();
    assert!(report.closed);
    assert!(report.rounds < 100);
    assert_eq!(t.num_faces(), 120);
    assert_eq!(t.num_vertices(), 62);
    assert_eq!(t.saturated_vertices(), 62);
    assert_eq!(t.open_edges().count(), 0);
    t.check_consistency().unwrap();

    // A closed tiling has nothing left to grow.
    let again = t.grow(3).unwrap();
    assert_eq!(again.faces_added, 0);
    assert!(again.closed);
}

#[test]
fn small_spherical_groups_close_up() {
    for (shape, faces, vertices) in [([2, 3, 3], 24, 14), ([2, 3, 4], 48, 26), ([2, 2, 5], 20, 12)] {
        let mut t = Tessellation::new(shape).unwrap();
        assert!(t.grow(50).unwrap().closed, "{shape:?}");
        assert_eq!(t.num_faces(), faces, "{shape:?}");
        assert_eq!(t.num_vertices(), vertices, "{shape:?}");
        t.check_consistency().unwrap();
    }
}

#[test]
fn growth_can_resume() {
    let mut split = Tessellation::new([2, 3, 7]).unwrap();
    split.grow(4).unwrap();
    split.grow(5).unwrap();
    let mut whole = Tessellation::new([2, 3, 7]).unwrap();
    whole.grow(9).unwrap();
    assert_eq!(split.num_faces(), whole.num_faces());
    assert_eq!(split.num_vertices(), whole.num_vertices());
    split.check_consistency().unwrap();
}

#[test]
fn quadrilateral_and_pentagon_tilings() {
    let mut quads = Tessellation::new([2, 2, 3, 3]).unwrap();
    quads.grow(8).unwrap();
    quads.check_consistency().unwrap();

    let mut pentagons = Tessellation::new([2, 3, 2, 3, 2]).unwrap();
    pentagons.grow(7).unwrap();
    pentagons.check_consistency().unwrap();
    assert!(pentagons.saturated_vertices() > 0);
}

#[test]
fn framed_tilings_place_every_vertex() {
    for (shape, geometry, rounds) in [
        ([2, 4, 5], Geometry::Hyperbolic, 12),
        ([3, 3, 4], Geometry::Hyperbolic, 8),
        ([2, 3, 5], Geometry::Spherical, 30),
    ] {
        let mut t = Tessellation::with_frame(shape, geometry).unwrap();
        t.grow(rounds).unwrap();
        t.check_consistency().unwrap();
        assert!(t.vertices().iter().all(|v| v.position().is_some()));
    }
}

#[test]
fn closed_spherical_tiling_has_distinct_vertices() {
    let g = Geometry::Spherical;
    let mut t = Tessellation::with_frame([2, 3, 5], g).unwrap();
    t.grow(30).unwrap();
    let points: Vec<_> = t.vertices().iter().map(|v| v.position().unwrap()).collect();
    for (i, p) in points.iter().enumerate() {
        assert!((g.sqr_norm(*p) - 1.0).abs() < 1e-9);
        for q in &points[..i] {
            assert!((*p - *q).max_abs() > 1e-3, "two vertices share a position");
        }
    }
}

#[test]
fn rejects_bad_shapes() {
    assert!(matches!(Tessellation::new([2, 1, 5]), Err(TessellationError::InvalidShape { .. })));
    assert!(matches!(Tessellation::new([2, 3]), Err(TessellationError::InvalidShape { .. })));
    assert!(matches!(
        Tessellation::with_frame([2, 3, 5], Geometry::Hyperbolic),
        Err(TessellationError::InvalidShape { .. })
    ));
}
