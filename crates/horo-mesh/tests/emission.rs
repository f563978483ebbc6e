use horo::{Geometry, Isometry, Vec3, Vec4};
use horo_mesh::{models, MeshError, ModelBuilder, TreeBuilder};
use horo_tess::Tessellation;

fn form_dot(g: Geometry, a: [f32; 4], b: [f32; 4]) -> f64 {
    let v = |x: [f32; 4]| Vec4::new(x[0] as f64, x[1] as f64, x[2] as f64, x[3] as f64);
    g.dot(v(a), v(b))
}

fn sub(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]]
}

fn pentagon(g: Geometry) -> Vec<Vec4<f64>> {
    (0..5)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / 5.0;
            g.displacement(Vec3::new(0.5 * a.cos(), 0.5 * a.sin(), 0.0)) * g.origin()
        })
        .collect()
}

#[test]
fn pentagon_is_a_fan_of_three_triangles() {
    for g in [Geometry::Hyperbolic, Geometry::Spherical] {
        let mut b = ModelBuilder::new(g);
        b.add_polygon_face(&pentagon(g)).unwrap();
        let mesh = b.build();
        assert_eq!(mesh.vertices().len(), 5);
        assert_eq!(mesh.num_triangles(), 3);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);

        let v = mesh.vertices();
        let normal = v[0].normal;
        for k in [1, 2] {
            let edge = sub(v[k].pos, v[k - 1].pos);
            let d = form_dot(g, normal, edge);
            assert!(d.abs() < 1e-6, "{:?}: normal not orthogonal to edge {}: {}", g, k, d);
        }
        assert!(v.iter().all(|x| x.normal == normal));
        assert!(v.iter().all(|x| (0.0..=1.0).contains(&x.tex_coord[0])));
    }
}

#[test]
fn back_faces_double_and_reverse() {
    let mut b = ModelBuilder::new(Geometry::Hyperbolic);
    b.add_polygon_face(&pentagon(Geometry::Hyperbolic)).unwrap();
    b.add_prism(&Isometry::identity(), 4, 0.3, 1.0, 2).unwrap();
    let (nv, nt) = (b.num_vertices(), b.num_triangles());
    let before = b.clone().build();
    b.add_back_faces().unwrap();
    let after = b.build();

    assert_eq!(after.vertices().len(), 2 * nv);
    assert_eq!(after.num_triangles(), 2 * nt);
    let offset = nv as u32;
    for (front, back) in before.triangles().zip(after.triangles().skip(nt)) {
        assert_eq!(back, [front[0] + offset, front[2] + offset, front[1] + offset]);
    }
    for i in 0..nv {
        let (f, k) = (after.vertices()[i], after.vertices()[i + nv]);
        assert_eq!(f.pos, k.pos);
        assert_eq!(f.tex_coord, k.tex_coord);
        assert_eq!(f.normal.map(|c| -c), k.normal);
    }
}

#[test]
fn prism_rings_stay_on_the_model() {
    for g in [Geometry::Hyperbolic, Geometry::Spherical] {
        let mut b = ModelBuilder::new(g);
        b.add_prism(&Isometry::identity(), 6, 0.2, 1.5, 10).unwrap();
        let mesh = b.build();
        assert_eq!(mesh.vertices().len(), 6 * 11 * 2);
        assert_eq!(mesh.num_triangles(), 6 * 10 * 2);
        for v in mesh.vertices() {
            let n2 = form_dot(g, v.pos, v.pos);
            assert!((n2 - g.form_sign::<f64>(3)).abs() < 1e-5, "{:?}: {}", g, n2);
            // Rim normals are tangent to the model at their vertex.
            assert!(form_dot(g, v.normal, v.pos).abs() < 1e-5);
        }
    }
}

#[test]
fn dodecahedron_corners_lie_on_the_hyperboloid() {
    let mesh = models::dodecahedron().unwrap();
    assert_eq!(mesh.vertices().len(), 12 * 5 * 2);
    assert_eq!(mesh.num_triangles(), 12 * 3 * 2);
    for v in mesh.vertices() {
        let n2 = form_dot(Geometry::Hyperbolic, v.pos, v.pos);
        assert!((n2 + 1.0).abs() < 1e-4, "{}", n2);
    }
}

#[test]
fn horosphere_grid() {
    let mesh = models::horosphere(8, 4.0, 2.0).unwrap();
    assert_eq!(mesh.vertices().len(), 81 * 2);
    assert_eq!(mesh.num_triangles(), 64 * 2 * 2);
    let centre = mesh.vertices()[40];
    assert_eq!(centre.pos, [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn plane_from_a_framed_tiling() {
    let mut t = Tessellation::with_frame([2, 4, 5], Geometry::Hyperbolic).unwrap();
    t.grow(5).unwrap();
    let mesh = models::plane(&t).unwrap();
    assert_eq!(mesh.vertices().len(), 3 * t.num_faces() * 2);
    assert_eq!(mesh.num_triangles(), t.num_faces() * 2);

    assert!(t.num_faces() > 4, "only the seed ring was grown");

    let mut b = ModelBuilder::new(Geometry::Spherical);
    assert_eq!(b.add_tessellation(&t), Err(MeshError::GeometryMismatch));
}

#[test]
fn closed_spherical_plane_covers_the_sphere() {
    let mut t = Tessellation::with_frame([2, 3, 5], Geometry::Spherical).unwrap();
    assert!(t.grow(30).unwrap().closed);
    let mesh = models::plane(&t).unwrap();
    assert_eq!(mesh.num_triangles(), 120 * 2);
    assert_eq!(mesh.vertices().len(), 120 * 3 * 2);
}

#[test]
fn tree_recursion_is_bounded() {
    let mut b = ModelBuilder::new(Geometry::Hyperbolic);
    let placed = TreeBuilder::new(Geometry::Hyperbolic)
        .with_depth(2)
        .build(&mut b, &Isometry::identity())
        .unwrap();
    assert_eq!(placed, 6 * (1 + 5 + 25));

    let mut b = ModelBuilder::new(Geometry::Hyperbolic);
    let pruned = TreeBuilder::new(Geometry::Hyperbolic)
        .with_depth(2)
        .with_limit(4.0)
        .build(&mut b, &Isometry::identity())
        .unwrap();
    assert!(pruned < placed);
    assert!(pruned >= 6);
}

#[test]
fn prism_model_in_both_geometries() {
    for g in [Geometry::Hyperbolic, Geometry::Spherical] {
        let mesh = models::prism(g).unwrap();
        assert_eq!(mesh.vertices().len(), 8 * 61 * 2 * 2);
    }
}
