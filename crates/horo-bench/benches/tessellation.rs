use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use horo::{Geometry, Isometry};
use horo_mesh::{models, ModelBuilder, TreeBuilder};
use horo_tess::Tessellation;

// ============================================================
// Graph growth
// ============================================================

fn grow_combinatorial(c: &mut Criterion) {
    let mut group = c.benchmark_group("tess/grow");
    for rounds in [5usize, 10, 15] {
        group.bench_with_input(BenchmarkId::new("2_4_5", rounds), &rounds, |b, &rounds| {
            b.iter(|| {
                let mut tess = Tessellation::new([2u32, 4, 5]).ok()?;
                black_box(tess.grow(rounds).ok()?);
                Some(tess.num_faces())
            })
        });
    }
    group.bench_function("quads_2_2_3_3/10", |b| {
        b.iter(|| {
            let mut tess = Tessellation::new([2u32, 2, 3, 3]).ok()?;
            black_box(tess.grow(10).ok()?);
            Some(tess.num_faces())
        })
    });
    group.finish();
}

fn grow_framed(c: &mut Criterion) {
    let mut group = c.benchmark_group("tess/grow_framed");
    group.bench_function("hyperbolic_2_4_5/10", |b| {
        b.iter(|| {
            let mut tess = Tessellation::with_frame([2, 4, 5], Geometry::Hyperbolic).ok()?;
            black_box(tess.grow(10).ok()?);
            Some(tess.num_faces())
        })
    });
    group.bench_function("spherical_2_3_5/closed", |b| {
        b.iter(|| {
            let mut tess = Tessellation::with_frame([2, 3, 5], Geometry::Spherical).ok()?;
            black_box(tess.grow(64).ok()?);
            Some(tess.num_faces())
        })
    });
    group.finish();
}

fn consistency(c: &mut Criterion) {
    let mut tess = Tessellation::new([2u32, 4, 5]).ok();
    if let Some(t) = tess.as_mut() {
        let _ = t.grow(12);
    }
    c.bench_function("tess/check_consistency_2_4_5_12", |b| {
        b.iter(|| tess.as_ref().map(|t| black_box(t.check_consistency()).is_ok()))
    });
}

// ============================================================
// Mesh emission
// ============================================================

fn emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh");
    let tess = Tessellation::with_frame([2, 4, 5], Geometry::Hyperbolic).ok().and_then(|mut t| {
        t.grow(12).ok()?;
        Some(t)
    });
    group.bench_function("plane_2_4_5_12", |b| {
        b.iter(|| tess.as_ref().map(|t| black_box(models::plane(t)).is_ok()))
    });
    group.bench_function("dodecahedron", |b| b.iter(|| black_box(models::dodecahedron()).is_ok()));
    group.bench_function("horosphere_100", |b| b.iter(|| black_box(models::horosphere(100, 20.0, 5.0)).is_ok()));
    group.bench_function("tree_depth_4", |b| {
        b.iter(|| {
            let mut builder = ModelBuilder::new(Geometry::Hyperbolic);
            let placed = TreeBuilder::new(Geometry::Hyperbolic)
                .with_depth(4)
                .build(&mut builder, &Isometry::identity());
            black_box((placed.is_ok(), builder.build()))
        })
    });
    group.finish();
}

criterion_group!(benches, grow_combinatorial, grow_framed, consistency, emit);
criterion_main!(benches);
