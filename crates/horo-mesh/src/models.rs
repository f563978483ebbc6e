//! Ready-made demo models.

use crate::{Mesh, MeshError, ModelBuilder};
use horo::{horo_rotation, rotation, Geometry, Isometry, Vec2, Vec3, Vec4};
use horo_tess::Tessellation;
use std::f64::consts::TAU;
use tracing::debug;

/// Klein-model half-edge of the right-angled dodecahedron.
const DODECAHEDRON_S: f64 = 0.31546169558954995;

/// The right-angled regular dodecahedron of hyperbolic space, centred on
/// the origin, visible from inside and out.
pub fn dodecahedron() -> Result<Mesh, MeshError> {
    let s = DODECAHEDRON_S;
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    let (q, p) = (s / phi, s * phi);
    // Klein coordinates scaled onto the hyperboloid.
    let factor = 2.0 / (1.0 - 3.0 * s * s);

    let faces: [[[f64; 3]; 5]; 12] = [
        [[0.0, q, p], [s, s, s], [q, p, 0.0], [-q, p, 0.0], [-s, s, s]],
        [[0.0, q, -p], [-s, s, -s], [-q, p, 0.0], [q, p, 0.0], [s, s, -s]],
        [[0.0, -q, p], [-s, -s, s], [-q, -p, 0.0], [q, -p, 0.0], [s, -s, s]],
        [[0.0, -q, -p], [s, -s, -s], [q, -p, 0.0], [-q, -p, 0.0], [-s, -s, -s]],
        [[p, 0.0, q], [s, s, s], [0.0, q, p], [0.0, -q, p], [s, -s, s]],
        [[-p, 0.0, q], [-s, -s, s], [0.0, -q, p], [0.0, q, p], [-s, s, s]],
        [[p, 0.0, -q], [s, -s, -s], [0.0, -q, -p], [0.0, q, -p], [s, s, -s]],
        [[-p, 0.0, -q], [-s, s, -s], [0.0, q, -p], [0.0, -q, -p], [-s, -s, -s]],
        [[q, p, 0.0], [s, s, s], [p, 0.0, q], [p, 0.0, -q], [s, s, -s]],
        [[q, -p, 0.0], [s, -s, -s], [p, 0.0, -q], [p, 0.0, q], [s, -s, s]],
        [[-q, p, 0.0], [-s, s, -s], [-p, 0.0, -q], [-p, 0.0, q], [-s, s, s]],
        [[-q, -p, 0.0], [-s, -s, s], [-p, 0.0, q], [-p, 0.0, -q], [-s, -s, -s]],
    ];

    let mut builder = ModelBuilder::new(Geometry::Hyperbolic);
    for face in &faces {
        let corners = face.map(|[x, y, z]| Vec4::new(x * factor, y * factor, z * factor, factor - 1.0));
        builder.add_polygon_face(&corners)?;
    }
    builder.add_back_faces()?;
    Ok(builder.build())
}

/// Horosphere through the origin: a `size × size` patch of the flat
/// horospherical coordinates sampled on a `steps × steps` grid.
pub fn horosphere(steps: usize, size: f64, texture_scale: f64) -> Result<Mesh, MeshError> {
    let g = Geometry::Hyperbolic;
    let mut builder = ModelBuilder::new(g);
    let normal = Vec4::new(0.0, 0.0, 1.0, -1.0);
    let steps = steps.max(1);

    let mut grid = Vec::with_capacity((steps + 1) * (steps + 1));
    for i in 0..=steps {
        for j in 0..=steps {
            let x = (i as f64 / steps as f64 - 0.5) * size;
            let y = (j as f64 / steps as f64 - 0.5) * size;
            let pos = horo_rotation(x, y) * g.origin();
            grid.push(builder.add_vertex(pos, normal, Vec2::new(x, y) * texture_scale)?);
        }
    }
    let at = |i: usize, j: usize| grid[i * (steps + 1) + j];
    for i in 0..steps {
        for j in 0..steps {
            builder.add_triangle(at(i, j), at(i + 1, j), at(i, j + 1));
            builder.add_triangle(at(i, j + 1), at(i + 1, j), at(i + 1, j + 1));
        }
    }
    builder.add_back_faces()?;
    Ok(builder.build())
}

/// Ground plane: every face of a framed triangle tiling.
pub fn plane(tess: &Tessellation<3>) -> Result<Mesh, MeshError> {
    let geometry = tess.geometry().ok_or(MeshError::MissingFrame)?;
    let mut builder = ModelBuilder::new(geometry);
    builder.add_tessellation(tess)?;
    builder.add_back_faces()?;
    Ok(builder.build())
}

/// A single octagonal prism pointing down the negative z axis.
pub fn prism(geometry: Geometry) -> Result<Mesh, MeshError> {
    let mut builder = ModelBuilder::new(geometry);
    let flip = Isometry::from_diagonal(Vec4::new(1.0, -1.0, -1.0, 1.0));
    builder.add_prism(&flip, 8, 1.0, 2.0, 60)?;
    builder.add_back_faces()?;
    Ok(builder.build())
}

/// Recursive tree of geodesic branches.
///
/// Each branch ends in five children: straight on, and turned a quarter
/// turn about ±x and ±y. In hyperbolic space with the default branch
/// length `acosh 3` consecutive branches meet at right angles and never
/// collide. Recursion stops after `depth` levels, or earlier once a
/// branch's `cosh`-distance from the origin exceeds `limit`.
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    geometry: Geometry,
    branch_length: f64,
    depth: usize,
    limit: f64,
    sides: usize,
    radius: f64,
    steps: usize,
}

impl TreeBuilder {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            branch_length: 3f64.acosh(),
            depth: 7,
            limit: 100.0,
            sides: 8,
            radius: 0.1,
            steps: 6,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_branch_length(mut self, length: f64) -> Self {
        self.branch_length = length;
        self
    }

    fn children(&self) -> [Isometry; 5] {
        let step = self.geometry.displacement(Vec3::new(0.0, 0.0, self.branch_length));
        let quarter = TAU / 4.0;
        [
            step,
            step * rotation(Vec3::x(), quarter),
            step * rotation(Vec3::y(), quarter),
            step * rotation(-Vec3::x(), quarter),
            step * rotation(-Vec3::y(), quarter),
        ]
    }

    /// Six trunks from `root` (the five child directions plus straight
    /// back), each grown recursively. Returns the number of branches placed.
    pub fn build(&self, builder: &mut ModelBuilder, root: &Isometry) -> Result<usize, MeshError> {
        let quarter = TAU / 4.0;
        let trunks = [
            Isometry::identity(),
            rotation(Vec3::x(), quarter),
            rotation(Vec3::y(), quarter),
            rotation(-Vec3::x(), quarter),
            rotation(-Vec3::y(), quarter),
            rotation(Vec3::x(), TAU / 2.0),
        ];
        let children = self.children();
        let mut placed = 0;
        for trunk in &trunks {
            placed += self.branch(builder, &children, *root * *trunk, self.depth)?;
        }
        debug!(placed, depth = self.depth, "tree built");
        Ok(placed)
    }

    fn branch(&self, builder: &mut ModelBuilder, children: &[Isometry; 5], transform: Isometry, depth: usize) -> Result<usize, MeshError> {
        if transform.get(3, 3) > self.limit {
            return Ok(0);
        }
        builder.add_prism(&transform, self.sides, self.radius, self.branch_length, self.steps)?;
        let mut placed = 1;
        if depth > 0 {
            for child in children {
                placed += self.branch(builder, children, transform * *child, depth - 1)?;
            }
        }
        Ok(placed)
    }
}

/// The default hyperbolic tree.
pub fn tree() -> Result<Mesh, MeshError> {
    let mut builder = ModelBuilder::new(Geometry::Hyperbolic);
    TreeBuilder::new(Geometry::Hyperbolic).build(&mut builder, &Isometry::identity())?;
    Ok(builder.build())
}
