use crate::face::{edge_end, edge_start, lower_edge, upper_edge};
use crate::{
    CoxeterFrame, Direction, Face, FaceRef, Orientation, TessellationError, Vertex, VertexRef,
    Violation,
};
use horo::{Geometry, Isometry, Vec4};
use tracing::{debug, warn};

/// Relative tolerance for recorded positions in [`Tessellation::check_consistency`].
const POSITION_TOL: f64 = 1e-6;

/// Outcome of [`Tessellation::grow`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthReport {
    /// Rings that added at least one face.
    pub rounds: usize,
    pub faces_added: usize,
    pub vertices_added: usize,
    /// No open edge remains: the tiling closed up (spherical case).
    pub closed: bool,
}

/// A regular tiling discovered one face at a time.
///
/// `shape[k]` is the multiplicity of corner class `k`: every vertex of class
/// `k` is surrounded by `2 · shape[k]` faces. Faces and vertices live in
/// growable arenas and refer to each other through [`FaceRef`] and
/// [`VertexRef`], which stay valid as the arenas grow.
///
/// ```
/// use horo_tess::Tessellation;
///
/// let mut tess = Tessellation::new([2, 3, 5]).unwrap();
/// let report = tess.grow(40).unwrap();
/// assert!(report.closed);
/// assert_eq!(tess.num_faces(), 120);
/// ```
#[derive(Clone, Debug)]
pub struct Tessellation<const N: usize> {
    shape: [u32; N],
    faces: Vec<Face<N>>,
    vertices: Vec<Vertex>,
    frame: Option<CoxeterFrame<N>>,
    /// Faces not yet expanded by `grow`, in creation order.
    pending: Vec<FaceRef>,
    poisoned: bool,
}

impl<const N: usize> Tessellation<N> {
    /// Purely combinatorial tessellation: faces carry identity transforms
    /// and vertices no positions.
    pub fn new(shape: [u32; N]) -> Result<Self, TessellationError> {
        if N < 3 {
            return Err(TessellationError::InvalidShape {
                shape: shape.to_vec(),
                reason: "polygons need at least three corners",
            });
        }
        if shape.iter().any(|&m| m < 2) {
            return Err(TessellationError::InvalidShape {
                shape: shape.to_vec(),
                reason: "every corner multiplicity must be at least 2",
            });
        }
        Ok(Self {
            shape,
            faces: Vec::new(),
            vertices: Vec::new(),
            frame: None,
            pending: Vec::new(),
            poisoned: false,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[u32; N] { &self.shape }

    #[inline]
    pub fn frame(&self) -> Option<&CoxeterFrame<N>> { self.frame.as_ref() }

    #[inline]
    pub fn geometry(&self) -> Option<Geometry> { self.frame.as_ref().map(|f| f.geometry()) }

    #[inline]
    pub fn faces(&self) -> &[Face<N>] { &self.faces }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] { &self.vertices }

    #[inline]
    pub fn num_faces(&self) -> usize { self.faces.len() }

    #[inline]
    pub fn num_vertices(&self) -> usize { self.vertices.len() }

    #[inline]
    pub fn is_poisoned(&self) -> bool { self.poisoned }

    pub fn face(&self, face: FaceRef) -> Option<&Face<N>> {
        face.index().and_then(|i| self.faces.get(i))
    }

    pub fn vertex(&self, vertex: VertexRef) -> Option<&Vertex> {
        vertex.index().and_then(|i| self.vertices.get(i))
    }

    pub fn face_refs(&self) -> impl Iterator<Item = FaceRef> {
        (0..self.faces.len()).map(FaceRef::new)
    }

    pub fn vertex_position(&self, vertex: VertexRef) -> Option<Vec4<f64>> {
        self.vertex(vertex).and_then(Vertex::position)
    }

    pub fn orientation(&self, face: FaceRef) -> Option<Orientation> {
        self.face(face).map(Face::orientation)
    }

    /// Every `(face, edge)` without a neighbour yet.
    pub fn open_edges(&self) -> impl Iterator<Item = (FaceRef, usize)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .flat_map(|(i, f)| f.open_edges().map(move |e| (FaceRef::new(i), e)))
    }

    pub fn saturated_vertices(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_saturated()).count()
    }

    /// The first face, with a fresh vertex in each corner.
    pub fn create_seed_face(&mut self) -> Result<FaceRef, TessellationError> {
        self.ensure_usable()?;
        if !self.faces.is_empty() {
            return Err(TessellationError::AlreadySeeded);
        }
        let seed = FaceRef::new(0);
        self.faces.push(Face::new(Orientation::Positive, Isometry::identity()));
        for k in 0..N {
            let v = self.push_vertex(k, seed);
            self.faces[0].vertices[k] = v;
        }
        self.pending.push(seed);
        Ok(seed)
    }

    /// Discover the face across `edge` of `face`.
    ///
    /// The new face shares the edge's two corners with `face`. From there
    /// the corners are walked both ways round the new face: while the
    /// current corner's vertex is saturated, its fan already names the
    /// neighbour across the next edge, and that neighbour names the next
    /// corner's vertex. Corners neither walk reaches get fresh vertices.
    pub fn create_adjacent_face(&mut self, face: FaceRef, edge: usize) -> Result<FaceRef, TessellationError> {
        self.ensure_usable()?;
        let parent = self.face(face).ok_or(TessellationError::UnknownFace(face))?;
        if edge >= N {
            return Err(TessellationError::EdgeOutOfRange { edge, degree: N });
        }
        if !parent.faces[edge].is_null() {
            return Err(TessellationError::EdgeOccupied { face, edge });
        }
        self.attach(face, edge).map_err(|v| {
            warn!("tessellation poisoned: {v}");
            self.poisoned = true;
            TessellationError::InvariantViolation(v)
        })
    }

    /// Expand breadth-first, one ring of faces per round, until `rounds`
    /// rings have been added or no open edge is left. Seeds an empty
    /// tessellation first.
    pub fn grow(&mut self, rounds: usize) -> Result<GrowthReport, TessellationError> {
        self.ensure_usable()?;
        if self.faces.is_empty() {
            self.create_seed_face()?;
        }
        let (faces_before, vertices_before) = (self.faces.len(), self.vertices.len());
        let mut report = GrowthReport::default();

        for round in 0..rounds {
            let ring = std::mem::take(&mut self.pending);
            let mut added = 0;
            for face in ring {
                for edge in 0..N {
                    if self.faces[Self::slot(face)].faces[edge].is_null() {
                        self.create_adjacent_face(face, edge)?;
                        added += 1;
                    }
                }
            }
            if added == 0 {
                break;
            }
            report.rounds += 1;
            debug!(
                round,
                added,
                faces = self.faces.len(),
                vertices = self.vertices.len(),
                "tessellation ring"
            );
        }

        report.faces_added = self.faces.len() - faces_before;
        report.vertices_added = self.vertices.len() - vertices_before;
        report.closed = self.open_edges().next().is_none();
        Ok(report)
    }

    /// Verify every structural invariant over the whole graph:
    /// symmetric adjacency, corner classes, fan membership and
    /// contiguity, fan sizes, and recorded positions.
    pub fn check_consistency(&self) -> Result<(), TessellationError> {
        if self.poisoned {
            return Err(TessellationError::Poisoned);
        }
        for (i, face) in self.faces.iter().enumerate() {
            let fr = FaceRef::new(i);
            for e in 0..N {
                let other = face.faces[e];
                if let Some(o) = other.index() {
                    if self.faces.get(o).map(|f| f.faces[e]) != Some(fr) {
                        return Err(Violation::AsymmetricAdjacency { face: fr, edge: e }.into());
                    }
                }
            }
            for k in 0..N {
                let vr = face.vertices[k];
                let v = self.vertex(vr).ok_or(Violation::MissingVertex { face: fr, corner: k })?;
                if v.kind() != k {
                    return Err(Violation::WrongCornerKind { vertex: vr, corner: k }.into());
                }
                if !v.contains(fr) {
                    return Err(Violation::NotInFan { vertex: vr, face: fr }.into());
                }
                if let (Some(frame), Some(p)) = (&self.frame, v.position()) {
                    let expected = face.transform * frame.corners()[k];
                    if (expected - p).max_abs() > POSITION_TOL * p.w.abs().max(1.0) {
                        return Err(Violation::PositionMismatch { vertex: vr }.into());
                    }
                }
            }
        }

        for v in &self.vertices {
            self.check_fan(v)?;
        }
        Ok(())
    }

    fn check_fan(&self, v: &Vertex) -> Result<(), Violation> {
        let vr = v.id();
        let fan = v.fan();
        let known: Vec<FaceRef> = v.known_faces().collect();
        for (i, &f) in known.iter().enumerate() {
            let uses_vertex = self.face(f).map(|face| face.vertices[v.kind()]) == Some(vr);
            if f.is_null() || !uses_vertex || known[..i].contains(&f) {
                return Err(Violation::StrayFanEntry { vertex: vr, face: f });
            }
        }
        if v.degree() != 2 * self.shape[v.kind()] as usize {
            return Err(Violation::WrongDegree { vertex: vr });
        }
        let (upper, lower) = (upper_edge(v.kind(), N), lower_edge(v.kind(), N));
        for slot in 0..fan.len() {
            let (a, b) = (fan[slot], fan[(slot + 1) % fan.len()]);
            if a.is_null() || b.is_null() {
                continue;
            }
            let shares_edge = self
                .face(a)
                .map(|fa| fa.faces[upper] == b || fa.faces[lower] == b)
                .unwrap_or(false);
            if !shares_edge {
                return Err(Violation::FanNotContiguous { vertex: vr, slot });
            }
        }
        Ok(())
    }

    fn ensure_usable(&self) -> Result<(), TessellationError> {
        if self.poisoned { Err(TessellationError::Poisoned) } else { Ok(()) }
    }

    #[inline]
    fn slot(face: FaceRef) -> usize {
        face.index().unwrap_or(usize::MAX)
    }

    fn push_vertex(&mut self, kind: usize, first: FaceRef) -> VertexRef {
        let id = VertexRef::new(self.vertices.len());
        let position = self.frame.as_ref().map(|frame| {
            self.faces[Self::slot(first)].transform * frame.corners()[kind]
        });
        let degree = 2 * self.shape[kind] as usize;
        self.vertices.push(Vertex::new(id, kind, degree, first, position));
        id
    }

    /// Rotational sense in which a face of orientation `o` continues past
    /// `edge` around its corner `corner`.
    fn direction(o: Orientation, corner: usize, edge: usize) -> Result<Direction, Violation> {
        if edge == upper_edge(corner, N) {
            Ok(Direction::from(o))
        } else if edge == lower_edge(corner, N) {
            Ok(Direction::from(o).reversed())
        } else {
            Err(Violation::EdgeNotAtCorner { corner, edge })
        }
    }

    /// Insert `face` into the fan of `vertex` next to `from`.
    fn add_to_fan(&mut self, vertex: VertexRef, face: FaceRef, from: FaceRef, dir: Direction) -> Result<(), Violation> {
        let v = &mut self.vertices[vertex.index().ok_or(Violation::MissingVertex { face: from, corner: 0 })?];
        if v.is_saturated() {
            return Err(Violation::SaturatedVertex { vertex });
        }
        if v.end(dir) != from {
            return Err(Violation::FanOrder { vertex, face: from });
        }
        v.add_face(face, dir)
    }

    /// Make `a` and `b` neighbours across `edge`.
    fn link(&mut self, a: FaceRef, b: FaceRef, edge: usize) -> Result<(), Violation> {
        for (x, y) in [(a, b), (b, a)] {
            let current = self.faces[Self::slot(x)].faces[edge];
            if !current.is_null() && current != y {
                return Err(Violation::EdgeOccupied { face: x, edge });
            }
        }
        self.faces[Self::slot(a)].faces[edge] = b;
        self.faces[Self::slot(b)].faces[edge] = a;
        Ok(())
    }

    fn attach(&mut self, parent: FaceRef, edge: usize) -> Result<FaceRef, Violation> {
        let (p_orient, p_transform) = {
            let p = &self.faces[Self::slot(parent)];
            (p.orientation, p.transform)
        };
        let transform = match &self.frame {
            Some(frame) => p_transform * *frame.reflection(edge),
            None => Isometry::identity(),
        };
        let orient = p_orient.flip();
        let g = FaceRef::new(self.faces.len());
        self.faces.push(Face::new(orient, transform));
        self.pending.push(g);
        self.link(parent, g, edge)?;

        let (a, b) = (edge_start(edge, N), edge_end(edge, N));
        for c in [a, b] {
            let v = self.faces[Self::slot(parent)].vertices[c];
            self.faces[Self::slot(g)].vertices[c] = v;
            self.add_to_fan(v, g, parent, Self::direction(p_orient, c, edge)?)?;
        }

        // Corners in walking order: c(0) = b, ..., c(N - 1) = a.
        let corner = |t: usize| (b + t) % N;

        let mut lo = 0;
        while lo < N - 1 {
            let c = corner(lo);
            let next = corner(lo + 1);
            match self.step_around(g, orient, c, upper_edge(c, N), next)? {
                Step::Open => break,
                Step::Met => {
                    lo = N - 1;
                    break;
                }
                Step::Advanced => lo += 1,
            }
        }

        let mut hi = N - 1;
        while hi > lo {
            let c = corner(hi);
            let prev = corner(hi - 1);
            match self.step_around(g, orient, c, lower_edge(c, N), prev)? {
                Step::Open => break,
                Step::Met => {
                    hi = lo;
                    break;
                }
                Step::Advanced => hi -= 1,
            }
        }

        for t in (lo + 1)..hi {
            let c = corner(t);
            let v = self.push_vertex(c, g);
            self.faces[Self::slot(g)].vertices[c] = v;
        }
        Ok(g)
    }

    /// One step of the saturation walk around new face `g`: from corner `c`
    /// across `edge` to corner `next`.
    fn step_around(&mut self, g: FaceRef, orient: Orientation, c: usize, edge: usize, next: usize) -> Result<Step, Violation> {
        let vr = self.faces[Self::slot(g)].vertices[c];
        let v = &self.vertices[vr.index().ok_or(Violation::MissingVertex { face: g, corner: c })?];
        if !v.is_saturated() {
            return Ok(Step::Open);
        }
        let h = v
            .neighbor(g, Self::direction(orient, c, edge)?)
            .ok_or(Violation::NotInFan { vertex: vr, face: g })?;
        self.link(g, h, edge)?;

        let (h_orient, hv) = {
            let hf = &self.faces[Self::slot(h)];
            (hf.orientation, hf.vertices[next])
        };
        let gv = self.faces[Self::slot(g)].vertices[next];
        if !gv.is_null() {
            return if gv == hv {
                Ok(Step::Met)
            } else {
                Err(Violation::VertexMismatch { face: g, corner: next })
            };
        }
        self.faces[Self::slot(g)].vertices[next] = hv;
        self.add_to_fan(hv, g, h, Self::direction(h_orient, next, edge)?)?;
        Ok(Step::Advanced)
    }
}

enum Step {
    /// The corner's fan is still open; the walk stops here.
    Open,
    /// Reached a corner already filled from the other side.
    Met,
    Advanced,
}

impl Tessellation<3> {
    /// Triangle tiling placed in `geometry`: every face carries the
    /// isometry from the seed triangle and every vertex its position.
    pub fn with_frame(shape: [u32; 3], geometry: Geometry) -> Result<Self, TessellationError> {
        let frame = CoxeterFrame::new(shape, geometry)?;
        let mut tess = Self::new(shape)?;
        tess.frame = Some(frame);
        Ok(tess)
    }
}
