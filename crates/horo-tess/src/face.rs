use crate::{FaceRef, Orientation, VertexRef};
use horo::Isometry;

/// A polygon of the tiling.
///
/// Corner `k` holds a vertex of class `k`; edge `e` joins corners `e + 1`
/// and `e + 2` (mod `N`), so on a triangle edge `e` is opposite corner `e`.
#[derive(Clone, Debug)]
pub struct Face<const N: usize> {
    pub(crate) faces: [FaceRef; N],
    pub(crate) vertices: [VertexRef; N],
    pub(crate) orientation: Orientation,
    pub(crate) transform: Isometry,
}

impl<const N: usize> Face<N> {
    pub(crate) fn new(orientation: Orientation, transform: Isometry) -> Self {
        Self {
            faces: [FaceRef::NULL; N],
            vertices: [VertexRef::NULL; N],
            orientation,
            transform,
        }
    }

    /// Neighbour across edge `e`, or [`FaceRef::NULL`] while undiscovered.
    #[inline]
    pub fn adjacent_face(&self, e: usize) -> FaceRef { self.faces[e] }

    #[inline]
    pub fn adjacent_faces(&self) -> &[FaceRef; N] { &self.faces }

    #[inline]
    pub fn vertex(&self, corner: usize) -> VertexRef { self.vertices[corner] }

    #[inline]
    pub fn vertices(&self) -> &[VertexRef; N] { &self.vertices }

    #[inline]
    pub fn orientation(&self) -> Orientation { self.orientation }

    /// Isometry carrying the seed face onto this one. Identity without a frame.
    #[inline]
    pub fn transform(&self) -> &Isometry { &self.transform }

    pub fn open_edges(&self) -> impl Iterator<Item = usize> + '_ {
        (0..N).filter(|&e| self.faces[e].is_null())
    }

    pub fn is_closed(&self) -> bool {
        self.faces.iter().all(|f| !f.is_null())
    }
}

/// First corner of edge `e`.
#[inline]
pub(crate) fn edge_start(e: usize, n: usize) -> usize { (e + 1) % n }

/// Second corner of edge `e`.
#[inline]
pub(crate) fn edge_end(e: usize, n: usize) -> usize { (e + 2) % n }

/// The edge leaving corner `c` towards `c + 1`.
#[inline]
pub(crate) fn upper_edge(c: usize, n: usize) -> usize { (c + n - 1) % n }

/// The edge arriving at corner `c` from `c - 1`.
#[inline]
pub(crate) fn lower_edge(c: usize, n: usize) -> usize { (c + n - 2) % n }
