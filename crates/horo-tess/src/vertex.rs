use crate::{Direction, FaceRef, Violation, VertexRef};
use horo::Vec4;

/// A tiling vertex and the cyclic fan of faces around it.
///
/// The fan has a fixed length, `2 · shape[kind]`. Discovery starts from the
/// face in slot 0 and grows in both rotational senses: `Up` fills
/// `fan[high..]`, `Down` fills `fan[..low]` from the back. When the two
/// boundaries meet the fan is complete and the vertex is saturated.
#[derive(Clone, Debug)]
pub struct Vertex {
    id: VertexRef,
    kind: usize,
    fan: Vec<FaceRef>,
    low: usize,
    high: usize,
    position: Option<Vec4<f64>>,
}

impl Vertex {
    pub(crate) fn new(id: VertexRef, kind: usize, degree: usize, first: FaceRef, position: Option<Vec4<f64>>) -> Self {
        let mut fan = vec![FaceRef::NULL; degree];
        fan[0] = first;
        Self { id, kind, fan, low: degree, high: 1, position }
    }

    #[inline]
    pub fn id(&self) -> VertexRef { self.id }

    /// Corner class: this vertex sits at corner `kind` of every incident face.
    #[inline]
    pub fn kind(&self) -> usize { self.kind }

    /// Number of faces around the vertex once saturated.
    #[inline]
    pub fn degree(&self) -> usize { self.fan.len() }

    /// Raw fan, with [`FaceRef::NULL`] in the undiscovered gap.
    #[inline]
    pub fn fan(&self) -> &[FaceRef] { &self.fan }

    #[inline]
    pub fn low(&self) -> usize { self.low }

    #[inline]
    pub fn high(&self) -> usize { self.high }

    #[inline]
    pub fn is_saturated(&self) -> bool { self.high == self.low }

    /// Model-space position, when the tessellation carries a frame.
    #[inline]
    pub fn position(&self) -> Option<Vec4<f64>> { self.position }

    /// Known faces in rotational order, starting from the low end.
    pub fn known_faces(&self) -> impl Iterator<Item = FaceRef> + '_ {
        self.fan[self.low..].iter().chain(&self.fan[..self.high]).copied()
    }

    pub fn contains(&self, face: FaceRef) -> bool {
        self.known_faces().any(|f| f == face)
    }

    /// Face at the open end of the fan in direction `dir`.
    pub fn end(&self, dir: Direction) -> FaceRef {
        match dir {
            Direction::Up => self.fan[self.high - 1],
            Direction::Down => self.fan[self.low % self.fan.len()],
        }
    }

    /// Append `face` at the `dir` end of the fan.
    pub fn add_face(&mut self, face: FaceRef, dir: Direction) -> Result<(), Violation> {
        if self.is_saturated() {
            return Err(Violation::SaturatedVertex { vertex: self.id });
        }
        match dir {
            Direction::Up => {
                self.fan[self.high] = face;
                self.high += 1;
            }
            Direction::Down => {
                self.low -= 1;
                self.fan[self.low] = face;
            }
        }
        Ok(())
    }

    /// The face one step from `face` around the vertex, in direction `dir`.
    /// Only meaningful once the fan is saturated or the step stays inside
    /// the known part.
    pub fn neighbor(&self, face: FaceRef, dir: Direction) -> Option<FaceRef> {
        let len = self.fan.len();
        let at = self.fan.iter().position(|&f| f == face)?;
        let next = match dir {
            Direction::Up => (at + 1) % len,
            Direction::Down => (at + len - 1) % len,
        };
        let f = self.fan[next];
        if f.is_null() { None } else { Some(f) }
    }
}
