//! Error types for horo-tess.

use crate::{FaceRef, VertexRef};
use std::fmt;

/// Broken tiling invariant. Once one is observed mid-update the graph is
/// unusable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A face was offered to a vertex whose fan is already complete.
    SaturatedVertex { vertex: VertexRef },
    /// A face was offered at a fan end not occupied by its neighbour.
    FanOrder { vertex: VertexRef, face: FaceRef },
    /// The face bordering an edge is not in that corner's fan.
    NotInFan { vertex: VertexRef, face: FaceRef },
    /// An edge already borders a different face.
    EdgeOccupied { face: FaceRef, edge: usize },
    /// The edge does not touch the corner it was paired with.
    EdgeNotAtCorner { corner: usize, edge: usize },
    /// Two walks around a face disagree on one of its corners.
    VertexMismatch { face: FaceRef, corner: usize },
    /// `a` lists `b` across `edge` but not the other way round.
    AsymmetricAdjacency { face: FaceRef, edge: usize },
    /// A face corner has no vertex.
    MissingVertex { face: FaceRef, corner: usize },
    /// A vertex sits in a corner of the wrong class.
    WrongCornerKind { vertex: VertexRef, corner: usize },
    /// A fan lists a face twice, or a face that does not use the vertex.
    StrayFanEntry { vertex: VertexRef, face: FaceRef },
    /// Fan length differs from `2 · shape[kind]`.
    WrongDegree { vertex: VertexRef },
    /// Faces adjacent in a fan do not share an edge through the vertex.
    FanNotContiguous { vertex: VertexRef, slot: usize },
    /// A recorded position disagrees with the owning face's transform.
    PositionMismatch { vertex: VertexRef },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaturatedVertex { vertex } => write!(f, "{vertex} is already saturated"),
            Self::FanOrder { vertex, face } => {
                write!(f, "{face} is not at an open end of the fan of {vertex}")
            }
            Self::NotInFan { vertex, face } => write!(f, "{face} missing from the fan of {vertex}"),
            Self::EdgeOccupied { face, edge } => write!(f, "edge {edge} of {face} is already taken"),
            Self::EdgeNotAtCorner { corner, edge } => {
                write!(f, "edge {edge} does not touch corner {corner}")
            }
            Self::VertexMismatch { face, corner } => {
                write!(f, "walks disagree on corner {corner} of {face}")
            }
            Self::AsymmetricAdjacency { face, edge } => {
                write!(f, "adjacency across edge {edge} of {face} is one-sided")
            }
            Self::MissingVertex { face, corner } => write!(f, "corner {corner} of {face} is empty"),
            Self::WrongCornerKind { vertex, corner } => {
                write!(f, "{vertex} used as corner {corner} of a different class")
            }
            Self::StrayFanEntry { vertex, face } => {
                write!(f, "fan of {vertex} lists {face} wrongly")
            }
            Self::WrongDegree { vertex } => write!(f, "fan of {vertex} has the wrong length"),
            Self::FanNotContiguous { vertex, slot } => {
                write!(f, "fan of {vertex} breaks at slot {slot}")
            }
            Self::PositionMismatch { vertex } => write!(f, "position of {vertex} disagrees with its faces"),
        }
    }
}

/// Errors returned by [`crate::Tessellation`].
#[derive(Clone, Debug, PartialEq)]
pub enum TessellationError {
    /// Shape rejected: fewer than three corners, a multiplicity below two,
    /// or angles that do not close up in the requested geometry.
    InvalidShape { shape: Vec<u32>, reason: &'static str },
    /// Internal invariant broken; the tessellation is now poisoned.
    InvariantViolation(Violation),
    /// A previous violation left the graph unusable.
    Poisoned,
    /// The face handle does not belong to this tessellation.
    UnknownFace(FaceRef),
    /// Edge index not below the polygon degree.
    EdgeOutOfRange { edge: usize, degree: usize },
    /// The requested edge already has a neighbour.
    EdgeOccupied { face: FaceRef, edge: usize },
    /// `create_seed_face` called on a non-empty tessellation.
    AlreadySeeded,
}

impl fmt::Display for TessellationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { shape, reason } => write!(f, "invalid shape {shape:?}: {reason}"),
            Self::InvariantViolation(v) => write!(f, "invariant violation: {v}"),
            Self::Poisoned => write!(f, "tessellation poisoned by an earlier violation"),
            Self::UnknownFace(face) => write!(f, "{face} not found"),
            Self::EdgeOutOfRange { edge, degree } => {
                write!(f, "edge {edge} out of range for {degree}-gons")
            }
            Self::EdgeOccupied { face, edge } => write!(f, "edge {edge} of {face} already has a neighbour"),
            Self::AlreadySeeded => write!(f, "tessellation already has a seed face"),
        }
    }
}

impl std::error::Error for TessellationError {}

impl From<Violation> for TessellationError {
    fn from(v: Violation) -> Self {
        Self::InvariantViolation(v)
    }
}
