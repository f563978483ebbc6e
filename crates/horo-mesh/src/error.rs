//! Error types for horo-mesh.

use std::fmt;

/// Errors raised while emitting geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// Polygons need at least three corners.
    DegeneratePolygon { corners: usize },
    /// Prisms need at least three sides and one step.
    InvalidPrism { sides: usize, steps: usize },
    /// The tessellation has no frame, so its faces have no positions.
    MissingFrame,
    /// Tessellation placed in a different geometry than the builder's.
    GeometryMismatch,
    /// An index would not fit the `u32` index buffer.
    TooManyVertices,
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegeneratePolygon { corners } => write!(f, "polygon with {corners} corners"),
            Self::InvalidPrism { sides, steps } => {
                write!(f, "prism needs >= 3 sides and >= 1 step, got {sides} sides, {steps} steps")
            }
            Self::MissingFrame => write!(f, "tessellation carries no geometric frame"),
            Self::GeometryMismatch => write!(f, "tessellation geometry differs from the builder's"),
            Self::TooManyVertices => write!(f, "vertex count exceeds the u32 index range"),
        }
    }
}

impl std::error::Error for MeshError {}
