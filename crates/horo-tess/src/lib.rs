//! horo-tess — incremental discovery of regular tilings
//!
//! Builds the face/vertex graph of a regular tiling of hyperbolic or
//! spherical space one polygon at a time. Each vertex knows the cyclic fan
//! of faces around it; once a fan is complete ("saturated") the faces
//! bordering it are fixed, which lets a new face find its neighbours
//! without any geometric search.
//!
//! Triangle tilings can additionally carry a [`CoxeterFrame`]: every face
//! then holds the isometry placing it relative to the seed, and every
//! vertex its position in the model.

mod error;
mod face;
mod frame;
mod refs;
mod tessellation;
mod vertex;

pub use error::{TessellationError, Violation};
pub use face::Face;
pub use frame::CoxeterFrame;
pub use refs::{Direction, FaceRef, Orientation, VertexRef};
pub use tessellation::{GrowthReport, Tessellation};
pub use vertex::Vertex;
