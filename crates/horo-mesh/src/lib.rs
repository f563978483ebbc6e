//! horo-mesh — triangle meshes for curved-space models
//!
//! [`ModelBuilder`] turns polygons, geodesic prisms and framed tilings into
//! flat vertex/index buffers whose [`Vertex`] layout can be uploaded to the
//! GPU as-is. [`models`] holds the demo scene's stock meshes.

mod builder;
mod error;
pub mod models;
mod vertex;

pub use builder::ModelBuilder;
pub use error::MeshError;
pub use models::TreeBuilder;
pub use vertex::{Mesh, Vertex};
