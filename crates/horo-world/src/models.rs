//! The model bank: stock meshes built once and handed to the GPU layer.

use crate::config::WorldConfig;
use crate::error::SetupError;
use horo::{Geometry, Isometry};
use horo_mesh::{models, Mesh, ModelBuilder, TreeBuilder};
use horo_tess::Tessellation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Stock models a [`RenderNode`](crate::RenderNode) can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Dodecahedron,
    Horosphere,
    Plane,
    Prism,
    Tree,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Dodecahedron,
        ModelKind::Horosphere,
        ModelKind::Plane,
        ModelKind::Prism,
        ModelKind::Tree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dodecahedron => "dodecahedron",
            Self::Horosphere => "horosphere",
            Self::Plane => "plane",
            Self::Prism => "prism",
            Self::Tree => "tree",
        }
    }

    /// Whether the model can be built in `geometry`. The dodecahedron
    /// table, horospheres and the tree are hyperbolic constructions.
    pub fn available_in(self, geometry: Geometry) -> bool {
        match self {
            Self::Plane | Self::Prism => true,
            Self::Dodecahedron | Self::Horosphere | Self::Tree => geometry.is_hyperbolic(),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mesh living on the GPU.
pub trait GpuMesh {
    /// Issues the draw call with whatever uniforms and texture are bound.
    fn render(&mut self);
}

/// Uploads CPU meshes to the GPU.
pub trait MeshUploader {
    fn upload(&mut self, kind: ModelKind, mesh: &Mesh) -> Result<Box<dyn GpuMesh>, SetupError>;
}

/// Builds the CPU mesh of `kind` for `config`, or `None` when the model
/// does not exist in the configured geometry.
pub fn build_mesh(kind: ModelKind, config: &WorldConfig) -> Result<Option<Mesh>, SetupError> {
    let geometry = config.geometry;
    if !kind.available_in(geometry) {
        return Ok(None);
    }
    let mesh_err = |source| SetupError::Mesh { model: kind, source };
    let mesh = match kind {
        ModelKind::Dodecahedron => models::dodecahedron().map_err(mesh_err)?,
        ModelKind::Horosphere => {
            let m = &config.models;
            models::horosphere(m.horosphere_steps, m.horosphere_size, m.horosphere_texture_scale).map_err(mesh_err)?
        }
        ModelKind::Plane => {
            let mut tess = Tessellation::with_frame(config.shape(), geometry)?;
            let report = tess.grow(config.tessellation.rounds)?;
            debug!(faces = tess.num_faces(), rounds = report.rounds, closed = report.closed, "ground tiling grown");
            models::plane(&tess).map_err(mesh_err)?
        }
        ModelKind::Prism => models::prism(geometry).map_err(mesh_err)?,
        ModelKind::Tree => {
            let mut builder = ModelBuilder::new(geometry);
            TreeBuilder::new(geometry)
                .with_depth(config.models.tree_depth)
                .with_limit(config.models.tree_limit)
                .build(&mut builder, &Isometry::identity())
                .map_err(mesh_err)?;
            builder.build()
        }
    };
    Ok(Some(mesh))
}

/// Every stock model available in one geometry, uploaded.
pub struct ModelBank {
    geometry: Geometry,
    meshes: HashMap<ModelKind, Box<dyn GpuMesh>>,
}

impl ModelBank {
    /// Builds and uploads every model available in `config.geometry`.
    pub fn build(config: &WorldConfig, uploader: &mut dyn MeshUploader) -> Result<Self, SetupError> {
        config.validate()?;
        let mut meshes = HashMap::new();
        for kind in ModelKind::ALL {
            let Some(mesh) = build_mesh(kind, config)? else {
                debug!(model = %kind, geometry = ?config.geometry, "model skipped");
                continue;
            };
            info!(model = %kind, vertices = mesh.vertices().len(), triangles = mesh.num_triangles(), "model built");
            meshes.insert(kind, uploader.upload(kind, &mesh)?);
        }
        Ok(Self { geometry: config.geometry, meshes })
    }

    pub fn geometry(&self) -> Geometry { self.geometry }

    pub fn contains(&self, kind: ModelKind) -> bool { self.meshes.contains_key(&kind) }

    pub fn len(&self) -> usize { self.meshes.len() }

    pub fn is_empty(&self) -> bool { self.meshes.is_empty() }

    /// Draws `kind`. Returns `false` if the bank holds no such model.
    pub fn render(&mut self, kind: ModelKind) -> bool {
        match self.meshes.get_mut(&kind) {
            Some(mesh) => {
                mesh.render();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ModelBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.meshes.keys().copied().collect();
        kinds.sort_by_key(|k| k.name());
        f.debug_struct("ModelBank").field("geometry", &self.geometry).field("models", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(geometry: Geometry) -> WorldConfig {
        WorldConfig::default()
            .with_geometry(geometry)
            .with_rounds(3)
            .with_horosphere_steps(4)
            .with_tree_depth(1)
    }

    #[test]
    fn availability_by_geometry() {
        for kind in ModelKind::ALL {
            assert!(kind.available_in(Geometry::Hyperbolic), "{kind}");
        }
        let spherical: Vec<_> = ModelKind::ALL.into_iter().filter(|k| k.available_in(Geometry::Spherical)).collect();
        assert_eq!(spherical, vec![ModelKind::Plane, ModelKind::Prism]);
    }

    #[test]
    fn builds_every_hyperbolic_mesh() {
        let config = small(Geometry::Hyperbolic);
        for kind in ModelKind::ALL {
            let mesh = build_mesh(kind, &config).unwrap().unwrap();
            assert!(!mesh.is_empty(), "{kind} is empty");
        }
    }

    #[test]
    fn spherical_skips_hyperbolic_models() {
        let config = small(Geometry::Spherical);
        assert!(build_mesh(ModelKind::Tree, &config).unwrap().is_none());
        assert!(build_mesh(ModelKind::Plane, &config).unwrap().is_some());
    }

    #[test]
    fn mismatched_shape_surfaces_as_setup_error() {
        let mut config = small(Geometry::Hyperbolic);
        config.tessellation.shape = Some([2, 3, 5]);
        let err = build_mesh(ModelKind::Plane, &config).unwrap_err();
        assert!(matches!(err, SetupError::Tessellation(_)), "{err}");
    }
}
