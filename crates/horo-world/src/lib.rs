//! horo-world — a free-flight scene over curved-space models
//!
//! The simulation side of the viewer, with the windowing and GPU layers
//! behind traits:
//!
//! - [`InputCollector`] turns window events into per-step [`UserInput`]
//!   snapshots.
//! - [`GhostCamera`] flies through the model with inertia, mouse look and
//!   a "go home" pull back to the origin.
//! - [`Spawner`] drops stock models at the camera on key presses.
//! - [`Scene`] steps both and renders its [`RenderNode`]s through a
//!   [`RenderContext`], which forwards uniforms to a [`UniformSink`] and
//!   draws from a [`ModelBank`] and [`TextureBank`].
//!
//! Everything is parameterized by a [`WorldConfig`] loaded from TOML.

mod camera;
mod config;
mod error;
mod input;
mod models;
mod render;
mod scene;
mod spawner;
mod textures;

pub use camera::GhostCamera;
pub use config::{
    BindingsConfig, CameraConfig, ModelsConfig, RenderConfig, SpawnBinding, TessellationConfig, WorldConfig,
};
pub use error::{ConfigError, SetupError};
pub use input::{keys, Button, InputCollector, InputSource, UserInput};
pub use models::{build_mesh, GpuMesh, MeshUploader, ModelBank, ModelKind};
pub use render::{RenderContext, UniformSink};
pub use scene::Scene;
pub use spawner::{RenderNode, Spawner};
pub use textures::{GeneratedTextures, TextureBank, TextureBinder, TextureData, TextureKind, TextureSource};
