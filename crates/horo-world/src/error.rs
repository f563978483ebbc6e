//! Error types for horo-world.

use crate::models::ModelKind;
use crate::textures::TextureKind;
use horo_mesh::MeshError;
use horo_tess::TessellationError;
use std::fmt;
use std::path::PathBuf;

/// Problems with a [`WorldConfig`](crate::WorldConfig).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, message: String },
    /// The text is not valid TOML for the config schema.
    Parse { message: String },
    /// A value is out of range.
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid { field, reason: reason.into() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read config '{}': {message}", path.display()),
            Self::Parse { message } => write!(f, "malformed config: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid config value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failures while building the scene's GPU-side resources.
#[derive(Debug)]
pub enum SetupError {
    Config(ConfigError),
    Tessellation(TessellationError),
    Mesh { model: ModelKind, source: MeshError },
    /// The mesh uploader refused a model.
    Upload { model: ModelKind, message: String },
    /// A texture could not be produced or handed to the binder.
    Texture { texture: TextureKind, message: String },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Tessellation(e) => write!(f, "ground tiling: {e}"),
            Self::Mesh { model, source } => write!(f, "building {model}: {source}"),
            Self::Upload { model, message } => write!(f, "uploading {model}: {message}"),
            Self::Texture { texture, message } => write!(f, "texture {texture}: {message}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Tessellation(e) => Some(e),
            Self::Mesh { source, .. } => Some(source),
            Self::Upload { .. } | Self::Texture { .. } => None,
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self { Self::Config(e) }
}

impl From<TessellationError> for SetupError {
    fn from(e: TessellationError) -> Self { Self::Tessellation(e) }
}
