//! World configuration.
//!
//! Every section has serde defaults, so a TOML file only needs the values
//! it changes:
//!
//! ```toml
//! geometry = "spherical"
//!
//! [tessellation]
//! rounds = 20
//!
//! [camera]
//! fast_speed = 3.0
//!
//! [bindings]
//! go_home = { key = 72 }
//! ```

use crate::error::ConfigError;
use crate::input::{keys, Button};
use crate::models::ModelKind;
use crate::textures::TextureKind;
use horo::Geometry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for a [`Scene`](crate::Scene) and its resources.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub geometry: Geometry,
    pub tessellation: TessellationConfig,
    pub camera: CameraConfig,
    pub bindings: BindingsConfig,
    pub models: ModelsConfig,
    pub render: RenderConfig,
}

impl WorldConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse { message: e.to_string() })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse { message: e.to_string() })
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.tessellation.rounds = rounds;
        self
    }

    pub fn with_shape(mut self, shape: [u32; 3]) -> Self {
        self.tessellation.shape = Some(shape);
        self
    }

    pub fn with_horosphere_steps(mut self, steps: usize) -> Self {
        self.models.horosphere_steps = steps;
        self
    }

    pub fn with_tree_depth(mut self, depth: usize) -> Self {
        self.models.tree_depth = depth;
        self
    }

    /// Ground tiling shape for the configured geometry.
    pub fn shape(&self) -> [u32; 3] {
        self.tessellation.shape_for(self.geometry)
    }

    /// Checks every section; returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tessellation.validate(self.geometry)?;
        self.camera.validate()?;
        self.models.validate()?;
        self.render.validate()
    }
}

/// The triangle tiling used for the ground plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TessellationConfig {
    /// Coxeter shape; `None` picks a default for the geometry.
    pub shape: Option<[u32; 3]>,
    /// Breadth-first growth rounds.
    pub rounds: usize,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self { shape: None, rounds: 15 }
    }
}

impl TessellationConfig {
    pub fn shape_for(&self, geometry: Geometry) -> [u32; 3] {
        self.shape.unwrap_or(match geometry {
            Geometry::Hyperbolic => [2, 4, 5],
            Geometry::Spherical => [2, 3, 5],
        })
    }

    fn validate(&self, geometry: Geometry) -> Result<(), ConfigError> {
        let shape = self.shape_for(geometry);
        if shape.iter().any(|&p| p < 2) {
            return Err(ConfigError::invalid("tessellation.shape", format!("{shape:?} has an entry below 2")));
        }
        // Angle sum π·Σ1/p against π: below for hyperbolic, above for spherical.
        let sum: f64 = shape.iter().map(|&p| 1.0 / p as f64).sum();
        let fits = match geometry {
            Geometry::Hyperbolic => sum < 1.0 - 1e-12,
            Geometry::Spherical => sum > 1.0 + 1e-12,
        };
        if !fits {
            return Err(ConfigError::invalid(
                "tessellation.shape",
                format!("{shape:?} does not tile {geometry:?} space"),
            ));
        }
        if self.rounds == 0 {
            return Err(ConfigError::invalid("tessellation.rounds", "must be at least 1"));
        }
        Ok(())
    }
}

/// Flight model constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians of look per pixel of mouse motion, before zoom.
    pub look_sensitivity: f64,
    /// Roll rate in radians per second.
    pub roll_rate: f64,
    /// Zoom multiplier applied each step the zoom-in button is held.
    pub zoom_factor: f64,
    pub initial_zoom: f64,
    pub fast_speed: f64,
    pub slow_speed: f64,
    pub fast_acceleration: f64,
    pub slow_acceleration: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.002,
            roll_rate: 1.0,
            zoom_factor: 0.964,
            initial_zoom: 1.0,
            fast_speed: 2.0,
            slow_speed: 0.2,
            fast_acceleration: 4.0,
            slow_acceleration: 0.8,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("camera.look_sensitivity", self.look_sensitivity),
            ("camera.initial_zoom", self.initial_zoom),
            ("camera.fast_speed", self.fast_speed),
            ("camera.slow_speed", self.slow_speed),
            ("camera.fast_acceleration", self.fast_acceleration),
            ("camera.slow_acceleration", self.slow_acceleration),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("{value} is not a positive number")));
            }
        }
        if !(self.roll_rate.is_finite() && self.roll_rate >= 0.0) {
            return Err(ConfigError::invalid("camera.roll_rate", format!("{} is negative", self.roll_rate)));
        }
        if !(self.zoom_factor > 0.0 && self.zoom_factor < 1.0) {
            return Err(ConfigError::invalid("camera.zoom_factor", format!("{} is outside (0, 1)", self.zoom_factor)));
        }
        Ok(())
    }
}

/// What a spawn button places in front of the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnBinding {
    pub button: Button,
    pub model: ModelKind,
    pub texture: TextureKind,
}

/// Button assignments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    pub forward: Button,
    pub backward: Button,
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
    pub roll_clockwise: Button,
    pub roll_counterclockwise: Button,
    pub toggle_slow: Button,
    pub toggle_rotation_lock: Button,
    pub go_home: Button,
    pub zoom_in: Button,
    pub zoom_out: Button,
    pub spawn: Vec<SpawnBinding>,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        let spawn = |code, model, texture| SpawnBinding { button: Button::Key(code), model, texture };
        Self {
            forward: Button::Mouse(keys::MOUSE_LEFT),
            backward: Button::Mouse(keys::MOUSE_RIGHT),
            left: Button::Key(keys::A),
            right: Button::Key(keys::D),
            up: Button::Key(keys::W),
            down: Button::Key(keys::S),
            roll_clockwise: Button::Key(keys::E),
            roll_counterclockwise: Button::Key(keys::Q),
            toggle_slow: Button::Key(keys::LEFT_SHIFT),
            toggle_rotation_lock: Button::Key(keys::LEFT_CONTROL),
            go_home: Button::Key(keys::HOME),
            zoom_in: Button::Key(keys::O),
            zoom_out: Button::Key(keys::P),
            spawn: vec![
                spawn(keys::NUM_1, ModelKind::Dodecahedron, TextureKind::Perlin),
                spawn(keys::NUM_2, ModelKind::Horosphere, TextureKind::Tile),
                spawn(keys::NUM_3, ModelKind::Plane, TextureKind::Perlin),
                spawn(keys::NUM_4, ModelKind::Prism, TextureKind::Blank),
                spawn(keys::NUM_5, ModelKind::Tree, TextureKind::Blank),
            ],
        }
    }
}

/// Parameters of the stock models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub horosphere_steps: usize,
    pub horosphere_size: f64,
    pub horosphere_texture_scale: f64,
    pub tree_depth: usize,
    /// Branches whose `cosh` distance from the root exceeds this are culled.
    pub tree_limit: f64,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            horosphere_steps: 400,
            horosphere_size: 20.0,
            horosphere_texture_scale: 5.0,
            tree_depth: 7,
            tree_limit: 100.0,
        }
    }
}

impl ModelsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.horosphere_steps == 0 {
            return Err(ConfigError::invalid("models.horosphere_steps", "must be at least 1"));
        }
        if !(self.horosphere_size.is_finite() && self.horosphere_size > 0.0) {
            return Err(ConfigError::invalid("models.horosphere_size", "must be positive"));
        }
        if !self.horosphere_texture_scale.is_finite() {
            return Err(ConfigError::invalid("models.horosphere_texture_scale", "must be finite"));
        }
        if !(self.tree_limit >= 1.0) {
            return Err(ConfigError::invalid("models.tree_limit", "cosh distances start at 1"));
        }
        Ok(())
    }
}

/// Projection and viewport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub near: f64,
    pub far: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { near: 0.01, far: 10.0, width: 1280, height: 720 }
    }
}

impl RenderConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::invalid(
                "render.far",
                format!("need 0 < near < far, got near {} far {}", self.near, self.far),
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid("render.width", "viewport must be non-empty"));
        }
        Ok(())
    }
}
