//! Render state shared by every draw in a frame.

use crate::models::{ModelBank, ModelKind};
use crate::textures::{TextureBank, TextureKind};
use horo::{Geometry, Mat4};
use tracing::trace;

/// Shader uniforms, in single precision.
pub trait UniformSink {
    fn set_projection(&mut self, projection: [[f32; 4]; 4]);
    fn set_model_view(&mut self, model_view: [[f32; 4]; 4]);
    fn set_light_position(&mut self, light: [f32; 4]);
}

/// Projection and model-view state for one frame.
///
/// Uniforms are pushed lazily: only matrices changed since the last draw
/// are sent to the [`UniformSink`].
pub struct RenderContext<'a> {
    uniforms: &'a mut dyn UniformSink,
    models: &'a mut ModelBank,
    textures: &'a mut TextureBank,
    projection: Mat4<f64>,
    model_view: Mat4<f64>,
    width: u32,
    height: u32,
    projection_dirty: bool,
    model_view_dirty: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(uniforms: &'a mut dyn UniformSink, models: &'a mut ModelBank, textures: &'a mut TextureBank) -> Self {
        Self {
            uniforms,
            models,
            textures,
            projection: Mat4::identity(),
            model_view: Mat4::identity(),
            width: 1,
            height: 1,
            projection_dirty: true,
            model_view_dirty: true,
        }
    }

    pub fn geometry(&self) -> Geometry { self.models.geometry() }

    /// Zero sizes are clamped to one pixel.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn aspect_ratio(&self) -> f64 { f64::from(self.width) / f64::from(self.height) }

    pub fn projection(&self) -> &Mat4<f64> { &self.projection }

    pub fn set_projection(&mut self, projection: Mat4<f64>) {
        self.projection = projection;
        self.projection_dirty = true;
    }

    pub fn model_view(&self) -> &Mat4<f64> { &self.model_view }

    pub fn reset_model_view(&mut self) {
        self.set_model_view(Mat4::identity());
    }

    pub fn set_model_view(&mut self, model_view: Mat4<f64>) {
        self.model_view = model_view;
        self.model_view_dirty = true;
    }

    /// Right-multiplies the model-view by `transform`.
    pub fn add_model_view(&mut self, transform: &Mat4<f64>) {
        self.model_view *= *transform;
        self.model_view_dirty = true;
    }

    /// Light sits at the camera: the origin pulled back through the model-view.
    pub fn light_position(&self) -> horo::Vec4<f64> {
        let g = self.geometry();
        g.transpose(&self.model_view) * g.origin()
    }

    pub fn set_texture(&mut self, texture: TextureKind) {
        self.textures.bind(texture);
    }

    /// Flushes pending uniforms and draws `model`. Returns `false` when the
    /// bank has no such model.
    pub fn render(&mut self, model: ModelKind) -> bool {
        self.flush_uniforms();
        let drawn = self.models.render(model);
        if !drawn {
            trace!(model = %model, "model not in bank");
        }
        drawn
    }

    fn flush_uniforms(&mut self) {
        if self.projection_dirty {
            self.uniforms.set_projection(self.projection.to_f32_cols());
            self.projection_dirty = false;
        }
        if self.model_view_dirty {
            self.uniforms.set_model_view(self.model_view.to_f32_cols());
            self.uniforms.set_light_position(self.light_position().to_f32_array());
            self.model_view_dirty = false;
        }
    }
}
