//! Dropping stock models where the camera is.

use crate::config::SpawnBinding;
use crate::input::InputSource;
use crate::models::ModelKind;
use crate::render::RenderContext;
use crate::textures::TextureKind;
use horo::{Geometry, Isometry};
use tracing::{debug, info};

/// A placed model: where it is, what it looks like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderNode {
    pub transform: Isometry,
    pub model: ModelKind,
    pub texture: TextureKind,
}

impl RenderNode {
    pub fn new(transform: Isometry, model: ModelKind, texture: TextureKind) -> Self {
        Self { transform, model, texture }
    }

    /// Draws the node under the context's current model-view, which is
    /// restored afterwards.
    pub fn render(&self, context: &mut RenderContext<'_>) {
        let saved = *context.model_view();
        context.add_model_view(&self.transform);
        context.set_texture(self.texture);
        context.render(self.model);
        context.set_model_view(saved);
    }
}

/// Turns spawn button presses into [`RenderNode`]s at a cursor pose.
#[derive(Clone, Debug)]
pub struct Spawner {
    geometry: Geometry,
    bindings: Vec<SpawnBinding>,
}

impl Spawner {
    pub fn new(geometry: Geometry, bindings: Vec<SpawnBinding>) -> Self {
        Self { geometry, bindings }
    }

    pub fn bindings(&self) -> &[SpawnBinding] { &self.bindings }

    /// Nodes for every binding pressed this step, placed at `cursor`.
    /// Models that do not exist in this geometry are skipped.
    pub fn step(&self, input: &impl InputSource, cursor: &Isometry) -> Vec<RenderNode> {
        let mut spawned = Vec::new();
        for binding in &self.bindings {
            if !input.pressed_this_step(binding.button) {
                continue;
            }
            if !binding.model.available_in(self.geometry) {
                info!(model = %binding.model, geometry = ?self.geometry, "model unavailable, spawn ignored");
                continue;
            }
            debug!(model = %binding.model, texture = %binding.texture, "spawned");
            spawned.push(RenderNode::new(*cursor, binding.model, binding.texture));
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindingsConfig;
    use crate::input::{keys, Button, UserInput};
    use horo::Vec3;

    fn spawner(geometry: Geometry) -> Spawner {
        Spawner::new(geometry, BindingsConfig::default().spawn)
    }

    #[test]
    fn spawns_on_press_only() {
        let s = spawner(Geometry::Hyperbolic);
        let cursor = Geometry::Hyperbolic.displacement(Vec3::new(0.0, 0.0, -1.0));
        let nodes = s.step(&UserInput::new().with_pressed(Button::Key(keys::NUM_1)), &cursor);
        assert_eq!(nodes, vec![RenderNode::new(cursor, ModelKind::Dodecahedron, TextureKind::Perlin)]);

        let held = UserInput::new().with_held(Button::Key(keys::NUM_1));
        assert!(s.step(&held, &cursor).is_empty());
    }

    #[test]
    fn several_presses_in_one_step() {
        let s = spawner(Geometry::Hyperbolic);
        let input = UserInput::new()
            .with_pressed(Button::Key(keys::NUM_4))
            .with_pressed(Button::Key(keys::NUM_2));
        let models: Vec<_> = s.step(&input, &Isometry::identity()).into_iter().map(|n| (n.model, n.texture)).collect();
        assert_eq!(models, vec![(ModelKind::Horosphere, TextureKind::Tile), (ModelKind::Prism, TextureKind::Blank)]);
    }

    #[test]
    fn spherical_ignores_hyperbolic_models() {
        let s = spawner(Geometry::Spherical);
        let mut input = UserInput::new();
        for code in [keys::NUM_1, keys::NUM_2, keys::NUM_3, keys::NUM_4, keys::NUM_5] {
            input = input.with_pressed(Button::Key(code));
        }
        let models: Vec<_> = s.step(&input, &Isometry::identity()).into_iter().map(|n| n.model).collect();
        assert_eq!(models, vec![ModelKind::Plane, ModelKind::Prism]);
    }
}
