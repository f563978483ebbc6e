//! The scene: a camera, a spawner and whatever they have placed.

use crate::camera::GhostCamera;
use crate::config::{RenderConfig, WorldConfig};
use crate::error::SetupError;
use crate::input::InputSource;
use crate::render::RenderContext;
use crate::spawner::{RenderNode, Spawner};
use horo::perspective;

#[derive(Clone, Debug)]
pub struct Scene {
    camera: GhostCamera,
    spawner: Spawner,
    nodes: Vec<RenderNode>,
    render: RenderConfig,
}

impl Scene {
    pub fn new(config: &WorldConfig) -> Result<Self, SetupError> {
        config.validate()?;
        Ok(Self {
            camera: GhostCamera::new(config.geometry, config.camera.clone(), config.bindings.clone()),
            spawner: Spawner::new(config.geometry, config.bindings.spawn.clone()),
            nodes: Vec::new(),
            render: config.render.clone(),
        })
    }

    pub fn camera(&self) -> &GhostCamera { &self.camera }

    pub fn camera_mut(&mut self) -> &mut GhostCamera { &mut self.camera }

    pub fn nodes(&self) -> &[RenderNode] { &self.nodes }

    pub fn add_node(&mut self, node: RenderNode) {
        self.nodes.push(node);
    }

    /// Moves the camera, then spawns at its new pose.
    pub fn step(&mut self, dt: f64, input: &impl InputSource) {
        self.camera.step(dt, input);
        let spawned = self.spawner.step(input, self.camera.pose());
        self.nodes.extend(spawned);
    }

    pub fn render(&self, context: &mut RenderContext<'_>) {
        let zoom = self.camera.zoom();
        let ratio = context.aspect_ratio();
        context.set_projection(perspective(ratio * zoom, zoom, self.render.near, self.render.far));
        context.reset_model_view();
        context.add_model_view(&self.camera.view());
        for node in &self.nodes {
            node.render(context);
        }
    }
}
