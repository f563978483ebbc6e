//! Headless flight through the demo world.
//!
//! Builds every stock model through a CPU-side uploader, then flies a
//! scripted route: spawning each model, looking around, sliding along a
//! horosphere and finally pulling back home. Each phase is logged.
//!
//! ```text
//! horo-demo --frames 900 --geometry spherical
//! RUST_LOG=horo=debug horo-demo --config world.toml
//! ```

use std::cell::Cell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, ValueEnum};
use horo::Geometry;
use horo_mesh::Mesh;
use horo_world::{
    keys, GeneratedTextures, GpuMesh, InputCollector, MeshUploader, ModelBank, ModelKind, RenderContext, Scene,
    SetupError, TextureBank, TextureBinder, TextureData, TextureKind, UniformSink, WorldConfig,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GeometryArg {
    Hyperbolic,
    Spherical,
}

impl From<GeometryArg> for Geometry {
    fn from(arg: GeometryArg) -> Self {
        match arg {
            GeometryArg::Hyperbolic => Geometry::Hyperbolic,
            GeometryArg::Spherical => Geometry::Spherical,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "horo-demo")]
#[command(about = "Fly a scripted route through a hyperbolic or spherical world, without a window")]
struct Args {
    /// TOML world configuration; defaults apply to anything it omits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation steps to run.
    #[arg(long, default_value = "600")]
    frames: usize,

    /// Ground tiling growth rounds (overrides the config).
    #[arg(long)]
    rounds: Option<usize>,

    /// Model geometry (overrides the config).
    #[arg(long, value_enum)]
    geometry: Option<GeometryArg>,

    /// Step length in seconds.
    #[arg(long, default_value = "0.016666666666666666")]
    dt: f64,
}

/// Stands in for the GPU: records sizes and counts draws.
#[derive(Debug, Default)]
struct CpuUploader {
    meshes: usize,
    vertices: usize,
    triangles: usize,
    bytes: usize,
    draws: Rc<Cell<usize>>,
}

struct CpuMesh {
    draws: Rc<Cell<usize>>,
}

impl MeshUploader for CpuUploader {
    fn upload(&mut self, kind: ModelKind, mesh: &Mesh) -> Result<Box<dyn GpuMesh>, SetupError> {
        if mesh.is_empty() {
            return Err(SetupError::Upload { model: kind, message: "empty mesh".into() });
        }
        self.meshes += 1;
        self.vertices += mesh.vertices().len();
        self.triangles += mesh.num_triangles();
        self.bytes += mesh.vertex_bytes().len() + mesh.index_bytes().len();
        Ok(Box::new(CpuMesh { draws: self.draws.clone() }))
    }
}

impl GpuMesh for CpuMesh {
    fn render(&mut self) {
        self.draws.set(self.draws.get() + 1);
    }
}

#[derive(Debug, Default)]
struct CpuTextures {
    binds: Rc<Cell<usize>>,
}

impl TextureBinder for CpuTextures {
    fn upload(&mut self, kind: TextureKind, data: &TextureData) -> Result<(), String> {
        debug!(texture = %kind, bytes = data.pixels().len(), "texture accepted");
        Ok(())
    }

    fn bind(&mut self, _: TextureKind) {
        self.binds.set(self.binds.get() + 1);
    }
}

#[derive(Debug, Default)]
struct UniformCounter {
    pushes: usize,
    last_light: [f32; 4],
}

impl UniformSink for UniformCounter {
    fn set_projection(&mut self, _: [[f32; 4]; 4]) {
        self.pushes += 1;
    }

    fn set_model_view(&mut self, _: [[f32; 4]; 4]) {
        self.pushes += 1;
    }

    fn set_light_position(&mut self, light: [f32; 4]) {
        self.last_light = light;
    }
}

/// Feeds the window events of one scripted frame. The route has four
/// legs of equal length.
fn script(frame: usize, frames: usize, input: &mut InputCollector) {
    let leg = (frames / 4).max(1);
    let spawn = [keys::NUM_1, keys::NUM_2, keys::NUM_3, keys::NUM_4, keys::NUM_5];
    match frame / leg {
        // Spawn each stock model while drifting forward.
        0 => {
            if frame == 0 {
                input.mouse_button_event(keys::MOUSE_LEFT, true);
            }
            for (i, &key) in spawn.iter().enumerate() {
                let at = i * leg / spawn.len();
                if frame == at {
                    input.key_event(key, true);
                } else if frame == at + 1 {
                    input.key_event(key, false);
                }
            }
        }
        // Coast and look around.
        1 => {
            if frame == leg {
                input.mouse_button_event(keys::MOUSE_LEFT, false);
            }
            let t = frame as f64;
            input.mouse_moved(200.0 * (t * 0.05).cos(), 120.0 * (t * 0.03).sin());
        }
        // Lock rotation and slide along the horosphere.
        2 => {
            if frame == 2 * leg {
                input.key_event(keys::LEFT_CONTROL, true);
                input.key_event(keys::D, true);
                input.key_event(keys::W, true);
            }
        }
        // Let go and pull back home.
        _ => {
            if frame == 3 * leg {
                input.key_event(keys::LEFT_CONTROL, false);
                input.key_event(keys::D, false);
                input.key_event(keys::W, false);
                input.key_event(keys::HOME, true);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => WorldConfig::from_file(path)?,
        None => WorldConfig::default(),
    };
    if let Some(geometry) = args.geometry {
        config = config.with_geometry(geometry.into());
    }
    if let Some(rounds) = args.rounds {
        config = config.with_rounds(rounds);
    }
    config.validate()?;
    info!(geometry = ?config.geometry, shape = ?config.shape(), rounds = config.tessellation.rounds, "starting");

    let mut uploader = CpuUploader::default();
    let mut models = ModelBank::build(&config, &mut uploader)?;
    info!(
        meshes = uploader.meshes,
        vertices = uploader.vertices,
        triangles = uploader.triangles,
        bytes = uploader.bytes,
        "models uploaded"
    );
    let binds = Rc::new(Cell::new(0));
    let binder = CpuTextures { binds: binds.clone() };
    let mut textures = TextureBank::build(&mut GeneratedTextures::default(), Box::new(binder))?;

    let mut scene = Scene::new(&config)?;
    let mut uniforms = UniformCounter::default();
    let mut input = InputCollector::new();
    let mut max_distance: f64 = 0.0;

    for frame in 0..args.frames {
        script(frame, args.frames, &mut input);
        scene.step(args.dt, &input.snapshot());
        input.end_step();

        let mut ctx = RenderContext::new(&mut uniforms, &mut models, &mut textures);
        ctx.set_dimensions(config.render.width, config.render.height);
        scene.render(&mut ctx);

        let g = config.geometry;
        let distance = g.distance(scene.camera().position(), g.origin());
        max_distance = max_distance.max(distance);
        if frame % 60 == 0 {
            debug!(frame, distance, nodes = scene.nodes().len(), zoom = scene.camera().zoom(), "flight");
        }
    }

    let g = config.geometry;
    let camera = scene.camera();
    info!(
        frames = args.frames,
        nodes = scene.nodes().len(),
        draws = uploader.draws.get(),
        texture_binds = binds.get(),
        uniform_pushes = uniforms.pushes,
        light = ?uniforms.last_light,
        max_distance,
        final_distance = g.distance(camera.position(), g.origin()),
        isometry = g.is_isometry(camera.pose(), 1e-9),
        "flight finished"
    );
    Ok(())
}
