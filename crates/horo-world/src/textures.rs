//! Textures: decoded pixel data, where it comes from, and where it goes.

use crate::error::SetupError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Stock textures a [`RenderNode`](crate::RenderNode) can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureKind {
    Perlin,
    Tile,
    Blank,
}

impl TextureKind {
    pub const ALL: [TextureKind; 3] = [TextureKind::Perlin, TextureKind::Tile, TextureKind::Blank];

    pub fn name(self) -> &'static str {
        match self {
            Self::Perlin => "perlin",
            Self::Tile => "tile",
            Self::Blank => "blank",
        }
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded RGBA8 image, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureData {
    /// Fails unless `pixels` holds exactly `width · height` RGBA texels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(format!("empty {width}x{height} image"));
        }
        if pixels.len() != expected {
            return Err(format!("{width}x{height} RGBA image needs {expected} bytes, got {}", pixels.len()));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn from_fn(width: u32, height: u32, mut texel: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&texel(x, y));
            }
        }
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn pixels(&self) -> &[u8] { &self.pixels }

    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }
}

/// Produces decoded images, e.g. from PNG files on disk.
pub trait TextureSource {
    fn load(&mut self, kind: TextureKind) -> Result<TextureData, String>;
}

/// The GPU side of texturing.
pub trait TextureBinder {
    fn upload(&mut self, kind: TextureKind, data: &TextureData) -> Result<(), String>;
    fn bind(&mut self, kind: TextureKind);
}

/// Procedural stand-ins for the stock textures.
#[derive(Clone, Copy, Debug)]
pub struct GeneratedTextures {
    pub size: u32,
    pub seed: u32,
}

impl Default for GeneratedTextures {
    fn default() -> Self {
        Self { size: 256, seed: 0x9e37_79b9 }
    }
}

impl GeneratedTextures {
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    fn lattice(&self, x: u32, y: u32) -> f64 {
        let mut h = x.wrapping_mul(0x8da6_b343) ^ y.wrapping_mul(0xd816_3841) ^ self.seed;
        h ^= h >> 13;
        h = h.wrapping_mul(0x5bd1_e995);
        h ^= h >> 15;
        f64::from(h & 0xffff) / 65535.0
    }

    /// Smoothly interpolated value noise with the given lattice period.
    fn noise(&self, x: u32, y: u32, period: u32) -> f64 {
        let cells = (self.size / period).max(1);
        let (fx, fy) = (x as f64 / period as f64, y as f64 / period as f64);
        let (x0, y0) = (fx.floor() as u32, fy.floor() as u32);
        let smooth = |t: f64| t * t * (3.0 - 2.0 * t);
        let (tx, ty) = (smooth(fx.fract()), smooth(fy.fract()));
        // Wrap so the texture tiles.
        let at = |i: u32, j: u32| self.lattice(i % cells, j % cells);
        let top = at(x0, y0) * (1.0 - tx) + at(x0 + 1, y0) * tx;
        let bottom = at(x0, y0 + 1) * (1.0 - tx) + at(x0 + 1, y0 + 1) * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

impl TextureSource for GeneratedTextures {
    fn load(&mut self, kind: TextureKind) -> Result<TextureData, String> {
        let size = self.size;
        if size < 8 || !size.is_power_of_two() {
            return Err(format!("generated textures need a power-of-two size >= 8, got {size}"));
        }
        let this = *self;
        let data = match kind {
            TextureKind::Blank => TextureData::from_fn(size, size, |_, _| [255; 4]),
            TextureKind::Tile => TextureData::from_fn(size, size, |x, y| {
                let cell = size / 8;
                let grout = x % cell < 2 || y % cell < 2;
                let v = if grout { 60 } else if (x / cell + y / cell) % 2 == 0 { 220 } else { 170 };
                [v, v, v, 255]
            }),
            TextureKind::Perlin => TextureData::from_fn(size, size, |x, y| {
                let mut value = 0.0;
                let mut amplitude = 0.5;
                let mut period = size / 4;
                while period >= 2 {
                    value += amplitude * this.noise(x, y, period);
                    amplitude *= 0.5;
                    period /= 2;
                }
                let v = (value.clamp(0.0, 1.0) * 255.0) as u8;
                [v, v, v, 255]
            }),
        };
        Ok(data)
    }
}

/// Every stock texture, uploaded through a [`TextureBinder`].
pub struct TextureBank {
    binder: Box<dyn TextureBinder>,
    loaded: HashSet<TextureKind>,
}

impl TextureBank {
    pub fn build(source: &mut dyn TextureSource, mut binder: Box<dyn TextureBinder>) -> Result<Self, SetupError> {
        let mut loaded = HashSet::new();
        for kind in TextureKind::ALL {
            let data = source.load(kind).map_err(|message| SetupError::Texture { texture: kind, message })?;
            binder
                .upload(kind, &data)
                .map_err(|message| SetupError::Texture { texture: kind, message })?;
            debug!(texture = %kind, width = data.width(), height = data.height(), "texture uploaded");
            loaded.insert(kind);
        }
        Ok(Self { binder, loaded })
    }

    pub fn contains(&self, kind: TextureKind) -> bool { self.loaded.contains(&kind) }

    pub fn bind(&mut self, kind: TextureKind) {
        if self.loaded.contains(&kind) {
            self.binder.bind(kind);
        } else {
            warn!(texture = %kind, "binding a texture that was never uploaded");
        }
    }
}

impl fmt::Debug for TextureBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureBank").field("loaded", &self.loaded.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        uploads: Vec<TextureKind>,
        binds: Vec<TextureKind>,
    }

    struct SharedBinder(Rc<RefCell<Recorder>>);

    impl TextureBinder for SharedBinder {
        fn upload(&mut self, kind: TextureKind, _: &TextureData) -> Result<(), String> {
            self.0.borrow_mut().uploads.push(kind);
            Ok(())
        }

        fn bind(&mut self, kind: TextureKind) {
            self.0.borrow_mut().binds.push(kind);
        }
    }

    #[test]
    fn texture_data_checks_length() {
        assert!(TextureData::new(2, 2, vec![0; 16]).is_ok());
        assert!(TextureData::new(2, 2, vec![0; 15]).is_err());
        assert!(TextureData::new(0, 2, vec![]).is_err());
    }

    #[test]
    fn generated_textures_are_opaque_and_tileable() {
        let mut source = GeneratedTextures::default().with_size(32);
        for kind in TextureKind::ALL {
            let data = source.load(kind).unwrap();
            assert_eq!((data.width(), data.height()), (32, 32));
            assert!(data.pixels().chunks(4).all(|t| t[3] == 255), "{kind}");
        }
        let perlin = source.load(TextureKind::Perlin).unwrap();
        let distinct: HashSet<u8> = perlin.pixels().chunks(4).map(|t| t[0]).collect();
        assert!(distinct.len() > 8, "noise is too flat: {} levels", distinct.len());
    }

    #[test]
    fn generated_size_must_be_power_of_two() {
        let mut source = GeneratedTextures::default().with_size(100);
        assert!(source.load(TextureKind::Blank).is_err());
    }

    #[test]
    fn bank_uploads_all_and_binds() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut source = GeneratedTextures::default().with_size(16);
        let mut bank = TextureBank::build(&mut source, Box::new(SharedBinder(recorder.clone()))).unwrap();
        assert_eq!(recorder.borrow().uploads, TextureKind::ALL.to_vec());
        bank.bind(TextureKind::Tile);
        assert_eq!(recorder.borrow().binds, vec![TextureKind::Tile]);
    }

    #[test]
    fn source_failure_names_the_texture() {
        struct Missing;
        impl TextureSource for Missing {
            fn load(&mut self, _: TextureKind) -> Result<TextureData, String> {
                Err("file not found".into())
            }
        }
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let err = TextureBank::build(&mut Missing, Box::new(SharedBinder(recorder))).unwrap_err();
        assert!(matches!(err, SetupError::Texture { texture: TextureKind::Perlin, .. }), "{err}");
    }
}
