use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Decoded RGBA image, stored as `0xAARRGGBB`.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Sprite {
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Self {
        let pixels = rgba
            .chunks_exact(4)
            .map(|p| {
                ((p[3] as u32) << 24) | ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32
            })
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("decoding sprite {}", path.display()))?
            .to_rgba8();
        let (w, h) = img.dimensions();
        info!(path = %path.display(), width = w, height = h, "loaded sprite");
        Ok(Self::from_rgba(w as usize, h as usize, img.as_raw()))
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetId {
    Weapon,
}

impl AssetId {
    const COUNT: usize = 1;

    fn index(self) -> usize {
        match self {
            AssetId::Weapon => 0,
        }
    }
}

/// Loaded sprites, owned by the presentation side and indexed by [`AssetId`].
#[derive(Debug, Default)]
pub struct Assets {
    slots: [Option<Sprite>; AssetId::COUNT],
}

impl Assets {
    pub fn insert(&mut self, id: AssetId, sprite: Sprite) {
        self.slots[id.index()] = Some(sprite);
    }

    pub fn get(&self, id: AssetId) -> Option<&Sprite> {
        self.slots[id.index()].as_ref()
    }
}
