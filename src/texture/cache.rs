//! Cache of synthesized panel textures
//!
//! One entry per panel image, holding a texture for every rotation of its
//! shape. Entries are inserted whole, never rebuilt and never evicted.

use glam::Vec2;
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::PanelKey;

/// A rotated (and possibly stitched/annotated) panel texture
#[derive(Debug, Clone)]
pub struct PanelTexture {
    pub image: RgbaImage,
    /// Rotation index baked into the pixels
    pub rotation: usize,
    /// Whether the renderer should flip rows on upload
    ///
    /// Always false: the rotation is pre-baked in canvas orientation.
    pub flip_y: bool,
    /// Sampling pivot in UV space
    pub center: Vec2,
    /// Texture data is sRGB encoded
    pub srgb: bool,
}

impl PanelTexture {
    pub fn new(image: RgbaImage, rotation: usize) -> Self {
        Self {
            image,
            rotation,
            flip_y: false,
            center: Vec2::splat(0.5),
            srgb: true,
        }
    }
}

/// Texture sequences keyed by panel image
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: HashMap<PanelKey, Vec<Arc<PanelTexture>>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a complete sequence (one texture per rotation)
    ///
    /// Returns false, leaving the cache untouched, if the key is already cached
    /// or the sequence length does not match the shape's side count.
    pub fn insert(&mut self, key: PanelKey, textures: Vec<Arc<PanelTexture>>) -> bool {
        if textures.len() != key.shape.side_count() {
            tracing::error!(
                "Refusing partial texture set for {}: {} of {} rotations",
                key,
                textures.len(),
                key.shape.side_count()
            );
            return false;
        }
        if self.entries.contains_key(&key) {
            tracing::warn!("Texture set for {} already cached", key);
            return false;
        }
        self.entries.insert(key, textures);
        true
    }

    pub fn contains(&self, key: &PanelKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Texture for one rotation of a panel image
    pub fn get(&self, key: &PanelKey, rotation: usize) -> Option<&Arc<PanelTexture>> {
        self.entries.get(key).and_then(|set| set.get(rotation))
    }

    /// Keys from `keys` with no cached sequence, preserving order
    pub fn missing<'a>(&self, keys: impl IntoIterator<Item = &'a PanelKey>) -> Vec<PanelKey> {
        keys.into_iter()
            .filter(|key| !self.contains(key))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
