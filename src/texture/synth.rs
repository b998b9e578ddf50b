//! Panel texture synthesis
//!
//! Turns each base panel image into one texture per rotation of its shape,
//! optionally with the shape's stitch overlay and debug labels, and stores the
//! complete sequence in the texture cache.

use futures_util::future::join_all;
use image::RgbaImage;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;

use super::cache::{PanelTexture, TextureCache};
use super::debug_label::draw_debug_info;
use super::loader::{AssetPaths, ImageSource, LoadError};
use super::rotate::{composite_overlay, rotate_about_center};
use crate::catalog::{PanelKey, ShapeType};
use crate::settings::ViewerMode;

/// A failed image load and the panel images it left uncached
#[derive(Debug, Error)]
#[error("{error} (affects {} panel image(s))", .affected.len())]
pub struct LoadFailure {
    pub affected: Vec<PanelKey>,
    #[source]
    pub error: LoadError,
}

/// Some required panel images could not be synthesized
///
/// Images that did load are cached regardless.
#[derive(Debug, Error)]
#[error("{} image load(s) failed{}", .failures.len(), first_failure(.failures))]
pub struct SynthesisError {
    pub failures: Vec<LoadFailure>,
}

fn first_failure(failures: &[LoadFailure]) -> String {
    failures
        .first()
        .map(|failure| format!("; first: {failure}"))
        .unwrap_or_default()
}

impl SynthesisError {
    /// Every panel image left without a texture set
    pub fn uncached(&self) -> impl Iterator<Item = &PanelKey> {
        self.failures.iter().flat_map(|f| f.affected.iter())
    }
}

/// Synthesizes and caches rotated panel textures
pub struct TextureSynthesizer<S> {
    source: S,
    assets: AssetPaths,
    mode: ViewerMode,
    cache: TextureCache,
    /// Stitch overlays, loaded once per shape
    stitches: HashMap<ShapeType, Arc<RgbaImage>>,
}

impl<S: ImageSource> TextureSynthesizer<S> {
    pub fn new(source: S, assets: AssetPaths, mode: ViewerMode) -> Self {
        Self {
            source,
            assets,
            mode,
            cache: TextureCache::new(),
            stitches: HashMap::new(),
        }
    }

    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn mode(&self) -> ViewerMode {
        self.mode
    }

    pub fn has_stitch(&self, shape: ShapeType) -> bool {
        self.stitches.contains_key(&shape)
    }

    /// Make sure every key in `required` has a full texture sequence cached
    ///
    /// Returns the number of newly synthesized panel images. On error the
    /// failed images stay uncached while the rest are cached as usual.
    pub async fn ensure_textures_loaded(
        &mut self,
        required: &[PanelKey],
    ) -> Result<usize, SynthesisError> {
        let missing = self.cache.missing(required);
        if missing.is_empty() {
            return Ok(0);
        }
        tracing::debug!("Synthesizing {} panel image(s)", missing.len());

        let mut failures = Vec::new();
        if self.mode.uses_stitches() {
            failures.extend(self.load_stitches(&missing).await);
        }

        let source = &self.source;
        let assets = &self.assets;
        let stitches = &self.stitches;
        let mode = self.mode;

        // Panels whose stitch failed are already reported with that failure
        let jobs = missing
            .iter()
            .filter(|key| !mode.uses_stitches() || stitches.contains_key(&key.shape))
            .map(|key| async move {
                let stitch = stitches.get(&key.shape).map(Arc::as_ref);
                let result = match source.load_image(&assets.panel_image(key)).await {
                    Ok(base) => {
                        let debug = mode.is_debug();
                        Ok(synthesize_rotations(&base, key.shape, stitch, debug).await)
                    }
                    Err(error) => Err(error),
                };
                (key, result)
            });
        let results = join_all(jobs).await;

        let mut synthesized = 0;
        for (key, result) in results {
            match result {
                Ok(textures) => {
                    if self.cache.insert(key.clone(), textures) {
                        synthesized += 1;
                    }
                }
                Err(error) => {
                    tracing::error!("Failed to load panel image {}: {}", key, error);
                    failures.push(LoadFailure {
                        affected: vec![key.clone()],
                        error,
                    });
                }
            }
        }

        tracing::info!(
            "Synthesized {} panel image(s), {} failure(s)",
            synthesized,
            failures.len()
        );

        if failures.is_empty() {
            Ok(synthesized)
        } else {
            Err(SynthesisError { failures })
        }
    }

    /// Load the stitch overlays needed by `missing` that are not loaded yet
    async fn load_stitches(&mut self, missing: &[PanelKey]) -> Vec<LoadFailure> {
        let shapes: BTreeSet<ShapeType> = missing
            .iter()
            .map(|key| key.shape)
            .filter(|shape| !self.stitches.contains_key(shape))
            .collect();

        let source = &self.source;
        let assets = &self.assets;
        let results = join_all(shapes.into_iter().map(|shape| async move {
            (shape, source.load_image(&assets.stitch_image(shape)).await)
        }))
        .await;

        let mut failures = Vec::new();
        for (shape, result) in results {
            match result {
                Ok(stitch) => {
                    tracing::debug!("Loaded {} stitch overlay", shape);
                    self.stitches.insert(shape, Arc::new(stitch));
                }
                Err(error) => {
                    tracing::error!("Failed to load {} stitch overlay: {}", shape, error);
                    failures.push(LoadFailure {
                        affected: missing.iter().filter(|k| k.shape == shape).cloned().collect(),
                        error,
                    });
                }
            }
        }
        failures
    }
}

/// Render every rotation of `base` for `shape`
async fn synthesize_rotations(
    base: &RgbaImage,
    shape: ShapeType,
    stitch: Option<&RgbaImage>,
    debug: bool,
) -> Vec<Arc<PanelTexture>> {
    let sides = shape.side_count();
    let mut textures = Vec::with_capacity(sides);
    for rotation in 0..sides {
        let mut canvas = rotate_about_center(base, rotation, sides);
        if let Some(stitch) = stitch {
            composite_overlay(&mut canvas, stitch);
        }
        if debug {
            draw_debug_info(&mut canvas, shape, rotation);
        }
        textures.push(Arc::new(PanelTexture::new(canvas, rotation)));
        // Each finished texture is a suspension point
        tokio::task::yield_now().await;
    }
    textures
}
