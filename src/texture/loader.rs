//! Bitmap loading for panel and stitch images
//!
//! Loading is the asynchronous I/O boundary of texture synthesis. Sources are
//! generic so embedders can serve images from somewhere other than disk.

use image::RgbaImage;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{PanelKey, ShapeType};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Image not found: {0}")]
    NotFound(PathBuf),
}

/// Asynchronous provider of RGBA bitmaps
pub trait ImageSource {
    fn load_image(&self, path: &Path) -> impl Future<Output = Result<RgbaImage, LoadError>>;
}

/// Image paths derived from the asset root
#[derive(Debug, Clone)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/panels/<shape>/<image_id>.png`
    pub fn panel_image(&self, key: &PanelKey) -> PathBuf {
        self.root
            .join("panels")
            .join(key.shape.as_str())
            .join(format!("{}.png", key.image_id))
    }

    /// `<root>/templates/<shape>/stitch.png`
    pub fn stitch_image(&self, shape: ShapeType) -> PathBuf {
        self.root
            .join("templates")
            .join(shape.as_str())
            .join("stitch.png")
    }
}

/// Loads PNG (or any format `image` can guess) files from disk
#[derive(Debug, Clone, Default)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    async fn load_image(&self, path: &Path) -> Result<RgbaImage, LoadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = image::load_from_memory(&bytes).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            "Loaded {:?} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        Ok(image.to_rgba8())
    }
}
