//! Fixtures shared by unit tests

use image::{Rgba, RgbaImage};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::catalog::{Design, ObjectData, PanelAssignment, PanelKey, ShapeType};
use crate::texture::{AssetPaths, ImageSource, LoadError};

/// Asset root used by in-memory image sources
pub const ASSET_ROOT: &str = "assets";

/// Vertices of the full ball: 20 * 54 + 12 * 45 triangles
pub const TOTAL_VERTICES: usize = (20 * 54 + 12 * 45) * 3;

/// Design using one image per shape, every panel at rotation 0
pub fn uniform_design(name: &str, hexagon_id: &str, pentagon_id: &str) -> Design {
    let panels = |shape: ShapeType, id: &str| {
        vec![PanelAssignment::new(id, 0); shape.descriptor().panel_count]
    };
    Design {
        name: name.to_string(),
        hexagon: panels(ShapeType::Hexagon, hexagon_id),
        pentagon: panels(ShapeType::Pentagon, pentagon_id),
    }
}

/// Mesh arrays with one small right triangle per face
pub fn object_data(uv_stride: usize) -> ObjectData {
    let mut positions = Vec::with_capacity(TOTAL_VERTICES * 3);
    let mut uvs = Vec::with_capacity(TOTAL_VERTICES * uv_stride);
    for i in 0..TOTAL_VERTICES {
        let triangle = (i / 3) as f32;
        let corner = i % 3;
        positions.extend([
            triangle + if corner == 1 { 1.0 } else { 0.0 },
            if corner == 2 { 1.0 } else { 0.0 },
            0.0,
        ]);
        uvs.extend([corner as f32 / 2.0, 0.5]);
        if uv_stride == 3 {
            uvs.push(0.0);
        }
    }
    ObjectData { positions, uvs }
}

/// Complete data document for `designs`
pub fn catalog_json(designs: &[Design]) -> String {
    let object = object_data(2);
    serde_json::json!({
        "object": { "v": object.positions, "uv": object.uvs },
        "designs": designs,
    })
    .to_string()
}

pub fn solid(size: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(size, size, Rgba(rgba))
}

/// Memory source holding the given panel images and both stitch overlays
pub fn image_source(hexagon_ids: &[&str], pentagon_ids: &[&str]) -> MemoryImageSource {
    let assets = AssetPaths::new(ASSET_ROOT);
    let mut source = MemoryImageSource::new();
    let ids = hexagon_ids
        .iter()
        .map(|id| PanelKey::new(ShapeType::Hexagon, *id))
        .chain(pentagon_ids.iter().map(|id| PanelKey::new(ShapeType::Pentagon, *id)));
    for key in ids {
        source.insert(assets.panel_image(&key), solid(16, [200, 200, 200, 255]));
    }
    for shape in ShapeType::ALL {
        source.insert(assets.stitch_image(shape), RgbaImage::new(16, 16));
    }
    source
}

/// Serves images from memory and records every load request
#[derive(Debug, Default)]
pub struct MemoryImageSource {
    images: HashMap<PathBuf, RgbaImage>,
    loads: RefCell<Vec<PathBuf>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, image: RgbaImage) {
        self.images.insert(path.into(), image);
    }

    /// Every path requested so far, in request order
    pub fn loads(&self) -> Vec<PathBuf> {
        self.loads.borrow().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.borrow().len()
    }
}

impl ImageSource for MemoryImageSource {
    async fn load_image(&self, path: &Path) -> Result<RgbaImage, LoadError> {
        self.loads.borrow_mut().push(path.to_path_buf());
        // Suspend like a real load would
        tokio::task::yield_now().await;
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_path_buf()))
    }
}
