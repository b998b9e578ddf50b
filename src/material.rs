//! Material binding
//!
//! Produces the material array for a design: one material per geometry group,
//! in the same order as `PanelMesh::partition`.

use std::sync::Arc;
use thiserror::Error;

use crate::catalog::{total_panel_count, Design, PanelKey, ShapeType};
use crate::texture::{PanelTexture, TextureCache};

/// Magenta, easy to spot on a ball
pub const PLACEHOLDER_COLOR: [u8; 3] = [0xff, 0x00, 0xff];

/// Material for one geometry group
#[derive(Debug, Clone)]
pub enum Material {
    /// Fully transparent, used before the first design is shown
    Blank,
    /// Flat placeholder color for a panel whose texture is unavailable
    Placeholder { color: [u8; 3] },
    /// Rotated panel texture
    Textured { texture: Arc<PanelTexture> },
}

impl Material {
    pub fn placeholder() -> Self {
        Material::Placeholder {
            color: PLACEHOLDER_COLOR,
        }
    }

    /// The unwrapped panels face inward, so every material renders the back
    /// side of its faces
    pub fn renders_back_side(&self) -> bool {
        true
    }

    pub fn texture(&self) -> Option<&Arc<PanelTexture>> {
        match self {
            Material::Textured { texture } => Some(texture),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Material::Placeholder { .. })
    }
}

/// Material array shown before any design is bound
pub fn blank_materials() -> Vec<Material> {
    vec![Material::Blank; total_panel_count()]
}

/// Recoverable problem found while binding a design
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindWarning {
    #[error("{shape} panel {panel} has invalid rotation {rotation}, using 0")]
    InvalidRotation {
        shape: ShapeType,
        panel: usize,
        rotation: f64,
    },
    #[error("No cached texture for {key} rotation {rotation}, using placeholder")]
    MissingTexture { key: PanelKey, rotation: usize },
}

/// Result of binding a design
#[derive(Debug, Clone)]
pub struct BoundMaterials {
    pub materials: Vec<Material>,
    pub warnings: Vec<BindWarning>,
}

/// Maps panel assignments to cached textures
pub struct MaterialBinder;

impl MaterialBinder {
    /// Build the material array for `design`
    ///
    /// Invalid rotations fall back to 0 and cache misses to the placeholder;
    /// each is reported once.
    pub fn bind_design(design: &Design, cache: &TextureCache) -> BoundMaterials {
        let mut materials = Vec::with_capacity(total_panel_count());
        let mut warnings = Vec::new();

        for shape in ShapeType::ALL {
            for (panel, assignment) in design.panels(shape).iter().enumerate() {
                let rotation = match assignment.rotation_for(shape) {
                    Some(rotation) => rotation,
                    None => {
                        let warning = BindWarning::InvalidRotation {
                            shape,
                            panel,
                            rotation: assignment.rotation,
                        };
                        tracing::warn!("Design \"{}\": {}", design.name, warning);
                        warnings.push(warning);
                        0
                    }
                };

                let key = PanelKey::new(shape, assignment.image_id.as_str());
                match cache.get(&key, rotation) {
                    Some(texture) => materials.push(Material::Textured {
                        texture: Arc::clone(texture),
                    }),
                    None => {
                        let warning = BindWarning::MissingTexture { key, rotation };
                        tracing::warn!("Design \"{}\": {}", design.name, warning);
                        warnings.push(warning);
                        materials.push(Material::placeholder());
                    }
                }
            }
        }

        BoundMaterials {
            materials,
            warnings,
        }
    }
}
