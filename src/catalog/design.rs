//! Soccer ball designs
//!
//! A design assigns a base panel image and a rotation to every physical panel.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::shape::ShapeType;
use crate::settings::ViewerMode;

/// Name of the design that only exists for debugging panel orientation
const DEBUG_DESIGN_NAME: &str = "debug";

/// Errors raised while loading or validating the design catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Design \"{design}\" has {found} {shape} panels, expected {expected}")]
    PanelCountMismatch {
        design: String,
        shape: ShapeType,
        expected: usize,
        found: usize,
    },
    #[error("Design \"{design}\" has an empty image id for {shape} panel {panel}")]
    EmptyImageId {
        design: String,
        shape: ShapeType,
        panel: usize,
    },
    #[error("Catalog contains no displayable designs")]
    NoDesigns,
}

/// Image and rotation for a single panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelAssignment {
    /// Base panel image id
    #[serde(rename = "t")]
    pub image_id: String,
    /// Rotation index, valid in `[0, side_count)`
    ///
    /// Any JSON number is accepted so negative, huge or fractional values
    /// survive parsing and can be clamped when materials are bound.
    #[serde(rename = "r")]
    pub rotation: f64,
}

impl PanelAssignment {
    pub fn new(image_id: impl Into<String>, rotation: impl Into<f64>) -> Self {
        Self {
            image_id: image_id.into(),
            rotation: rotation.into(),
        }
    }

    /// Rotation as an index if it is a whole number in `[0, side_count)`
    pub fn rotation_for(&self, shape: ShapeType) -> Option<usize> {
        let rotation = self.rotation;
        if rotation.fract() == 0.0 && rotation >= 0.0 && rotation < shape.side_count() as f64 {
            Some(rotation as usize)
        } else {
            None
        }
    }
}

/// Identity of a synthesized texture sequence
///
/// An image id is qualified by its shape because the bitmap itself carries no
/// shape metadata and the panel folders are per shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelKey {
    pub shape: ShapeType,
    pub image_id: String,
}

impl PanelKey {
    pub fn new(shape: ShapeType, image_id: impl Into<String>) -> Self {
        Self {
            shape,
            image_id: image_id.into(),
        }
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.image_id, self.shape)
    }
}

/// A named assignment for every panel of the ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    pub name: String,
    pub hexagon: Vec<PanelAssignment>,
    pub pentagon: Vec<PanelAssignment>,
}

impl Design {
    /// Panel assignments of one shape, in panel order
    pub fn panels(&self, shape: ShapeType) -> &[PanelAssignment] {
        match shape {
            ShapeType::Hexagon => &self.hexagon,
            ShapeType::Pentagon => &self.pentagon,
        }
    }

    /// Whether this is the orientation debugging design
    pub fn is_debug(&self) -> bool {
        self.name.eq_ignore_ascii_case(DEBUG_DESIGN_NAME)
    }

    /// Distinct panel images referenced by this design, in first-use order
    pub fn required_panels(&self) -> Vec<PanelKey> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for shape in ShapeType::ALL {
            for panel in self.panels(shape) {
                let key = PanelKey::new(shape, panel.image_id.as_str());
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Name cut to at most `limit` characters for display
    pub fn display_name(&self, limit: usize) -> String {
        self.name.chars().take(limit).collect()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for shape in ShapeType::ALL {
            let panels = self.panels(shape);
            let expected = shape.descriptor().panel_count;
            if panels.len() != expected {
                return Err(CatalogError::PanelCountMismatch {
                    design: self.name.clone(),
                    shape,
                    expected,
                    found: panels.len(),
                });
            }
            if let Some(panel) = panels.iter().position(|p| p.image_id.trim().is_empty()) {
                return Err(CatalogError::EmptyImageId {
                    design: self.name.clone(),
                    shape,
                    panel,
                });
            }
        }
        Ok(())
    }
}

/// Validated, read-only list of designs
#[derive(Debug, Clone)]
pub struct DesignCatalog {
    designs: Vec<Design>,
}

impl DesignCatalog {
    /// Drop the debug design outside debug mode, then validate what remains
    pub fn new(designs: Vec<Design>, mode: ViewerMode) -> Result<Self, CatalogError> {
        let before = designs.len();
        let designs: Vec<Design> = designs
            .into_iter()
            .filter(|design| mode.is_debug() || !design.is_debug())
            .collect();
        if designs.len() != before {
            tracing::debug!("Removed debug design from catalog (mode={:?})", mode);
        }

        for design in &designs {
            design.validate()?;
        }

        if designs.is_empty() {
            return Err(CatalogError::NoDesigns);
        }

        Ok(Self { designs })
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Design> {
        self.designs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Design> {
        self.designs.iter()
    }

    /// Whether the previous/next navigation should be shown
    pub fn has_navigation(&self) -> bool {
        self.designs.len() > 1
    }
}
