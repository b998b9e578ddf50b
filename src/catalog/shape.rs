//! Panel shapes of the soccer ball
//!
//! The ball is a truncated icosahedron: 20 hexagonal and 12 pentagonal panels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Panel shape type
///
/// Declaration order is the catalog order used by both the geometry groups
/// and the material array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Hexagon,
    Pentagon,
}

impl ShapeType {
    /// All shapes in catalog order
    pub const ALL: [ShapeType; 2] = [ShapeType::Hexagon, ShapeType::Pentagon];

    /// Name used in catalog keys and asset paths
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Hexagon => "hexagon",
            ShapeType::Pentagon => "pentagon",
        }
    }

    /// Static descriptor for this shape
    pub fn descriptor(&self) -> &'static ShapeDescriptor {
        match self {
            ShapeType::Hexagon => &HEXAGON,
            ShapeType::Pentagon => &PENTAGON,
        }
    }

    /// Number of sides (and therefore valid rotations)
    pub fn side_count(&self) -> usize {
        self.descriptor().side_count
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one panel shape
#[derive(Debug)]
pub struct ShapeDescriptor {
    /// Which shape this describes
    pub shape: ShapeType,
    /// Physical panels of this shape on the ball
    pub panel_count: usize,
    /// Triangles in the mesh for a single panel
    pub triangles_per_panel: usize,
    /// Number of sides
    pub side_count: usize,
    /// Debug label position (normalized u, v) for each side slot
    pub label_coordinates: &'static [[f32; 2]],
}

impl ShapeDescriptor {
    /// Indices contributed to the shared buffer by one panel
    pub fn indices_per_panel(&self) -> usize {
        self.triangles_per_panel * 3
    }

    /// Rotation step in degrees
    pub fn rotation_step_degrees(&self) -> f32 {
        360.0 / self.side_count as f32
    }
}

static HEXAGON: ShapeDescriptor = ShapeDescriptor {
    shape: ShapeType::Hexagon,
    panel_count: 20,
    triangles_per_panel: 54,
    side_count: 6,
    label_coordinates: &[
        [0.5, 0.788675135],
        [0.75, 0.644337567],
        [0.75, 0.355662433],
        [0.5, 0.211324865],
        [0.25, 0.355662433],
        [0.25, 0.644337567],
    ],
};

static PENTAGON: ShapeDescriptor = ShapeDescriptor {
    shape: ShapeType::Pentagon,
    panel_count: 12,
    triangles_per_panel: 45,
    side_count: 5,
    label_coordinates: &[
        [0.5, 0.729396987],
        [0.718169499, 0.570887567],
        [0.634836166, 0.314413939],
        [0.365163834, 0.314413939],
        [0.281830501, 0.570887567],
    ],
};

/// Total number of physical panels (and geometry groups)
pub fn total_panel_count() -> usize {
    ShapeType::ALL
        .iter()
        .map(|shape| shape.descriptor().panel_count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_coordinates_match_side_count() {
        for shape in ShapeType::ALL {
            let descriptor = shape.descriptor();
            assert_eq!(descriptor.label_coordinates.len(), descriptor.side_count);
            assert_eq!(descriptor.shape, shape);
        }
    }

    #[test]
    fn test_truncated_icosahedron_counts() {
        assert_eq!(ShapeType::Hexagon.side_count(), 6);
        assert_eq!(ShapeType::Pentagon.side_count(), 5);
        assert_eq!(total_panel_count(), 32);
        assert_eq!(ShapeType::Hexagon.descriptor().indices_per_panel(), 162);
        assert_eq!(ShapeType::Pentagon.descriptor().indices_per_panel(), 135);
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(ShapeType::Hexagon.to_string(), "hexagon");
        assert_eq!(ShapeType::Pentagon.as_str(), "pentagon");
        assert!((ShapeType::Pentagon.descriptor().rotation_step_degrees() - 72.0).abs() < 1e-6);
    }
}
