//! Shared soccer ball mesh and its per-panel groups
//!
//! Vertex data comes from the data document. The only logic here is the
//! partition into groups, whose order is the contract with the material array.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use thiserror::Error;

use crate::catalog::{ObjectData, ShapeType};

/// Vertex indices highlighted by the debug overlay to check texture mapping
pub const DEBUG_MARKER_VERTICES: [usize; 6] = [0, 15, 50, 79, 142, 160];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Position array length {0} is not a multiple of 3")]
    RaggedPositions(usize),
    #[error("Mesh has {found} vertices but the panels need {expected}")]
    VertexCountMismatch { expected: usize, found: usize },
    #[error("UV array length {uv_len} does not match {vertex_count} vertices")]
    UvMismatch { uv_len: usize, vertex_count: usize },
}

/// Vertex for the soccer ball mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PanelVertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Texture coordinates within the panel texture
    pub uv: [f32; 2],
    /// Flat face normal
    pub normal: [f32; 3],
}

impl PanelVertex {
    /// Size of vertex in bytes
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

/// Contiguous index range rendered with one material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryGroup {
    /// First index in the shared buffer
    pub start: u32,
    /// Number of indices
    pub count: u32,
    /// Slot in the material array
    pub material_index: usize,
    pub shape: ShapeType,
    /// Panel index within its shape
    pub panel: usize,
}

/// Combined, non-indexed mesh for the whole ball
pub struct PanelMesh {
    pub vertices: Vec<PanelVertex>,
    pub groups: Vec<GeometryGroup>,
}

impl PanelMesh {
    /// Build the shared buffer from the document arrays and partition it into groups
    pub fn build(object: &ObjectData) -> Result<Self, GeometryError> {
        let groups = Self::partition();
        let expected = groups
            .last()
            .map(|g| (g.start + g.count) as usize)
            .unwrap_or(0);

        if object.positions.len() % 3 != 0 {
            return Err(GeometryError::RaggedPositions(object.positions.len()));
        }
        let vertex_count = object.positions.len() / 3;
        if vertex_count != expected {
            return Err(GeometryError::VertexCountMismatch {
                expected,
                found: vertex_count,
            });
        }

        // UVs are normally pairs, but some exports pad them to triples
        let uv_stride = if object.uvs.len() == vertex_count * 2 {
            2
        } else if object.uvs.len() == vertex_count * 3 {
            3
        } else {
            return Err(GeometryError::UvMismatch {
                uv_len: object.uvs.len(),
                vertex_count,
            });
        };

        let mut vertices: Vec<PanelVertex> = object
            .positions
            .chunks_exact(3)
            .zip(object.uvs.chunks_exact(uv_stride))
            .map(|(p, uv)| PanelVertex {
                position: [p[0], p[1], p[2]],
                uv: [uv[0], uv[1]],
                normal: [0.0; 3],
            })
            .collect();
        compute_flat_normals(&mut vertices);

        tracing::debug!(
            "Built panel mesh: {} vertices, {} groups",
            vertices.len(),
            groups.len()
        );

        Ok(Self { vertices, groups })
    }

    /// Group layout: shapes in catalog order, panels in order within each shape
    pub fn partition() -> Vec<GeometryGroup> {
        let mut groups = Vec::new();
        let mut start = 0u32;
        for shape in ShapeType::ALL {
            let descriptor = shape.descriptor();
            let count = descriptor.indices_per_panel() as u32;
            for panel in 0..descriptor.panel_count {
                groups.push(GeometryGroup {
                    start,
                    count,
                    material_index: groups.len(),
                    shape,
                    panel,
                });
                start += count;
            }
        }
        groups
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Raw vertex bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Positions of the debug marker vertices that exist in this mesh
    pub fn debug_markers(&self) -> Vec<Vec3> {
        DEBUG_MARKER_VERTICES
            .iter()
            .filter_map(|&i| self.vertices.get(i))
            .map(|v| Vec3::from_array(v.position))
            .collect()
    }
}

fn compute_flat_normals(vertices: &mut [PanelVertex]) {
    for triangle in vertices.chunks_exact_mut(3) {
        let a = Vec3::from_array(triangle[0].position);
        let b = Vec3::from_array(triangle[1].position);
        let c = Vec3::from_array(triangle[2].position);
        let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
        for vertex in triangle {
            vertex.normal = normal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::total_panel_count;
    use crate::test_support::{object_data, TOTAL_VERTICES};

    #[test]
    fn test_group_order_and_ranges() {
        let groups = PanelMesh::partition();
        assert_eq!(groups.len(), total_panel_count());

        assert_eq!(groups[0].shape, ShapeType::Hexagon);
        assert_eq!(groups[0].start, 0);
        assert_eq!(groups[0].count, 162);
        assert_eq!(groups[19].panel, 19);
        assert_eq!(groups[20].shape, ShapeType::Pentagon);
        assert_eq!(groups[20].panel, 0);
        assert_eq!(groups[20].start, 20 * 162);
        assert_eq!(groups[31].count, 135);

        for (i, pair) in groups.windows(2).enumerate() {
            assert_eq!(pair[0].start + pair[0].count, pair[1].start);
            assert_eq!(pair[0].material_index, i);
        }
    }

    #[test]
    fn test_build_with_uv_pairs() {
        let mesh = PanelMesh::build(&object_data(2)).unwrap();
        assert_eq!(mesh.vertex_count(), TOTAL_VERTICES);
        assert_eq!(mesh.group_count(), 32);
        assert_eq!(mesh.vertex_bytes().len() as u64, TOTAL_VERTICES as u64 * PanelVertex::SIZE);
        assert_eq!(mesh.debug_markers().len(), DEBUG_MARKER_VERTICES.len());
    }

    #[test]
    fn test_build_with_padded_uvs() {
        let object = object_data(3);
        let mesh = PanelMesh::build(&object).unwrap();
        assert_eq!(mesh.vertices[1].uv, [object.uvs[3], object.uvs[4]]);
    }

    #[test]
    fn test_vertex_count_mismatch() {
        let mut object = object_data(2);
        object.positions.truncate(object.positions.len() - 3);
        object.uvs.truncate(object.uvs.len() - 2);
        assert_eq!(
            PanelMesh::build(&object).err(),
            Some(GeometryError::VertexCountMismatch {
                expected: TOTAL_VERTICES,
                found: TOTAL_VERTICES - 1,
            })
        );
    }

    #[test]
    fn test_uv_mismatch() {
        let mut object = object_data(2);
        object.uvs.pop();
        assert!(matches!(
            PanelMesh::build(&object),
            Err(GeometryError::UvMismatch { .. })
        ));
    }

    #[test]
    fn test_flat_normals() {
        let vertex = |position: [f32; 3]| PanelVertex {
            position,
            uv: [0.0; 2],
            normal: [0.0; 3],
        };
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([1.0, 0.0, 0.0]),
            vertex([0.0, 1.0, 0.0]),
        ];
        compute_flat_normals(&mut vertices);
        for vertex in &vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }
}
