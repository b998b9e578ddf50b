//! Soccer ball geometry
//!
//! Builds the shared vertex buffer once and splits it into one group per panel.

pub mod mesh;

pub use mesh::{GeometryError, GeometryGroup, PanelMesh, PanelVertex, DEBUG_MARKER_VERTICES};
