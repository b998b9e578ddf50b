//! Soccer Ball Viewer Library
//!
//! Panel texture synthesis and design switching for a ball assembled from
//! hexagonal and pentagonal panels. Every panel shows a shared base image at
//! one of its shape's rotations, optionally with stitches and debug labels.

pub mod catalog;
pub mod geometry;
pub mod material;
pub mod settings;
pub mod switcher;
pub mod telemetry;
pub mod texture;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{Design, DesignCatalog, PanelAssignment, PanelKey, ShapeType, SoccerBallData};
pub use geometry::PanelMesh;
pub use material::{Material, MaterialBinder};
pub use settings::{ViewerMode, ViewerSettings};
pub use switcher::{DesignSwitcher, SwitchError};
pub use texture::{FsImageSource, ImageSource, TextureSynthesizer};
pub use viewer::{DesignDisplay, ViewerCamera, ViewerObserver};
