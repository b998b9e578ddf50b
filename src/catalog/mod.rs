//! Shape and design catalogs
//!
//! Static panel shape descriptions plus the design list parsed from the data document.

pub mod design;
pub mod document;
pub mod shape;

pub use design::{CatalogError, Design, DesignCatalog, PanelAssignment, PanelKey};
pub use document::{ObjectData, SoccerBallData};
pub use shape::{total_panel_count, ShapeDescriptor, ShapeType};
