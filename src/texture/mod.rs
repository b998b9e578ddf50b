//! Panel texture synthesis pipeline
//!
//! Loads base panel images and stitch overlays, renders a rotated texture for
//! every rotation of a panel's shape and caches the results by image identity.

pub mod cache;
pub mod debug_label;
pub mod loader;
pub mod rotate;
pub mod synth;

pub use cache::{PanelTexture, TextureCache};
pub use loader::{AssetPaths, FsImageSource, ImageSource, LoadError};
pub use synth::{LoadFailure, SynthesisError, TextureSynthesizer};
