//! Settings management for the soccer ball viewer
//!
//! Handles loading of the JSON viewer settings file. Every field has a default so
//! a partial (or missing) file still yields a working configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "viewer.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How panel textures are decorated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewerMode {
    /// Plain rotated panel images
    Default,
    /// Rotated panels with the shape's stitch overlay
    #[default]
    Stitch,
    /// Stitch overlay plus rotation/side labels, and the debug design is kept
    Debug,
}

impl ViewerMode {
    /// Whether stitch overlays are composited
    pub fn uses_stitches(&self) -> bool {
        !matches!(self, ViewerMode::Default)
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, ViewerMode::Debug)
    }
}

/// Camera and framing constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Camera start distance
    #[serde(rename = "startDistance", default = "default_start_distance")]
    pub start_distance: f32,
    /// Near plane for the perspective camera
    #[serde(rename = "nearPlane", default = "default_near_plane")]
    pub near_plane: f32,
    /// Far plane for the perspective camera
    #[serde(rename = "farPlane", default = "default_far_plane")]
    pub far_plane: f32,
    /// Closest zoom distance
    #[serde(rename = "minDistance", default = "default_min_distance")]
    pub min_distance: f32,
    /// Farthest zoom distance
    #[serde(rename = "maxDistance", default = "default_max_distance")]
    pub max_distance: f32,
    /// Rotate speed at normal distances
    #[serde(rename = "rotateSpeed", default = "default_rotate_speed")]
    pub rotate_speed: f32,
    #[serde(rename = "zoomSpeed", default = "default_zoom_speed")]
    pub zoom_speed: f32,
    /// Soccer ball diameter in world units
    #[serde(rename = "ballDiameter", default = "default_ball_diameter")]
    pub ball_diameter: f32,
    /// Margin between ball and viewport border, leaving room for name and buttons
    #[serde(rename = "marginPercentage", default = "default_margin_percentage")]
    pub margin_percentage: f32,
    /// Extra padding between ball and viewport border
    #[serde(rename = "paddingPercentage", default = "default_padding_percentage")]
    pub padding_percentage: f32,
}

fn default_start_distance() -> f32 {
    5.0
}

fn default_near_plane() -> f32 {
    1.0
}

fn default_far_plane() -> f32 {
    10.0
}

fn default_min_distance() -> f32 {
    2.0
}

fn default_max_distance() -> f32 {
    8.0
}

fn default_rotate_speed() -> f32 {
    2.0
}

fn default_zoom_speed() -> f32 {
    0.8
}

fn default_ball_diameter() -> f32 {
    2.0
}

fn default_margin_percentage() -> f32 {
    10.0
}

fn default_padding_percentage() -> f32 {
    2.0
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            start_distance: default_start_distance(),
            near_plane: default_near_plane(),
            far_plane: default_far_plane(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            rotate_speed: default_rotate_speed(),
            zoom_speed: default_zoom_speed(),
            ball_diameter: default_ball_diameter(),
            margin_percentage: default_margin_percentage(),
            padding_percentage: default_padding_percentage(),
        }
    }
}

/// Viewer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(rename = "mode", default)]
    pub mode: ViewerMode,

    /// Path of the soccer ball data document
    #[serde(rename = "catalogPath", default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Root folder containing `panels/` and `templates/`
    #[serde(rename = "assetRoot", default = "default_asset_root")]
    pub asset_root: PathBuf,

    /// Maximum characters of a design name shown in the viewer
    #[serde(rename = "nameCharacterLimit", default = "default_name_character_limit")]
    pub name_character_limit: usize,

    #[serde(rename = "camera", default)]
    pub camera: CameraSettings,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/soccer-balls.json")
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("images/textures")
}

fn default_name_character_limit() -> usize {
    16
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            mode: ViewerMode::default(),
            catalog_path: default_catalog_path(),
            asset_root: default_asset_root(),
            name_character_limit: default_name_character_limit(),
            camera: CameraSettings::default(),
        }
    }
}

impl ViewerSettings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        tracing::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load settings if the file exists, falling back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No settings at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}
