//! Static soccer ball data document
//!
//! One JSON file carries the mesh (flat positions and UVs) and the designs.

use serde::Deserialize;
use std::path::Path;

use super::design::{CatalogError, Design, DesignCatalog};
use crate::settings::ViewerMode;

/// Flat mesh attribute arrays as stored in the document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectData {
    /// Vertex positions, 3 floats per vertex
    #[serde(rename = "v")]
    pub positions: Vec<f32>,
    /// Texture coordinates, 2 or 3 floats per vertex
    #[serde(rename = "uv")]
    pub uvs: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    object: ObjectData,
    designs: Vec<Design>,
}

/// Parsed and validated contents of the data document
#[derive(Debug, Clone)]
pub struct SoccerBallData {
    pub object: ObjectData,
    pub catalog: DesignCatalog,
}

impl SoccerBallData {
    /// Parse and validate a document
    pub fn parse(json: &str, mode: ViewerMode) -> Result<Self, CatalogError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let catalog = DesignCatalog::new(raw.designs, mode)?;
        Ok(Self {
            object: raw.object,
            catalog,
        })
    }

    /// Fetch the document once at startup
    pub async fn fetch(path: &Path, mode: ViewerMode) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let data = Self::parse(&json, mode)?;
        tracing::info!(
            "Loaded {} designs and {} vertices from {:?}",
            data.catalog.len(),
            data.object.positions.len() / 3,
            path
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{BindWarning, MaterialBinder};
    use crate::test_support::{catalog_json, uniform_design};
    use crate::texture::TextureCache;

    #[test]
    fn test_parse_document() {
        let json = catalog_json(&[uniform_design("Classic", "white", "black")]);
        let data = SoccerBallData::parse(&json, ViewerMode::Stitch).unwrap();
        assert_eq!(data.catalog.len(), 1);
        assert_eq!(data.catalog.get(0).unwrap().hexagon[0].image_id, "white");
        assert_eq!(data.object.positions.len() % 3, 0);
    }

    #[test]
    fn test_missing_shape_key_fails_fast() {
        let json = r#"{"object":{"v":[],"uv":[]},"designs":[{"name":"x","hexagon":[]}]}"#;
        let err = SoccerBallData::parse(json, ViewerMode::Stitch).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_non_numeric_rotation_fails_fast() {
        let json = r#"{"object":{"v":[],"uv":[]},
            "designs":[{"name":"x","hexagon":[{"t":"a","r":"two"}],"pentagon":[]}]}"#;
        assert!(matches!(
            SoccerBallData::parse(json, ViewerMode::Stitch),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_unusable_rotation_numbers_load_and_clamp() {
        let json = catalog_json(&[uniform_design("Classic", "white", "black")]);
        let huge = json.replacen("\"r\":0.0", "\"r\":99999999999999999999", 1);
        let fractional = json.replacen("\"r\":0.0", "\"r\":1.5", 1);
        assert_ne!(huge, json);
        assert_ne!(fractional, json);

        for json in [huge, fractional] {
            let data = SoccerBallData::parse(&json, ViewerMode::Stitch).unwrap();
            let design = data.catalog.get(0).unwrap();
            let bound = MaterialBinder::bind_design(design, &TextureCache::new());
            let invalid = bound
                .warnings
                .iter()
                .filter(|w| matches!(w, BindWarning::InvalidRotation { .. }))
                .count();
            assert_eq!(invalid, 1);
        }
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let err = SoccerBallData::fetch(Path::new("does/not/exist.json"), ViewerMode::Stitch)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
