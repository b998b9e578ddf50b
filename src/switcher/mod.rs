//! Design switching
//!
//! Owns the catalog, the texture synthesizer and the current material array.
//! A switch makes sure every panel image of the target design is synthesized,
//! then rebinds all materials at once.

pub mod queue;

pub use queue::{switch_queue, SwitchQueue, SwitchRequest, SwitchRequester};

use thiserror::Error;

use crate::catalog::DesignCatalog;
use crate::material::{blank_materials, BindWarning, Material, MaterialBinder};
use crate::texture::{ImageSource, SynthesisError, TextureSynthesizer};
use crate::viewer::{DesignDisplay, ViewerObserver};

#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("Design index {index} out of range ({count} designs)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Failed to load textures for design \"{design}\": {source}")]
    Synthesis {
        design: String,
        #[source]
        source: SynthesisError,
    },
}

/// `(current + delta) mod count` with Euclidean remainder
pub fn wrap_design_index(current: usize, delta: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (current as i128 + delta as i128).rem_euclid(count as i128) as usize
}

/// Viewer state across design switches
pub struct DesignSwitcher<S, O> {
    catalog: DesignCatalog,
    synthesizer: TextureSynthesizer<S>,
    observer: O,
    materials: Vec<Material>,
    warnings: Vec<BindWarning>,
    current: Option<usize>,
    busy: bool,
    name_limit: usize,
}

impl<S: ImageSource, O: ViewerObserver> DesignSwitcher<S, O> {
    pub fn new(
        catalog: DesignCatalog,
        synthesizer: TextureSynthesizer<S>,
        observer: O,
        name_limit: usize,
    ) -> Self {
        Self {
            catalog,
            synthesizer,
            observer,
            materials: blank_materials(),
            warnings: Vec::new(),
            current: None,
            busy: false,
            name_limit,
        }
    }

    pub fn catalog(&self) -> &DesignCatalog {
        &self.catalog
    }

    pub fn synthesizer(&self) -> &TextureSynthesizer<S> {
        &self.synthesizer
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Material array parallel to the geometry groups
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Warnings from the last bind
    pub fn bind_warnings(&self) -> &[BindWarning] {
        &self.warnings
    }

    /// Index of the design on screen, if any
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Show the design at `index`
    ///
    /// On failure the previous design stays bound and the error is reported to
    /// the observer as well as returned.
    pub async fn select_design(&mut self, index: usize) -> Result<(), SwitchError> {
        match self.prepare(index).await {
            Ok(()) => {
                self.commit(index);
                Ok(())
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Step through the catalog by `delta`, wrapping at both ends
    pub async fn change_soccer_ball(&mut self, delta: i64) -> Result<(), SwitchError> {
        let index = wrap_design_index(self.current.unwrap_or(0), delta, self.catalog.len());
        self.select_design(index).await
    }

    /// Synthesize every panel image the design needs
    async fn prepare(&mut self, index: usize) -> Result<(), SwitchError> {
        let design = self
            .catalog
            .get(index)
            .ok_or(SwitchError::IndexOutOfRange {
                index,
                count: self.catalog.len(),
            })?;

        let missing = self.synthesizer.cache().missing(&design.required_panels());
        if missing.is_empty() {
            return Ok(());
        }

        let name = design.name.clone();
        tracing::info!("Loading {} panel image(s) for design \"{}\"", missing.len(), name);
        self.set_busy(true);
        self.synthesizer
            .ensure_textures_loaded(&missing)
            .await
            .map(|_| ())
            .map_err(|source| SwitchError::Synthesis { design: name, source })
    }

    /// Bind the design's materials and notify the viewer
    fn commit(&mut self, index: usize) {
        let Some(design) = self.catalog.get(index) else {
            return;
        };
        let bound = MaterialBinder::bind_design(design, self.synthesizer.cache());
        let display = DesignDisplay {
            index,
            name: design.display_name(self.name_limit),
            show_navigation: self.catalog.has_navigation(),
        };
        tracing::debug!("Bound design {} \"{}\"", index, design.name);

        self.materials = bound.materials;
        self.warnings = bound.warnings;
        self.current = Some(index);
        self.observer.design_displayed(&display, &self.materials);
        self.set_busy(false);
    }

    fn fail(&mut self, err: &SwitchError) {
        tracing::error!("{}", err);
        self.set_busy(false);
        self.observer.switch_failed(err);
    }

    fn set_busy(&mut self, busy: bool) {
        if self.busy != busy {
            self.busy = busy;
            self.observer.busy_changed(busy);
        }
    }
}
