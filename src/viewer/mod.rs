//! Viewer shell seam
//!
//! The presentation layer (window, controls, buttons) stays outside the core.
//! It receives updates through [`ViewerObserver`] and frames the ball with
//! [`ViewerCamera`].

pub mod camera;

pub use camera::ViewerCamera;

use crate::material::Material;
use crate::switcher::SwitchError;

/// What the shell shows for the current design
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignDisplay {
    pub index: usize,
    /// Design name cut to the configured character limit
    pub name: String,
    /// Previous/next buttons are hidden when there is only one design
    pub show_navigation: bool,
}

/// Receives state changes from the design switcher
///
/// All methods default to doing nothing.
pub trait ViewerObserver {
    /// Loading indicator on or off
    fn busy_changed(&mut self, _busy: bool) {}

    /// A design was bound; `materials` is parallel to the geometry groups
    fn design_displayed(&mut self, _display: &DesignDisplay, _materials: &[Material]) {}

    /// A switch was aborted and the previous design stays on screen
    fn switch_failed(&mut self, _error: &SwitchError) {}
}

impl ViewerObserver for () {}

/// Observer for headless runs that only logs
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl ViewerObserver for LoggingObserver {
    fn busy_changed(&mut self, busy: bool) {
        tracing::debug!("Busy: {}", busy);
    }

    fn design_displayed(&mut self, shown: &DesignDisplay, materials: &[Material]) {
        let placeholders = materials.iter().filter(|m| m.is_placeholder()).count();
        let navigation = if shown.show_navigation { "shown" } else { "hidden" };
        tracing::info!(
            "Showing design {} \"{}\" ({} materials, {} placeholders, navigation {})",
            shown.index,
            shown.name,
            materials.len(),
            placeholders,
            navigation
        );
    }

    fn switch_failed(&mut self, error: &SwitchError) {
        tracing::warn!("Design switch failed: {}", error);
    }
}
