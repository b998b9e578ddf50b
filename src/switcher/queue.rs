//! Single-slot switch request queue
//!
//! UI triggers write the latest requested design into a watch channel. The
//! driver processes one switch at a time; when a newer request arrives while a
//! switch is loading, the stale switch still fills the cache but never binds.

use tokio::sync::watch;

use super::{wrap_design_index, DesignSwitcher};
use crate::texture::ImageSource;
use crate::viewer::ViewerObserver;

/// Latest requested design
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchRequest {
    pub index: usize,
    /// Bumped on every request, including repeats of the same index
    pub generation: u64,
}

/// Sending side, held by whatever handles the previous/next buttons
pub struct SwitchRequester {
    tx: watch::Sender<SwitchRequest>,
    design_count: usize,
}

/// Receiving side, consumed by [`SwitchQueue::run`]
pub struct SwitchQueue {
    rx: watch::Receiver<SwitchRequest>,
}

/// Create a queue whose starting point is the design already on screen
pub fn switch_queue(initial: usize, design_count: usize) -> (SwitchRequester, SwitchQueue) {
    let (tx, rx) = watch::channel(SwitchRequest {
        index: initial,
        generation: 0,
    });
    (SwitchRequester { tx, design_count }, SwitchQueue { rx })
}

impl SwitchRequester {
    /// Request a specific design, replacing any pending request
    pub fn request(&self, index: usize) {
        self.tx.send_modify(|slot| {
            slot.index = index;
            slot.generation += 1;
        });
    }

    /// Request the design `delta` steps away from the latest request
    pub fn step(&self, delta: i64) {
        let count = self.design_count;
        self.tx.send_modify(|slot| {
            slot.index = wrap_design_index(slot.index, delta, count);
            slot.generation += 1;
        });
    }

    /// Latest requested design
    pub fn latest(&self) -> SwitchRequest {
        *self.tx.borrow()
    }
}

impl SwitchQueue {
    /// Process requests until every requester is dropped
    ///
    /// Returns the number of switches that were bound.
    pub async fn run<S: ImageSource, O: ViewerObserver>(
        mut self,
        switcher: &mut DesignSwitcher<S, O>,
    ) -> usize {
        let mut committed = 0;
        while self.rx.changed().await.is_ok() {
            let request = *self.rx.borrow_and_update();
            tracing::debug!(
                "Switching to design {} (request {})",
                request.index,
                request.generation
            );

            let result = switcher.prepare(request.index).await;

            let latest = self.rx.borrow().generation;
            if latest != request.generation {
                match result {
                    Ok(()) => tracing::debug!(
                        "Request {} superseded by {}, not binding",
                        request.generation,
                        latest
                    ),
                    Err(err) => tracing::warn!(
                        "Request {} superseded by {} after failing: {}",
                        request.generation,
                        latest,
                        err
                    ),
                }
                continue;
            }

            match result {
                Ok(()) => {
                    switcher.commit(request.index);
                    committed += 1;
                }
                Err(err) => switcher.fail(&err),
            }
        }
        tracing::debug!("Switch queue closed");
        committed
    }
}
