// SPDX-License-Identifier: MPL-2.0
//! Maps visibility-change notifications onto indicator activation.
//!
//! One tracker per gallery. Notifications arrive in batches from an
//! observation source (see [`crate::observer`]); the tracker activates the
//! indicator of whichever item most recently crossed the focus threshold.

use crate::document::NodeId;
use crate::gallery::Gallery;
use log::debug;

/// Fraction of an item that must be visible before it counts as in focus.
/// The comparison is inclusive: a ratio of exactly 0.6 activates.
pub const FOCUS_RATIO: f64 = 0.6;

/// One visibility notification for one observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityChange {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

/// Per-gallery visibility state machine.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    gallery: Gallery,
}

impl VisibilityTracker {
    pub fn new(gallery: Gallery) -> Self {
        Self { gallery }
    }

    /// Processes one batch of notifications, strictly in delivery order.
    pub fn handle_batch(&mut self, batch: &[VisibilityChange]) {
        for change in batch {
            self.handle_change(change);
        }
    }

    /// Processes a single notification.
    ///
    /// The ratio is checked even when `is_intersecting` is set: some
    /// observation implementations report a transient intersection with
    /// ratio 0 during initial layout, which must not move the indicator.
    /// Notifications for elements the gallery does not track are ignored.
    pub fn handle_change(&mut self, change: &VisibilityChange) {
        if !change.is_intersecting || change.intersection_ratio < FOCUS_RATIO {
            return;
        }
        match self.gallery.item_index(change.target) {
            Some(index) => self.gallery.activate(index),
            None => debug!(
                "visibility change for untracked element {:?} (ratio {:.2})",
                change.target, change.intersection_ratio
            ),
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn active_index(&self) -> Option<usize> {
        self.gallery.active_index()
    }
}
