// SPDX-License-Identifier: MPL-2.0
//! Visibility observation over a horizontally scrolling viewport.
//!
//! [`ViewportObserver`] plays the role of the host's intersection
//! observation primitive: targets are registered with their horizontal
//! extents, the viewport window moves with the scroll offset, and change
//! notifications are queued whenever a target crosses the configured
//! threshold. The queue models batched asynchronous delivery; the caller
//! drains it with [`ViewportObserver::take_batch`] and feeds the batch to a
//! tracker.

use crate::document::NodeId;
use crate::tracker::VisibilityChange;

#[derive(Debug, Clone)]
struct Target {
    node: NodeId,
    left: f64,
    width: f64,
    /// Last reported side of the threshold.
    was_in_focus: bool,
}

/// Threshold-crossing observer for one scroll viewport.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    root: NodeId,
    viewport_width: f64,
    threshold: f64,
    offset: f64,
    targets: Vec<Target>,
    pending: Vec<VisibilityChange>,
}

impl ViewportObserver {
    /// Creates an observer scoped to `root`, with the viewport window
    /// initially at offset 0.
    pub fn new(root: NodeId, viewport_width: f64, threshold: f64) -> Self {
        Self {
            root,
            viewport_width,
            threshold,
            offset: 0.0,
            targets: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// The viewport element this observer is scoped to.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Registers a target by its horizontal extent within the scrolled
    /// content. An initial observation for the target is queued
    /// immediately, mirroring how observation APIs report each element
    /// once upon subscription.
    pub fn observe(&mut self, node: NodeId, left: f64, width: f64) {
        let ratio = self.ratio_at(left, width);
        let in_focus = ratio >= self.threshold;
        self.pending.push(VisibilityChange {
            target: node,
            is_intersecting: in_focus,
            intersection_ratio: ratio,
        });
        self.targets.push(Target {
            node,
            left,
            width,
            was_in_focus: in_focus,
        });
    }

    /// Moves the viewport window to `offset` and queues one notification
    /// for every target whose side of the threshold changed.
    pub fn scroll_to(&mut self, offset: f64) {
        self.offset = offset;
        let mut changes = Vec::new();
        for target in &mut self.targets {
            let ratio = intersection_ratio(
                offset,
                self.viewport_width,
                target.left,
                target.width,
            );
            let in_focus = ratio >= self.threshold;
            if in_focus != target.was_in_focus {
                target.was_in_focus = in_focus;
                changes.push(VisibilityChange {
                    target: target.node,
                    is_intersecting: in_focus,
                    intersection_ratio: ratio,
                });
            }
        }
        self.pending.extend(changes);
    }

    /// Drains queued notifications in delivery order.
    pub fn take_batch(&mut self) -> Vec<VisibilityChange> {
        std::mem::take(&mut self.pending)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    fn ratio_at(&self, left: f64, width: f64) -> f64 {
        intersection_ratio(self.offset, self.viewport_width, left, width)
    }
}

/// Fraction of `[left, left + width)` visible within the viewport window
/// `[offset, offset + viewport_width)`. Zero-width targets report 0.
fn intersection_ratio(offset: f64, viewport_width: f64, left: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    let visible_left = left.max(offset);
    let visible_right = (left + width).min(offset + viewport_width);
    let overlap = (visible_right - visible_left).max(0.0);
    overlap / width
}
