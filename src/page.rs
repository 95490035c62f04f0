// SPDX-License-Identifier: MPL-2.0
//! Once-per-page wiring of galleries, observers, and trackers.
//!
//! [`GalleryPage::init`] is the explicit initialization routine performed
//! at page load: it scans the document for galleries, subscribes every
//! item of each gallery to an observer scoped to that gallery's viewport,
//! and delivers the initial observation batch. After that, galleries live
//! for the page's lifetime and only scrolling moves their indicators.

use crate::error::{Error, Result};
use crate::gallery::Gallery;
use crate::observer::ViewportObserver;
use crate::tracker::{VisibilityTracker, FOCUS_RATIO};
use crate::document::Document;
use log::debug;

/// Measured geometry of one gallery: the viewport width and each item's
/// `(left, width)` extent within the scrolled content, index-aligned with
/// the gallery's item sequence.
#[derive(Debug, Clone)]
pub struct GalleryLayout {
    pub viewport_width: f64,
    pub item_extents: Vec<(f64, f64)>,
}

#[derive(Debug)]
struct GalleryBinding {
    tracker: VisibilityTracker,
    observer: ViewportObserver,
}

/// All galleries found on a page, each with its own observer and tracker.
#[derive(Debug)]
pub struct GalleryPage {
    galleries: Vec<GalleryBinding>,
}

impl GalleryPage {
    /// Scans `doc` for galleries and binds one observer and one tracker to
    /// each, using the corresponding layout from `layouts` (same order as
    /// the scan). Fails when the layouts do not match the scanned
    /// galleries.
    pub fn init(doc: &Document, layouts: &[GalleryLayout]) -> Result<Self> {
        let scanned = Gallery::scan(doc)?;
        if scanned.len() != layouts.len() {
            return Err(Error::Page(format!(
                "page has {} galleries but {} layouts were provided",
                scanned.len(),
                layouts.len()
            )));
        }
        let mut galleries = Vec::with_capacity(scanned.len());
        for (gallery, layout) in scanned.into_iter().zip(layouts) {
            if layout.item_extents.len() != gallery.len() {
                return Err(Error::Page(format!(
                    "gallery has {} items but layout describes {}",
                    gallery.len(),
                    layout.item_extents.len()
                )));
            }
            let mut observer =
                ViewportObserver::new(gallery.viewport(), layout.viewport_width, FOCUS_RATIO);
            for (&item, &(left, width)) in gallery.items().iter().zip(&layout.item_extents) {
                observer.observe(item, left, width);
            }
            let mut tracker = VisibilityTracker::new(gallery);
            let initial = observer.take_batch();
            tracker.handle_batch(&initial);
            galleries.push(GalleryBinding { tracker, observer });
        }
        debug!("initialized {} galleries", galleries.len());
        Ok(Self { galleries })
    }

    pub fn gallery_count(&self) -> usize {
        self.galleries.len()
    }

    /// Scrolls one gallery's viewport and delivers the resulting
    /// notification batch to its tracker.
    pub fn scroll_to(&mut self, gallery: usize, offset: f64) -> Result<()> {
        let binding = self.galleries.get_mut(gallery).ok_or_else(|| {
            Error::Page(format!("no gallery at index {}", gallery))
        })?;
        binding.observer.scroll_to(offset);
        let batch = binding.observer.take_batch();
        binding.tracker.handle_batch(&batch);
        Ok(())
    }

    /// The active indicator index of one gallery, if any.
    pub fn active_index(&self, gallery: usize) -> Option<usize> {
        self.galleries
            .get(gallery)
            .and_then(|b| b.tracker.active_index())
    }

    pub fn tracker(&self, gallery: usize) -> Option<&VisibilityTracker> {
        self.galleries.get(gallery).map(|b| &b.tracker)
    }
}
