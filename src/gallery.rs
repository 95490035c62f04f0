// SPDX-License-Identifier: MPL-2.0
//! Gallery instance model: the ordered image items of one scrollable list,
//! their index-aligned indicator markers, and the activation state.
//!
//! A gallery is built once from the page and never mutated structurally
//! afterwards; only the indicator activation state changes.

use crate::document::{Document, NodeId};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Class on the root element enclosing one gallery.
pub const GALLERY_CLASS: &str = "gallery";
/// Class on the indicator strip; its direct children are the indicators.
pub const INDICATOR_LIST_CLASS: &str = "scroll-indicators";
/// Class on the scrollable image container inside the gallery root.
pub const IMAGE_STRIP_CLASS: &str = "images";

const ITEM_TAG: &str = "img";

/// One scrollable image list with its indicator row.
///
/// Invariants: `items` and `indicators` have equal length and index `i`
/// refers to the same logical image in both; at most one indicator is
/// active at any time.
#[derive(Debug, Clone)]
pub struct Gallery {
    viewport: NodeId,
    items: Vec<NodeId>,
    indicators: Vec<NodeId>,
    index_of: HashMap<NodeId, usize>,
    active: Vec<bool>,
}

impl Gallery {
    /// Builds a gallery from an item sequence and its matching indicator
    /// sequence. Fails if the two sequences differ in length.
    pub fn new(viewport: NodeId, items: Vec<NodeId>, indicators: Vec<NodeId>) -> Result<Self> {
        if items.len() != indicators.len() {
            return Err(Error::Page(format!(
                "gallery has {} items but {} indicators",
                items.len(),
                indicators.len()
            )));
        }
        let index_of = items
            .iter()
            .enumerate()
            .map(|(i, &item)| (item, i))
            .collect();
        let active = vec![false; items.len()];
        Ok(Self {
            viewport,
            items,
            indicators,
            index_of,
            active,
        })
    }

    /// Scans a document for galleries, one per indicator strip found, in
    /// document order.
    ///
    /// Each strip must sit inside a gallery root; the root's image
    /// container (or the root itself when none is marked) becomes the
    /// scroll viewport, its `img` descendants become the items, and the
    /// strip's direct children become the indicators.
    pub fn scan(doc: &Document) -> Result<Vec<Gallery>> {
        let mut galleries = Vec::new();
        for strip in doc.elements_by_class(INDICATOR_LIST_CLASS) {
            let root = doc.closest(strip, GALLERY_CLASS).ok_or_else(|| {
                Error::Page("indicator list is not inside a gallery".to_string())
            })?;
            let viewport = doc.descendant_by_class(root, IMAGE_STRIP_CLASS).unwrap_or(root);
            let items = doc.descendants_by_tag(root, ITEM_TAG);
            let indicators = doc.children(strip).to_vec();
            galleries.push(Gallery::new(viewport, items, indicators)?);
        }
        Ok(galleries)
    }

    /// The scroll container acting as the visibility viewport.
    pub fn viewport(&self) -> NodeId {
        self.viewport
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn indicators(&self) -> &[NodeId] {
        &self.indicators
    }

    /// Resolves an item element to its position in the gallery.
    pub fn item_index(&self, item: NodeId) -> Option<usize> {
        self.index_of.get(&item).copied()
    }

    /// Marks the indicator at `index` active and every other indicator
    /// inactive. Reapplying the current index is a no-op in effect. An
    /// out-of-range index changes nothing.
    pub fn activate(&mut self, index: usize) {
        if index >= self.active.len() {
            return;
        }
        for (i, slot) in self.active.iter_mut().enumerate() {
            *slot = i == index;
        }
    }

    /// The currently active index, if any qualifying visibility event has
    /// arrived yet.
    pub fn active_index(&self) -> Option<usize> {
        self.active.iter().position(|&a| a)
    }

    /// Per-indicator activation state, index-aligned with `items`.
    pub fn indicator_states(&self) -> &[bool] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_page(item_count: usize, indicator_count: usize) -> (Document, Gallery) {
        let mut doc = Document::new();
        let root = doc.create_element_with_class("div", GALLERY_CLASS);
        let strip_container = doc.create_element_with_class("div", IMAGE_STRIP_CLASS);
        doc.append_child(root, strip_container);
        let mut items = Vec::new();
        for _ in 0..item_count {
            let img = doc.create_element(ITEM_TAG);
            doc.append_child(strip_container, img);
            items.push(img);
        }
        let indicator_list = doc.create_element_with_class("div", INDICATOR_LIST_CLASS);
        doc.append_child(root, indicator_list);
        let mut indicators = Vec::new();
        for _ in 0..indicator_count {
            let dot = doc.create_element("span");
            doc.append_child(indicator_list, dot);
            indicators.push(dot);
        }
        let gallery =
            Gallery::new(strip_container, items, indicators).expect("failed to build gallery");
        (doc, gallery)
    }

    #[test]
    fn new_gallery_has_no_active_indicator() {
        let (_, gallery) = build_page(4, 4);
        assert_eq!(gallery.active_index(), None);
        assert!(gallery.indicator_states().iter().all(|&a| !a));
    }

    #[test]
    fn mismatched_sequences_are_rejected() {
        let mut doc = Document::new();
        let viewport = doc.create_element("div");
        let items = vec![doc.create_element(ITEM_TAG), doc.create_element(ITEM_TAG)];
        let indicators = vec![doc.create_element("span")];
        let result = Gallery::new(viewport, items, indicators);
        assert!(matches!(result, Err(Error::Page(_))));
    }

    #[test]
    fn activate_keeps_exactly_one_indicator_active() {
        let (_, mut gallery) = build_page(5, 5);
        gallery.activate(2);
        assert_eq!(gallery.active_index(), Some(2));
        gallery.activate(4);
        assert_eq!(gallery.active_index(), Some(4));
        let active_count = gallery.indicator_states().iter().filter(|&&a| a).count();
        assert_eq!(active_count, 1);
    }

    #[test]
    fn activate_same_index_is_idempotent() {
        let (_, mut gallery) = build_page(3, 3);
        gallery.activate(1);
        let before = gallery.indicator_states().to_vec();
        gallery.activate(1);
        assert_eq!(gallery.indicator_states(), before.as_slice());
    }

    #[test]
    fn activate_out_of_range_changes_nothing() {
        let (_, mut gallery) = build_page(3, 3);
        gallery.activate(1);
        gallery.activate(7);
        assert_eq!(gallery.active_index(), Some(1));
    }

    #[test]
    fn item_index_maps_by_identity() {
        let (_, gallery) = build_page(3, 3);
        let items = gallery.items().to_vec();
        assert_eq!(gallery.item_index(items[0]), Some(0));
        assert_eq!(gallery.item_index(items[2]), Some(2));
    }

    #[test]
    fn item_index_returns_none_for_foreign_element() {
        let (mut doc, gallery) = build_page(3, 3);
        let foreign = doc.create_element(ITEM_TAG);
        assert_eq!(gallery.item_index(foreign), None);
    }

    #[test]
    fn scan_finds_each_indicator_strip() {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        for items in [2usize, 3] {
            let root = doc.create_element_with_class("div", GALLERY_CLASS);
            doc.append_child(body, root);
            let container = doc.create_element_with_class("div", IMAGE_STRIP_CLASS);
            doc.append_child(root, container);
            for _ in 0..items {
                let img = doc.create_element(ITEM_TAG);
                doc.append_child(container, img);
            }
            let list = doc.create_element_with_class("div", INDICATOR_LIST_CLASS);
            doc.append_child(root, list);
            for _ in 0..items {
                let dot = doc.create_element("span");
                doc.append_child(list, dot);
            }
        }
        let galleries = Gallery::scan(&doc).expect("scan failed");
        assert_eq!(galleries.len(), 2);
        assert_eq!(galleries[0].len(), 2);
        assert_eq!(galleries[1].len(), 3);
    }

    #[test]
    fn scan_uses_image_container_as_viewport() {
        let (doc, gallery) = build_page(2, 2);
        let galleries = Gallery::scan(&doc).expect("scan failed");
        assert_eq!(galleries[0].viewport(), gallery.viewport());
    }

    #[test]
    fn scan_rejects_orphan_indicator_list() {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let list = doc.create_element_with_class("div", INDICATOR_LIST_CLASS);
        doc.append_child(body, list);
        assert!(matches!(Gallery::scan(&doc), Err(Error::Page(_))));
    }

    #[test]
    fn scan_rejects_count_mismatch() {
        let mut doc = Document::new();
        let root = doc.create_element_with_class("div", GALLERY_CLASS);
        let img = doc.create_element(ITEM_TAG);
        doc.append_child(root, img);
        let list = doc.create_element_with_class("div", INDICATOR_LIST_CLASS);
        doc.append_child(root, list);
        // Two indicators for a single image.
        for _ in 0..2 {
            let dot = doc.create_element("span");
            doc.append_child(list, dot);
        }
        assert!(matches!(Gallery::scan(&doc), Err(Error::Page(_))));
    }
}
