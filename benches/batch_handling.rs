// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for visibility notification handling.
//!
//! Measures the performance of:
//! - Gallery scanning (page initialization)
//! - Batch processing in the tracker

use criterion::{criterion_group, criterion_main, Criterion};
use gallery_tracker::document::{Document, NodeId};
use gallery_tracker::gallery::{Gallery, GALLERY_CLASS, IMAGE_STRIP_CLASS, INDICATOR_LIST_CLASS};
use gallery_tracker::tracker::{VisibilityChange, VisibilityTracker};
use std::hint::black_box;

fn build_document(items: usize) -> Document {
    let mut doc = Document::new();
    let body = doc.create_element("body");
    let root = doc.create_element_with_class("div", GALLERY_CLASS);
    doc.append_child(body, root);
    let container = doc.create_element_with_class("div", IMAGE_STRIP_CLASS);
    doc.append_child(root, container);
    for _ in 0..items {
        let img = doc.create_element("img");
        doc.append_child(container, img);
    }
    let list = doc.create_element_with_class("div", INDICATOR_LIST_CLASS);
    doc.append_child(root, list);
    for _ in 0..items {
        let dot = doc.create_element("span");
        doc.append_child(list, dot);
    }
    doc
}

/// Benchmark gallery discovery over a large page.
fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_handling");

    let doc = build_document(1_000);
    group.bench_function("scan_1000_items", |b| {
        b.iter(|| {
            let galleries = Gallery::scan(&doc).unwrap();
            black_box(&galleries);
        });
    });

    group.finish();
}

/// Benchmark tracker throughput on a large notification batch.
fn bench_handle_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_handling");

    let doc = build_document(1_000);
    let galleries = Gallery::scan(&doc).unwrap();
    let items: Vec<NodeId> = galleries[0].items().to_vec();
    let batch: Vec<VisibilityChange> = items
        .iter()
        .enumerate()
        .map(|(i, &item)| VisibilityChange {
            target: item,
            is_intersecting: true,
            intersection_ratio: if i % 3 == 0 { 0.9 } else { 0.3 },
        })
        .collect();

    group.bench_function("handle_batch_1000", |b| {
        b.iter(|| {
            let mut tracker = VisibilityTracker::new(galleries[0].clone());
            tracker.handle_batch(&batch);
            black_box(tracker.active_index());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_scan, bench_handle_batch);
criterion_main!(benches);
