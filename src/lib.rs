// SPDX-License-Identifier: MPL-2.0
//! `gallery_tracker` models the client-side behaviors of a media gallery
//! page: a scroll-position tracker that keeps exactly one indicator
//! highlighted for whichever image is in view, and an upload client that
//! submits a post to the gallery server while reporting progress.

pub mod config;
pub mod document;
pub mod error;
pub mod gallery;
pub mod observer;
pub mod page;
pub mod tracker;
pub mod upload;
