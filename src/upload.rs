// SPDX-License-Identifier: MPL-2.0
//! Background upload of gallery posts: a description field plus zero or
//! more image files, sent as one multipart request to the server's
//! `upload/` endpoint while a progress callback tracks bytes on the wire.
//!
//! Progress counts file bytes only; multipart framing and the description
//! field are not included in the totals.

use crate::config::Config;
use crate::error::{Error, Result};
use log::info;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Request timeout for uploads. Posts can carry many full-size photos, so
/// this is deliberately an hour.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_millis(3_600_000);

/// Default cap on the total file size of one upload.
pub const DEFAULT_UPLOAD_BYTES_MAX: u64 = 100 * 1024 * 1024;

const CHUNK_SIZE: usize = 64 * 1024;

/// Bytes-sent / bytes-total snapshot handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub bytes_total: u64,
}

impl UploadProgress {
    /// Progress as a rounded 0–100 percentage. An empty upload has nothing
    /// left to send and reports 100.
    pub fn percent(&self) -> u8 {
        if self.bytes_total == 0 {
            return 100;
        }
        let ratio = self.bytes_sent as f64 / self.bytes_total as f64;
        (ratio * 100.0).round().min(100.0) as u8
    }

    /// Label text for the progress bar.
    pub fn label(&self) -> String {
        format!("{}%", self.percent())
    }
}

/// Derives the upload endpoint from the server's base path.
pub fn upload_url(base: &str) -> String {
    format!("{}/upload/", base.trim_end_matches('/'))
}

/// One-shot upload client for a gallery server.
#[derive(Debug, Clone)]
pub struct Uploader {
    base_url: String,
    timeout: Duration,
    bytes_max: u64,
}

impl Uploader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: UPLOAD_TIMEOUT,
            bytes_max: DEFAULT_UPLOAD_BYTES_MAX,
        }
    }

    /// Builds an uploader from the user configuration. Fails when no
    /// server URL is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config
            .server_url
            .clone()
            .ok_or_else(|| Error::Config("no server URL configured".to_string()))?;
        let mut uploader = Self::new(base_url);
        if let Some(ms) = config.upload_timeout_ms {
            uploader.timeout = Duration::from_millis(ms);
        }
        if let Some(max) = config.upload_bytes_max {
            uploader.bytes_max = max;
        }
        Ok(uploader)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bytes_max(mut self, bytes_max: u64) -> Self {
        self.bytes_max = bytes_max;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn bytes_max(&self) -> u64 {
        self.bytes_max
    }

    /// Uploads `description` plus `files` as one multipart request.
    ///
    /// The callback is invoked once with 0 bytes sent before the request
    /// starts, after every chunk that enters the request body, and once
    /// more when the server has accepted the post.
    pub async fn upload<F>(
        &self,
        description: &str,
        files: &[PathBuf],
        on_progress: F,
    ) -> Result<()>
    where
        F: FnMut(UploadProgress) + Send + 'static,
    {
        let mut total: u64 = 0;
        for path in files {
            total += tokio::fs::metadata(path).await?.len();
        }
        if total > self.bytes_max {
            return Err(Error::Upload(format!(
                "upload is {} bytes, over the {} byte limit",
                total, self.bytes_max
            )));
        }

        let sent = Arc::new(AtomicU64::new(0));
        let on_progress = Arc::new(Mutex::new(on_progress));
        report(&on_progress, 0, total);

        let mut form = Form::new().text("description", description.to_string());
        for path in files {
            let data = tokio::fs::read(path).await?;
            let length = data.len() as u64;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("file")
                .to_string();
            let sent = Arc::clone(&sent);
            let progress = Arc::clone(&on_progress);
            let chunks = chunk_bytes(&data);
            let stream = futures_util::stream::iter(chunks.into_iter().map(move |chunk| {
                let so_far =
                    sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
                report(&progress, so_far, total);
                Ok::<Vec<u8>, std::io::Error>(chunk)
            }));
            let part = Part::stream_with_length(Body::wrap_stream(stream), length)
                .file_name(filename);
            form = form.part("file", part);
        }

        info!(
            "uploading {} file(s), {} bytes, to {}",
            files.len(),
            total,
            upload_url(&self.base_url)
        );
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client
            .post(upload_url(&self.base_url))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Upload(format!(
                "server returned {}",
                response.status()
            )));
        }
        report(&on_progress, total, total);
        info!("upload accepted");
        Ok(())
    }
}

fn report<F: FnMut(UploadProgress)>(callback: &Mutex<F>, bytes_sent: u64, bytes_total: u64) {
    if let Ok(mut callback) = callback.lock() {
        callback(UploadProgress {
            bytes_sent,
            bytes_total,
        });
    }
}

fn chunk_bytes(data: &[u8]) -> Vec<Vec<u8>> {
    data.chunks(CHUNK_SIZE).map(|c| c.to_vec()).collect()
}
