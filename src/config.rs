// SPDX-License-Identifier: MPL-2.0
//! Uploader configuration, loaded from and saved to a `settings.toml`
//! file in the user's configuration directory. A missing file yields the
//! defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "gallery_tracker";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the gallery server, e.g. `http://pics.example.org/g`.
    pub server_url: Option<String>,
    /// Upload request timeout in milliseconds.
    #[serde(default)]
    pub upload_timeout_ms: Option<u64>,
    /// Cap on the total file size of one upload, in bytes.
    #[serde(default)]
    pub upload_bytes_max: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            upload_timeout_ms: Some(crate::upload::UPLOAD_TIMEOUT.as_millis() as u64),
            upload_bytes_max: Some(crate::upload::DEFAULT_UPLOAD_BYTES_MAX),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
