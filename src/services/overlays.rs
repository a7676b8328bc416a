//! Static geographic layers rendered next to the listings.
//!
//! Files are read on every call and returned as parsed JSON, untouched.

use std::{io, path::PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

/// Layer name to file name inside `Config::layers_dir`.
pub const LAYERS: &[(&str, &str)] = &[("flood", "flood_zones_chennai.geojson")];

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("no overlay named '{0}'")]
    UnknownLayer(String),

    #[error("overlay file {path} could not be read: {source}")]
    Missing { path: PathBuf, source: io::Error },

    #[error("overlay file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn overlay_path(config: &Config, name: &str) -> Result<PathBuf, OverlayError> {
    LAYERS
        .iter()
        .find(|(layer, _)| *layer == name)
        .map(|(_, file)| PathBuf::from(&config.layers_dir).join(file))
        .ok_or_else(|| OverlayError::UnknownLayer(name.to_string()))
}

pub async fn get_overlay(config: &Config, name: &str) -> Result<Value, OverlayError> {
    let path = overlay_path(config, name)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(source) => return Err(OverlayError::Missing { path, source }),
    };

    serde_json::from_slice(&bytes).map_err(|source| OverlayError::Malformed { path, source })
}
