//! File-layer helpers around the pipeline.
//!
//! - `decode_raster` / `load_raster`: bytes or path → owned RGBA8 buffer.
//! - `save_rgba_png` / `save_gray_png`: lossless PNG output.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::ExtractError;
use image::{GrayImage, ImageFormat, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode an in-memory raster (any format enabled on the `image` crate).
pub fn decode_raster(bytes: &[u8]) -> Result<RgbaImage, ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::invalid_input("empty input buffer"));
    }
    let decoded = image::load_from_memory(bytes)?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(ExtractError::invalid_input(format!(
            "degenerate dimensions {}x{}",
            decoded.width(),
            decoded.height()
        )));
    }
    Ok(decoded.into_rgba8())
}

/// Read and decode a raster from disk.
pub fn load_raster(path: &Path) -> Result<RgbaImage, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_raster(&bytes)
}

/// Write an RGBA buffer as PNG, keeping the alpha channel.
pub fn save_rgba_png(image: &RgbaImage, path: &Path) -> Result<(), ExtractError> {
    ensure_parent_dir(path)?;
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Write a single-channel buffer as PNG.
pub fn save_gray_png(image: &GrayImage, path: &Path) -> Result<(), ExtractError> {
    ensure_parent_dir(path)?;
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ExtractError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| ExtractError::Serialize {
        what: path.display().to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), ExtractError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ExtractError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
