//! Loading rasters from disk and writing JSON reports.
//!
//! Errors are plain strings carrying the offending path; the demo binary
//! prints them as they are.
use super::{ImageF32, ImageU8};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode any format supported by `image`, convert to 8-bit luma and then to
/// floats in `[0, 1]`, top row first.
pub fn load_grayscale_f32(path: &Path) -> Result<ImageF32, String> {
    let luma = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let (w, h) = (luma.width() as usize, luma.height() as usize);
    Ok(ImageF32::from_u8(&ImageU8 {
        w,
        h,
        stride: w,
        data: luma.as_raw(),
    }))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}
