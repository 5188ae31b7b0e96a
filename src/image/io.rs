//! I/O helpers for RGBA images and JSON.
//!
//! - `load_rgba_image`: read a PNG/JPEG/etc. into an owned RGBA f32 buffer.
//! - `save_rgba_image`: write an `ImageRgbaF32` to an RGBA PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageRgbaF32;
use image::{ImageBuffer, Rgba, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to straight RGBA with channels in [0, 1].
pub fn load_rgba_image(path: &Path) -> Result<ImageRgbaF32, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img
        .into_raw()
        .into_iter()
        .map(|c| c as f32 / 255.0)
        .collect();
    Ok(ImageRgbaF32::from_raw(width, height, data))
}

/// Save an RGBA float image to a PNG, clamping channels into [0, 1].
pub fn save_rgba_image(image: &ImageRgbaF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out: RgbaImage = ImageBuffer::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        for x in 0..image.w {
            let px = image.get(x, y);
            let bytes = [
                (px[0].clamp(0.0, 1.0) * 255.0).round() as u8,
                (px[1].clamp(0.0, 1.0) * 255.0).round() as u8,
                (px[2].clamp(0.0, 1.0) * 255.0).round() as u8,
                (px[3].clamp(0.0, 1.0) * 255.0).round() as u8,
            ];
            out.put_pixel(x as u32, y as u32, Rgba(bytes));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
