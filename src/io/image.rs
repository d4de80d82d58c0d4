//! Raster image input for depth sources and export of rendered stereograms

use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};

use crate::algorithm::engine::PixelBuffer;
use crate::color::Palette;
use crate::io::error::{Result, StereogramError, invalid_parameter, palette_error};

/// Load an image to be used as a depth map
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_depth_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path_buf = path.as_ref().to_path_buf();
    image::open(&path_buf).map_err(|e| StereogramError::ImageLoad {
        path: path_buf,
        source: e,
    })
}

/// Raw depth levels of a grayscale image, one row per image row
///
/// The red channel is used as-is (0 to 255); normalization against the
/// brightest pixel happens when the levels are treated as a template.
pub fn depth_levels(image: &DynamicImage) -> Vec<Vec<f64>> {
    let rgba = image.to_rgba8();
    rgba.rows()
        .map(|row| row.map(|pixel| f64::from(pixel.0[0])).collect())
        .collect()
}

/// Resolve a pixel buffer against its palette into an RGBA image
///
/// # Errors
///
/// Returns an error if the buffer is too large for an image or refers to a
/// color index outside the palette
pub fn to_rgba_image(pixels: &PixelBuffer, palette: &Palette) -> Result<RgbaImage> {
    let width = u32::try_from(pixels.width()).map_err(|e| dimension_error(pixels, &e))?;
    let height = u32::try_from(pixels.height()).map_err(|e| dimension_error(pixels, &e))?;

    if let Some(&index) = pixels.indices().iter().find(|&&index| index >= palette.len()) {
        return Err(palette_error(&format!(
            "pixel refers to color {index} but the palette has {} colors",
            palette.len()
        )));
    }

    let mut img = ImageBuffer::new(width, height);
    for (pixel, color) in img.pixels_mut().zip(pixels.to_colors(palette)) {
        *pixel = Rgba(color);
    }
    Ok(img)
}

/// Export a rendered stereogram, choosing the format from the file extension
///
/// # Errors
///
/// Returns an error if:
/// - A pixel refers to a color outside the palette
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn export_stereogram(pixels: &PixelBuffer, palette: &Palette, output_path: &Path) -> Result<()> {
    let img = to_rgba_image(pixels, palette)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StereogramError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| StereogramError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

fn dimension_error(pixels: &PixelBuffer, reason: &impl ToString) -> StereogramError {
    invalid_parameter(
        "dimensions",
        &format!("{}x{}", pixels.width(), pixels.height()),
        reason,
    )
}
