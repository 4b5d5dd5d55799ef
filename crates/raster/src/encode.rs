//! PNG encoding of pixel grids.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use skinpack_common::error::{SkinpackError, SkinpackResult};
use skinpack_model::pixel::PixelGrid;

/// Encode a grid as an 8-bit RGBA PNG at exactly its stored size.
pub fn encode_png(grid: &PixelGrid) -> SkinpackResult<Vec<u8>> {
    let (width, height) = (grid.width(), grid.height());
    let surface = RgbaImage::from_raw(width, height, grid.to_rgba_bytes()).ok_or_else(|| {
        SkinpackError::canvas_unavailable(format!(
            "pixel buffer does not fit a {width}x{height} surface"
        ))
    })?;

    let mut output = Vec::new();
    PngEncoder::new(&mut output)
        .write_image(surface.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| SkinpackError::archive_write(format!("failed to encode skin image: {e}")))?;

    tracing::trace!(width, height, bytes = output.len(), "Encoded skin image");
    Ok(output)
}
