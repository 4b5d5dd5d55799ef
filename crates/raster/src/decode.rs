//! Skin image decoding.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use skinpack_common::error::{SkinpackError, SkinpackResult};
use skinpack_model::dimensions::{validate_dimensions, CanonicalDimensions};
use skinpack_model::pixel::PixelGrid;

/// Read the image size from the container header without decoding pixels.
///
/// Used to reject obviously wrong uploads before paying for a full decode.
pub fn probe_dimensions(bytes: &[u8]) -> SkinpackResult<(u32, u32)> {
    png_reader(bytes)?
        .into_dimensions()
        .map_err(|e| SkinpackError::image_decode(e.to_string()))
}

/// Decode PNG bytes into a pixel grid.
///
/// The size is checked twice: from the header before decoding, and against
/// the decoded raster afterwards.
pub fn decode_skin(bytes: &[u8]) -> SkinpackResult<PixelGrid> {
    let (width, height) = probe_dimensions(bytes)?;
    let expected = validate_dimensions(width, height)?;

    let image = png_reader(bytes)?
        .decode()
        .map_err(|e| SkinpackError::image_decode(e.to_string()))?;
    let rgba = image.into_rgba8();

    let (width, height) = rgba.dimensions();
    let actual = validate_dimensions(width, height)?;
    if actual != expected {
        return Err(SkinpackError::unsupported_dimensions(width, height));
    }

    let grid = PixelGrid::from_rgba_bytes(width, height, rgba.as_raw())?;
    tracing::debug!(dimensions = %actual, bytes = bytes.len(), "Decoded skin image");
    Ok(grid)
}

/// Dimensions accepted by [`decode_skin`], for user-facing hints.
pub fn accepted_dimensions() -> impl Iterator<Item = CanonicalDimensions> {
    CanonicalDimensions::ALL.into_iter()
}

fn png_reader(bytes: &[u8]) -> SkinpackResult<ImageReader<Cursor<&[u8]>>> {
    let format = image::guess_format(bytes)
        .map_err(|e| SkinpackError::image_decode(format!("unrecognized image data: {e}")))?;
    if format != ImageFormat::Png {
        return Err(SkinpackError::image_decode(format!(
            "expected a PNG image, got {format:?}"
        )));
    }
    Ok(ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba as ImageRgba, RgbaImage};

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_probe_reads_header_size() {
        let image: RgbaImage = ImageBuffer::from_pixel(128, 128, ImageRgba([1, 2, 3, 4]));
        assert_eq!(probe_dimensions(&png_bytes(&image)).unwrap(), (128, 128));
    }

    #[test]
    fn test_rejects_wrong_size_before_decoding() {
        let image: RgbaImage = ImageBuffer::from_pixel(50, 50, ImageRgba([0, 0, 0, 255]));
        assert!(matches!(
            decode_skin(&png_bytes(&image)),
            Err(SkinpackError::UnsupportedDimensions {
                width: 50,
                height: 50
            })
        ));
    }

    #[test]
    fn test_rejects_garbage_and_non_png() {
        assert!(matches!(
            decode_skin(b"definitely not an image"),
            Err(SkinpackError::ImageDecode { .. })
        ));
        // GIF header
        assert!(matches!(
            decode_skin(b"GIF89a\x40\x00\x40\x00"),
            Err(SkinpackError::ImageDecode { .. })
        ));
    }

    #[test]
    fn test_rejects_truncated_png() {
        let image: RgbaImage = ImageBuffer::from_pixel(64, 64, ImageRgba([9, 9, 9, 9]));
        let bytes = png_bytes(&image);
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            decode_skin(truncated),
            Err(SkinpackError::ImageDecode { .. })
        ));
    }

    #[test]
    fn test_decode_preserves_alpha_exactly() {
        let mut image: RgbaImage = ImageBuffer::from_pixel(64, 32, ImageRgba([0, 0, 0, 0]));
        image.put_pixel(0, 0, ImageRgba([255, 10, 20, 1]));
        image.put_pixel(63, 31, ImageRgba([7, 8, 9, 128]));

        let grid = decode_skin(&png_bytes(&image)).unwrap();
        assert_eq!(grid.dimensions(), CanonicalDimensions::Legacy);
        assert_eq!(grid.pixel(0, 0).unwrap().to_array(), [255, 10, 20, 1]);
        assert_eq!(grid.pixel(63, 31).unwrap().to_array(), [7, 8, 9, 128]);
        assert!(grid.pixel(1, 0).unwrap().is_transparent());
    }

    #[test]
    fn test_rgb_png_gets_opaque_alpha() {
        let image: image::RgbImage = ImageBuffer::from_pixel(64, 64, image::Rgb([5, 6, 7]));
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();

        let grid = decode_skin(out.get_ref()).unwrap();
        assert_eq!(grid.pixel(10, 10).unwrap().to_array(), [5, 6, 7, 255]);
    }

    #[test]
    fn test_accepted_dimensions_lists_three_sizes() {
        let sizes: Vec<String> = accepted_dimensions().map(|d| d.to_string()).collect();
        assert_eq!(sizes, ["64x32", "64x64", "128x128"]);
    }
}
