//! Exact RGBA pixel storage.
//!
//! Skin textures are pixel art whose alpha channel carries meaning (cutouts on
//! hat and jacket layers), so colors are kept as the original 8-bit values and
//! never converted or premultiplied.

use serde::{Deserialize, Serialize};
use skinpack_common::error::{SkinpackError, SkinpackResult};

use crate::dimensions::{validate_dimensions, CanonicalDimensions};

/// Bytes per pixel in a packed RGBA8 buffer.
pub const RGBA_CHANNELS: usize = 4;

/// A straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha normalized to `[0.0, 1.0]`.
    pub fn alpha(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// CSS notation with normalized alpha, e.g. `rgba(255,0,0,0.5019608)`.
impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.alpha())
    }
}

/// A row-major grid of pixels with canonical dimensions.
///
/// Row count always equals the height and every row has exactly `width`
/// pixels; the constructors reject anything else and the grid offers no way to
/// resize afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    dimensions: CanonicalDimensions,
    rows: Vec<Vec<Rgba>>,
}

impl PixelGrid {
    /// Build a grid from explicit rows.
    pub fn from_rows(rows: Vec<Vec<Rgba>>) -> SkinpackResult<Self> {
        let height = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let width = rows
            .first()
            .map(|row| u32::try_from(row.len()).unwrap_or(u32::MAX))
            .unwrap_or(0);
        let dimensions = validate_dimensions(width, height)?;

        // A ragged row is reported with its own length as the width.
        if let Some(row) = rows.iter().find(|row| row.len() != width as usize) {
            let row_width = u32::try_from(row.len()).unwrap_or(u32::MAX);
            return Err(SkinpackError::unsupported_dimensions(row_width, height));
        }

        Ok(Self { dimensions, rows })
    }

    /// Build a grid from a tightly packed RGBA8 buffer, read left-to-right,
    /// top-to-bottom.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> SkinpackResult<Self> {
        let dimensions = validate_dimensions(width, height)?;
        let expected = dimensions.pixel_count() * RGBA_CHANNELS;
        if bytes.len() != expected {
            return Err(SkinpackError::canvas_unavailable(format!(
                "pixel buffer holds {} bytes, expected {expected} for {dimensions}",
                bytes.len()
            )));
        }

        let rows = bytes
            .chunks_exact(width as usize * RGBA_CHANNELS)
            .map(|row| {
                row.chunks_exact(RGBA_CHANNELS)
                    .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
                    .collect()
            })
            .collect();

        Ok(Self { dimensions, rows })
    }

    /// A fully transparent grid.
    pub fn blank(dimensions: CanonicalDimensions) -> Self {
        let row = vec![Rgba::TRANSPARENT; dimensions.width() as usize];
        Self {
            dimensions,
            rows: vec![row; dimensions.height() as usize],
        }
    }

    pub fn dimensions(&self) -> CanonicalDimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    pub fn rows(&self) -> &[Vec<Rgba>] {
        &self.rows
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Overwrite one pixel. Returns `false` when the coordinate is outside the grid.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> bool {
        match self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(px) => {
                *px = color;
                true
            }
            None => false,
        }
    }

    /// Flatten to a packed RGBA8 buffer, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.dimensions.pixel_count() * RGBA_CHANNELS);
        for px in self.rows.iter().flatten() {
            out.extend_from_slice(&px.to_array());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_uses_normalized_alpha() {
        assert_eq!(Rgba::new(10, 20, 30, 255).to_string(), "rgba(10,20,30,1)");
        assert_eq!(Rgba::new(0, 0, 0, 0).to_string(), "rgba(0,0,0,0)");
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let mut rows = vec![vec![Rgba::TRANSPARENT; 64]; 64];
        rows[10].pop();
        let err = PixelGrid::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            SkinpackError::UnsupportedDimensions {
                width: 63,
                height: 64
            }
        ));
        assert!(!err.is_environment_failure());
    }

    #[test]
    fn test_from_rows_rejects_non_canonical_size() {
        let rows = vec![vec![Rgba::TRANSPARENT; 50]; 50];
        assert!(matches!(
            PixelGrid::from_rows(rows),
            Err(SkinpackError::UnsupportedDimensions {
                width: 50,
                height: 50
            })
        ));
    }

    #[test]
    fn test_from_rgba_bytes_rejects_short_buffer() {
        let bytes = vec![0u8; 64 * 64 * 4 - 1];
        assert!(PixelGrid::from_rgba_bytes(64, 64, &bytes).is_err());
    }

    #[test]
    fn test_pixel_addressing_is_row_major() {
        let mut grid = PixelGrid::blank(CanonicalDimensions::Legacy);
        assert!(grid.set_pixel(63, 0, Rgba::new(1, 2, 3, 4)));
        assert!(!grid.set_pixel(64, 0, Rgba::new(1, 2, 3, 4)));

        let bytes = grid.to_rgba_bytes();
        assert_eq!(&bytes[63 * 4..64 * 4], &[1, 2, 3, 4]);
        assert_eq!(grid.pixel(63, 0), Some(Rgba::new(1, 2, 3, 4)));
        assert_eq!(grid.pixel(0, 32), None);
    }

    proptest! {
        #[test]
        fn prop_packed_bytes_round_trip(seed in proptest::collection::vec(any::<u8>(), 64 * 32 * 4)) {
            let grid = PixelGrid::from_rgba_bytes(64, 32, &seed).unwrap();
            prop_assert_eq!(grid.rows().len(), 32);
            prop_assert!(grid.rows().iter().all(|row| row.len() == 64));
            prop_assert_eq!(grid.to_rgba_bytes(), seed);
        }
    }
}
