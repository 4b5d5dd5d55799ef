//! Canonical skin texture dimensions.

use serde::{Deserialize, Serialize};
use skinpack_common::error::{SkinpackError, SkinpackResult};

/// One of the texture sizes the game client accepts for a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalDimensions {
    /// 64x32, pre-1.8 layout without the second layer.
    Legacy,
    /// 64x64.
    Modern,
    /// 128x128.
    HighDefinition,
}

impl CanonicalDimensions {
    /// All accepted sizes, smallest first.
    pub const ALL: [CanonicalDimensions; 3] = [
        CanonicalDimensions::Legacy,
        CanonicalDimensions::Modern,
        CanonicalDimensions::HighDefinition,
    ];

    pub fn width(self) -> u32 {
        match self {
            Self::Legacy | Self::Modern => 64,
            Self::HighDefinition => 128,
        }
    }

    pub fn height(self) -> u32 {
        match self {
            Self::Legacy => 32,
            Self::Modern => 64,
            Self::HighDefinition => 128,
        }
    }

    /// Number of pixels in a texture of this size.
    pub fn pixel_count(self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

impl std::fmt::Display for CanonicalDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

/// Match a raw width/height against the canonical sizes.
///
/// Anything else is rejected with [`SkinpackError::UnsupportedDimensions`]
/// carrying the offending size.
pub fn validate_dimensions(width: u32, height: u32) -> SkinpackResult<CanonicalDimensions> {
    CanonicalDimensions::ALL
        .into_iter()
        .find(|dims| dims.width() == width && dims.height() == height)
        .ok_or_else(|| SkinpackError::unsupported_dimensions(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_canonical_sizes_accepted() {
        assert_eq!(
            validate_dimensions(64, 32).unwrap(),
            CanonicalDimensions::Legacy
        );
        assert_eq!(
            validate_dimensions(64, 64).unwrap(),
            CanonicalDimensions::Modern
        );
        assert_eq!(
            validate_dimensions(128, 128).unwrap(),
            CanonicalDimensions::HighDefinition
        );
    }

    #[test]
    fn test_near_misses_rejected() {
        for (w, h) in [(50, 50), (64, 65), (32, 64), (128, 64), (0, 0)] {
            match validate_dimensions(w, h) {
                Err(SkinpackError::UnsupportedDimensions { width, height }) => {
                    assert_eq!((width, height), (w, h));
                }
                other => panic!("expected rejection for {w}x{h}, got {other:?}"),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_only_canonical_pairs_pass(w in 0u32..512, h in 0u32..512) {
            let canonical = matches!((w, h), (64, 32) | (64, 64) | (128, 128));
            prop_assert_eq!(validate_dimensions(w, h).is_ok(), canonical);
        }
    }
}
