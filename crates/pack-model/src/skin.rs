//! A single skin: texture, model variant and optional custom geometry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::GeometryDocument;
use crate::ids::SkinId;
use crate::pixel::PixelGrid;

/// Built-in geometry used by classic (4px arm) skins.
pub const CLASSIC_GEOMETRY: &str = "geometry.humanoid.custom";

/// Built-in geometry used by slim (3px arm) skins.
pub const SLIM_GEOMETRY: &str = "geometry.humanoid.customSlim";

/// Base skeleton used when a skin carries no custom geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    #[default]
    Classic,
    Slim,
}

impl ModelVariant {
    /// Name of the built-in geometry for this variant.
    pub fn builtin_geometry(self) -> &'static str {
        match self {
            Self::Classic => CLASSIC_GEOMETRY,
            Self::Slim => SLIM_GEOMETRY,
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classic => f.write_str("classic"),
            Self::Slim => f.write_str("slim"),
        }
    }
}

impl std::str::FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "steve" | "wide" => Ok(Self::Classic),
            "slim" | "alex" => Ok(Self::Slim),
            other => Err(format!("unknown model variant `{other}` (use classic or slim)")),
        }
    }
}

/// One skin in a pack.
///
/// The geometry is shared: every skin of a pack points at the same document
/// once one is attached.
#[derive(Debug, Clone)]
pub struct Skin {
    pub(crate) id: SkinId,
    pub(crate) name: String,
    pub(crate) variant: ModelVariant,
    pub(crate) pixels: PixelGrid,
    pub(crate) geometry: Option<Arc<GeometryDocument>>,
}

impl Skin {
    pub fn id(&self) -> SkinId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    pub fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn geometry(&self) -> Option<&Arc<GeometryDocument>> {
        self.geometry.as_ref()
    }

    /// Geometry name written to the skin index: the custom document's
    /// primary definition, or the built-in skeleton of the variant.
    pub fn geometry_reference(&self) -> &str {
        match &self.geometry {
            Some(doc) => doc.primary_name(),
            None => self.variant.builtin_geometry(),
        }
    }
}
