//! Checks the caller runs before asking for an export.
//!
//! Whether a pack must carry custom geometry depends on what the user set
//! out to build, which the pack model does not record. The collaborator
//! passes it in as a [`PackKind`].

use serde::{Deserialize, Serialize};
use skinpack_common::error::{SkinpackError, SkinpackResult};
use skinpack_model::pack::PackSnapshot;

/// Archive extension the client associates with importable packs.
pub const PACK_EXTENSION: &str = "mcpack";

const FALLBACK_STEM: &str = "skin_pack";

/// What kind of pack the user is building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackKind {
    /// Skins on the built-in classic/slim skeletons.
    #[default]
    Standard,
    /// Skins sharing an uploaded custom geometry.
    Custom,
}

/// Validate a snapshot before export.
pub fn preflight(snapshot: &PackSnapshot, kind: PackKind) -> SkinpackResult<()> {
    if snapshot.is_empty() {
        return Err(SkinpackError::EmptyPack);
    }
    if snapshot.name.trim().is_empty() {
        return Err(SkinpackError::BlankPackName);
    }
    if kind == PackKind::Custom && !snapshot.has_custom_geometry() {
        return Err(SkinpackError::MissingGeometry);
    }
    Ok(())
}

/// Download file name for a pack: lowercased, every whitespace run replaced
/// by one underscore, with the `.mcpack` extension.
///
/// Path separators are replaced too so the name is always a single path
/// component.
pub fn suggested_filename(pack_name: &str) -> String {
    let mut stem = String::with_capacity(pack_name.len());
    let mut in_whitespace = false;
    for ch in pack_name.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
        } else {
            stem.push(if matches!(ch, '/' | '\\') { '_' } else { ch });
            in_whitespace = false;
        }
    }

    if stem.is_empty() || stem.chars().all(|c| c == '_' || c == '.') {
        stem = FALLBACK_STEM.to_string();
    }
    format!("{stem}.{PACK_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinpack_common::config::PackDefaults;
    use skinpack_model::dimensions::CanonicalDimensions;
    use skinpack_model::geometry::validate_geometry;
    use skinpack_model::ids::SequentialIds;
    use skinpack_model::pack::Pack;
    use skinpack_model::pixel::PixelGrid;
    use skinpack_model::skin::ModelVariant;

    fn pack_with_skin() -> Pack {
        let mut pack = Pack::new(PackDefaults::default(), SequentialIds::new());
        pack.add_skin(
            PixelGrid::blank(CanonicalDimensions::Modern),
            ModelVariant::Classic,
            None,
        );
        pack
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename("My Skin Pack"), "my_skin_pack.mcpack");
        assert_eq!(suggested_filename("Big \t  Gap"), "big_gap.mcpack");
        assert_eq!(suggested_filename(" edge "), "_edge_.mcpack");
        assert_eq!(suggested_filename("a/b"), "a_b.mcpack");
        assert_eq!(suggested_filename("   "), "skin_pack.mcpack");
        assert_eq!(suggested_filename("Ünïcode"), "ünïcode.mcpack");
    }

    #[test]
    fn test_preflight_rejects_empty_pack() {
        let pack = Pack::new(PackDefaults::default(), SequentialIds::new());
        assert!(matches!(
            preflight(&pack.snapshot(), PackKind::Standard),
            Err(SkinpackError::EmptyPack)
        ));
    }

    #[test]
    fn test_preflight_rejects_blank_name() {
        let mut pack = pack_with_skin();
        pack.set_name("  ");
        assert!(matches!(
            preflight(&pack.snapshot(), PackKind::Standard),
            Err(SkinpackError::BlankPackName)
        ));
    }

    #[test]
    fn test_custom_pack_requires_geometry() {
        let mut pack = pack_with_skin();
        assert!(matches!(
            preflight(&pack.snapshot(), PackKind::Custom),
            Err(SkinpackError::MissingGeometry)
        ));
        assert!(preflight(&pack.snapshot(), PackKind::Standard).is_ok());

        let doc = validate_geometry(&serde_json::json!({
            "geometry.big_head": {
                "texturewidth": 64,
                "textureheight": 64,
                "bones": [{ "name": "head", "pivot": [0, 24, 0] }]
            }
        }))
        .unwrap();
        pack.attach_geometry(doc);
        assert!(preflight(&pack.snapshot(), PackKind::Custom).is_ok());
    }
}
