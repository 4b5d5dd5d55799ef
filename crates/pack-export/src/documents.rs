//! JSON documents written into the pack archive.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use skinpack_common::error::{SkinpackError, SkinpackResult};
use skinpack_model::geometry::GeometryDocument;
use skinpack_model::ids::IdGenerator;
use skinpack_model::pack::PackSnapshot;
use uuid::Uuid;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const SKINS_FILE: &str = "skins.json";
pub const GEOMETRY_FILE: &str = "geometry.json";

/// Manifest schema version understood by the client.
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

/// Version stamped on the pack header and its module.
pub const PACK_VERSION: [u32; 3] = [1, 0, 0];

pub const SKIN_PACK_MODULE: &str = "skin_pack";

/// Skin availability marker; packs built here are never paid content.
pub const FREE_SKIN: &str = "free";

/// Texture file name of the skin at `index` in pack order.
pub fn texture_file_name(index: usize) -> String {
    format!("skin_{index}.png")
}

/// `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    pub header: ManifestHeader,
    pub modules: Vec<ManifestModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub name: String,
    pub uuid: Uuid,
    pub version: [u32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestModule {
    #[serde(rename = "type")]
    pub module_type: String,
    pub uuid: Uuid,
    pub version: [u32; 3],
}

impl Manifest {
    /// Manifest for a pack, drawing two fresh UUIDs (header, then module).
    pub fn new(name: impl Into<String>, ids: &mut dyn IdGenerator) -> Self {
        let header_uuid = ids.next_uuid();
        let module_uuid = ids.next_uuid();
        Self {
            format_version: MANIFEST_FORMAT_VERSION,
            header: ManifestHeader {
                name: name.into(),
                uuid: header_uuid,
                version: PACK_VERSION,
            },
            modules: vec![ManifestModule {
                module_type: SKIN_PACK_MODULE.to_string(),
                uuid: module_uuid,
                version: PACK_VERSION,
            }],
        }
    }
}

/// `skins.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinIndex {
    pub skins: Vec<SkinEntry>,
    pub serialize_name: String,
    pub localization_name: String,
}

/// One skin as listed in `skins.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinEntry {
    pub localization_name: String,
    pub geometry: String,
    pub texture: String,
    #[serde(rename = "type")]
    pub skin_type: String,
}

impl SkinIndex {
    pub fn from_snapshot(snapshot: &PackSnapshot) -> Self {
        let skins = snapshot
            .skins
            .iter()
            .enumerate()
            .map(|(index, skin)| SkinEntry {
                localization_name: skin.name().to_string(),
                geometry: skin.geometry_reference().to_string(),
                texture: texture_file_name(index),
                skin_type: FREE_SKIN.to_string(),
            })
            .collect();

        Self {
            skins,
            serialize_name: snapshot.name.clone(),
            localization_name: snapshot.name.clone(),
        }
    }
}

/// Union of every distinct geometry document referenced by the pack's skins,
/// in skin order. Later documents win on key collisions.
///
/// Returns `None` when no skin carries custom geometry.
pub fn merged_geometry(snapshot: &PackSnapshot) -> SkinpackResult<Option<Value>> {
    let mut seen: Vec<&Arc<GeometryDocument>> = Vec::new();
    for doc in snapshot.skins.iter().filter_map(|skin| skin.geometry()) {
        if !seen.iter().any(|known| Arc::ptr_eq(known, doc)) {
            seen.push(doc);
        }
    }

    if seen.is_empty() {
        return Ok(None);
    }

    let mut merged = Map::new();
    for doc in seen {
        doc.write_into(&mut merged)
            .map_err(|e| SkinpackError::archive_write(format!("geometry document: {e}")))?;
    }
    Ok(Some(Value::Object(merged)))
}

/// Pretty-printed JSON (two-space indent) as archive file contents.
pub fn to_pretty_json<T: Serialize>(value: &T) -> SkinpackResult<Vec<u8>> {
    serde_json::to_vec_pretty(value)
        .map_err(|e| SkinpackError::archive_write(format!("failed to serialize document: {e}")))
}
