//! Custom geometry documents (bones and cubes).
//!
//! Validation is shallow: it checks the shape the game client
//! needs to even attempt loading the model (texture size, a bone list, bone
//! names, three-component pivots, cube lists) and nothing deeper. Numeric
//! ranges, parent references, cube fields and UV bounds are left to the
//! client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use skinpack_common::error::{SkinpackError, SkinpackResult};

/// Top-level keys naming a geometry definition carry this prefix.
pub const GEOMETRY_KEY_PREFIX: &str = "geometry.";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A named model: texture size and bone hierarchy.
///
/// Only the fields the shape check looks at are typed. Everything else
/// (visible bounds, bone rotation, cube contents) stays raw JSON and is
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryDefinition {
    #[serde(rename = "texturewidth")]
    pub texture_width: Number,

    #[serde(rename = "textureheight")]
    pub texture_height: Number,

    pub bones: Vec<Bone>,

    /// Fields this crate does not model, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One node of the skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,

    pub pivot: [Number; 3],

    /// Cube records, unvalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cubes: Option<Vec<Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bone {
    /// Parent bone name. Not resolved or cycle-checked.
    pub fn parent(&self) -> Option<&str> {
        self.extra.get("parent").and_then(Value::as_str)
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.as_ref().map_or(0, Vec::len)
    }
}

/// Why a JSON document was not accepted as geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryRejection {
    #[error("document root must be a JSON object")]
    NotAnObject,

    #[error("no `geometry.*` entries found")]
    NoGeometryEntries,

    #[error("{geometry}: definition must be a JSON object")]
    DefinitionNotAnObject { geometry: String },

    #[error("{geometry}: `{field}` must be a positive number")]
    InvalidTextureSize {
        geometry: String,
        field: &'static str,
    },

    #[error("{geometry}: `bones` must be an array")]
    BonesNotSequence { geometry: String },

    #[error("{geometry}: bone #{index} has no name")]
    UnnamedBone { geometry: String, index: usize },

    #[error("{geometry}: bone `{bone}` pivot must be exactly three numbers")]
    InvalidPivot { geometry: String, bone: String },

    #[error("{geometry}: bone `{bone}` cubes must be an array")]
    CubesNotSequence { geometry: String, bone: String },

    #[error("{geometry}: {reason}")]
    Malformed { geometry: String, reason: String },
}

impl From<GeometryRejection> for SkinpackError {
    fn from(rejection: GeometryRejection) -> Self {
        SkinpackError::invalid_geometry(rejection.to_string())
    }
}

/// A validated geometry file: one or more named definitions, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryDocument {
    entries: Vec<(String, GeometryDefinition)>,
    extra: Map<String, Value>,
}

impl GeometryDocument {
    /// Name of the first definition in the file.
    ///
    /// Used as the geometry reference of every skin carrying this document;
    /// documents with several definitions resolve to the first one.
    pub fn primary_name(&self) -> &str {
        // Construction guarantees at least one entry.
        self.entries
            .first()
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&GeometryDefinition> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, def)| def)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeometryDefinition)> {
        self.entries.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-geometry top-level keys (e.g. `format_version`).
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Insert this document's keys into `target`. Existing keys are
    /// overwritten in place, keeping their original position.
    pub fn write_into(&self, target: &mut Map<String, Value>) -> Result<(), serde_json::Error> {
        for (key, value) in &self.extra {
            target.insert(key.clone(), value.clone());
        }
        for (name, def) in &self.entries {
            target.insert(name.clone(), serde_json::to_value(def)?);
        }
        Ok(())
    }

    /// The document as a single JSON object.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut map = Map::new();
        self.write_into(&mut map)?;
        Ok(Value::Object(map))
    }
}

/// Structural match of parsed JSON against the geometry document shape.
pub fn match_geometry(json: &Value) -> Result<GeometryDocument, GeometryRejection> {
    let root = json.as_object().ok_or(GeometryRejection::NotAnObject)?;

    let mut entries = Vec::new();
    let mut extra = Map::new();
    for (key, value) in root {
        if key.starts_with(GEOMETRY_KEY_PREFIX) {
            check_definition_shape(key, value)?;
            let definition = serde_json::from_value::<GeometryDefinition>(value.clone())
                .map_err(|e| GeometryRejection::Malformed {
                    geometry: key.clone(),
                    reason: e.to_string(),
                })?;
            entries.push((key.clone(), definition));
        } else {
            extra.insert(key.clone(), value.clone());
        }
    }

    if entries.is_empty() {
        return Err(GeometryRejection::NoGeometryEntries);
    }

    Ok(GeometryDocument { entries, extra })
}

/// Null-returning form of [`match_geometry`]: malformed input yields `None`.
pub fn validate_geometry(json: &Value) -> Option<GeometryDocument> {
    match match_geometry(json) {
        Ok(doc) => Some(doc),
        Err(rejection) => {
            tracing::debug!(%rejection, "Geometry rejected");
            None
        }
    }
}

/// Parse UTF-8 JSON bytes and validate them as a geometry document.
pub fn parse_geometry_bytes(bytes: &[u8]) -> SkinpackResult<GeometryDocument> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let json: Value = serde_json::from_slice(bytes).map_err(SkinpackError::JsonParse)?;
    let doc = match_geometry(&json)?;
    tracing::debug!(
        geometries = doc.len(),
        primary = doc.primary_name(),
        "Parsed geometry document"
    );
    Ok(doc)
}

fn check_definition_shape(geometry: &str, value: &Value) -> Result<(), GeometryRejection> {
    let def = value
        .as_object()
        .ok_or_else(|| GeometryRejection::DefinitionNotAnObject {
            geometry: geometry.to_string(),
        })?;

    for field in ["texturewidth", "textureheight"] {
        let positive = def
            .get(field)
            .and_then(Value::as_f64)
            .is_some_and(|n| n > 0.0);
        if !positive {
            return Err(GeometryRejection::InvalidTextureSize {
                geometry: geometry.to_string(),
                field,
            });
        }
    }

    let bones = def.get("bones").and_then(Value::as_array).ok_or_else(|| {
        GeometryRejection::BonesNotSequence {
            geometry: geometry.to_string(),
        }
    })?;

    for (index, bone) in bones.iter().enumerate() {
        let name = bone
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| GeometryRejection::UnnamedBone {
                geometry: geometry.to_string(),
                index,
            })?;

        let pivot_ok = bone
            .get("pivot")
            .and_then(Value::as_array)
            .is_some_and(|pivot| pivot.len() == 3 && pivot.iter().all(Value::is_number));
        if !pivot_ok {
            return Err(GeometryRejection::InvalidPivot {
                geometry: geometry.to_string(),
                bone: name.to_string(),
            });
        }

        match bone.get("cubes") {
            None | Some(Value::Null) | Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(GeometryRejection::CubesNotSequence {
                    geometry: geometry.to_string(),
                    bone: name.to_string(),
                })
            }
        }
    }

    Ok(())
}
