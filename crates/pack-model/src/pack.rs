//! The pack: an ordered collection of skins edited in one session.
//!
//! A pack is owned by exactly one editing session. Every mutation takes
//! `&mut self` and completes before returning, so callers never observe a
//! half-applied change. Callers must not mutate a pack while an export of its
//! snapshot is in flight; the snapshot is a copy, but the export reflects the
//! state at the moment it was taken.

use std::sync::Arc;

use skinpack_common::config::PackDefaults;

use crate::geometry::GeometryDocument;
use crate::ids::{IdGenerator, RandomIds, SkinId};
use crate::pixel::PixelGrid;
use crate::skin::{ModelVariant, Skin};

/// The unit of export.
pub struct Pack {
    name: String,
    description: String,
    skins: Vec<Skin>,
    selected: Option<SkinId>,
    geometry: Option<Arc<GeometryDocument>>,
    defaults: PackDefaults,
    ids: Box<dyn IdGenerator>,
}

/// Owned, immutable copy of a pack handed to the exporter.
#[derive(Debug, Clone)]
pub struct PackSnapshot {
    pub name: String,
    pub description: String,
    pub skins: Vec<Skin>,
}

impl PackSnapshot {
    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    /// Whether any skin carries a custom geometry document.
    pub fn has_custom_geometry(&self) -> bool {
        self.skins.iter().any(|skin| skin.geometry.is_some())
    }
}

impl Pack {
    /// Create an empty pack.
    pub fn new(defaults: PackDefaults, ids: impl IdGenerator + 'static) -> Self {
        Self {
            name: defaults.name.clone(),
            description: defaults.description.clone(),
            skins: Vec::new(),
            selected: None,
            geometry: None,
            defaults,
            ids: Box::new(ids),
        }
    }

    /// Empty pack with built-in defaults and random ids.
    pub fn with_defaults() -> Self {
        Self::new(PackDefaults::default(), RandomIds)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Skins in display and export order.
    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    pub fn skin(&self, id: SkinId) -> Option<&Skin> {
        self.skins.iter().find(|skin| skin.id == id)
    }

    /// The shared geometry document, if one was attached.
    pub fn geometry(&self) -> Option<&Arc<GeometryDocument>> {
        self.geometry.as_ref()
    }

    pub fn selected(&self) -> Option<SkinId> {
        self.selected
    }

    pub fn selected_skin(&self) -> Option<&Skin> {
        self.selected.and_then(|id| self.skin(id))
    }

    /// Move the selection cursor. Unknown ids leave it unchanged.
    pub fn select(&mut self, id: SkinId) -> bool {
        if self.skin(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Append a skin and select it.
    ///
    /// The placeholder name is numbered from the current skin count, so
    /// numbers can repeat after deletions.
    pub fn add_skin(
        &mut self,
        pixels: PixelGrid,
        variant: ModelVariant,
        geometry: Option<Arc<GeometryDocument>>,
    ) -> SkinId {
        let id = SkinId::new(self.ids.as_mut());
        let name = format!("{} {}", self.defaults.skin_name_prefix, self.skins.len() + 1);

        tracing::debug!(
            %id,
            %name,
            %variant,
            dimensions = %pixels.dimensions(),
            custom_geometry = geometry.is_some(),
            "Adding skin"
        );

        self.skins.push(Skin {
            id,
            name,
            variant,
            pixels,
            geometry,
        });
        self.selected = Some(id);
        id
    }

    /// Remove a skin. Unknown ids are a no-op.
    pub fn delete_skin(&mut self, id: SkinId) -> bool {
        let before = self.skins.len();
        self.skins.retain(|skin| skin.id != id);
        let removed = self.skins.len() != before;

        if self.selected == Some(id) {
            self.selected = None;
        }
        if removed {
            tracing::debug!(%id, remaining = self.skins.len(), "Deleted skin");
        }
        removed
    }

    /// Rename a skin. Blank names are ignored and the previous name kept.
    pub fn rename_skin(&mut self, id: SkinId, name: &str) -> bool {
        if name.trim().is_empty() {
            tracing::warn!(%id, "Ignoring blank skin name");
            return false;
        }
        match self.skins.iter_mut().find(|skin| skin.id == id) {
            Some(skin) => {
                skin.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Change the model variant of one skin.
    pub fn set_variant(&mut self, id: SkinId, variant: ModelVariant) -> bool {
        match self.skins.iter_mut().find(|skin| skin.id == id) {
            Some(skin) => {
                skin.variant = variant;
                true
            }
            None => false,
        }
    }

    /// Make `doc` the pack's geometry and point every existing skin at it.
    ///
    /// A pack distributes a single custom model, so this replaces whatever
    /// geometry individual skins carried before.
    pub fn attach_geometry(&mut self, doc: GeometryDocument) -> Arc<GeometryDocument> {
        let shared = Arc::new(doc);
        for skin in &mut self.skins {
            skin.geometry = Some(Arc::clone(&shared));
        }
        self.geometry = Some(Arc::clone(&shared));

        tracing::debug!(
            geometry = shared.primary_name(),
            skins = self.skins.len(),
            "Attached geometry to pack"
        );
        shared
    }

    /// Drop all skins, the selection and the geometry, and restore the
    /// default name and description.
    pub fn reset(&mut self) {
        self.skins.clear();
        self.selected = None;
        self.geometry = None;
        self.name = self.defaults.name.clone();
        self.description = self.defaults.description.clone();
        tracing::debug!("Pack reset");
    }

    /// Copy of the exportable state.
    pub fn snapshot(&self) -> PackSnapshot {
        PackSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            skins: self.skins.clone(),
        }
    }
}

impl Default for Pack {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for Pack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pack")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("skins", &self.skins.len())
            .field("selected", &self.selected)
            .field("geometry", &self.geometry.as_ref().map(|g| g.primary_name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::CanonicalDimensions;
    use crate::geometry::validate_geometry;
    use crate::ids::SequentialIds;
    use serde_json::json;

    fn pack() -> Pack {
        Pack::new(PackDefaults::default(), SequentialIds::new())
    }

    fn grid() -> PixelGrid {
        PixelGrid::blank(CanonicalDimensions::Modern)
    }

    fn geometry(name: &str) -> GeometryDocument {
        let mut root = serde_json::Map::new();
        root.insert(
            name.to_string(),
            json!({
                "texturewidth": 64,
                "textureheight": 64,
                "bones": [{ "name": "body", "pivot": [0, 24, 0] }]
            }),
        );
        validate_geometry(&serde_json::Value::Object(root)).unwrap()
    }

    #[test]
    fn test_add_skin_numbers_names_and_selects() {
        let mut pack = pack();
        let ids: Vec<SkinId> = (0..3)
            .map(|_| pack.add_skin(grid(), ModelVariant::Classic, None))
            .collect();

        let names: Vec<&str> = pack.skins().iter().map(Skin::name).collect();
        assert_eq!(names, ["Skin 1", "Skin 2", "Skin 3"]);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
        assert_eq!(pack.selected(), Some(ids[2]));
    }

    #[test]
    fn test_placeholder_name_follows_current_count() {
        let mut pack = pack();
        let first = pack.add_skin(grid(), ModelVariant::Classic, None);
        pack.add_skin(grid(), ModelVariant::Classic, None);
        pack.delete_skin(first);
        pack.add_skin(grid(), ModelVariant::Classic, None);

        let names: Vec<&str> = pack.skins().iter().map(Skin::name).collect();
        assert_eq!(names, ["Skin 2", "Skin 2"]);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut pack = pack();
        let a = pack.add_skin(grid(), ModelVariant::Classic, None);
        let b = pack.add_skin(grid(), ModelVariant::Slim, None);

        assert!(pack.delete_skin(b));
        assert_eq!(pack.selected(), None);
        assert_eq!(pack.len(), 1);
        assert_eq!(pack.skins()[0].id(), a);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut pack = pack();
        let a = pack.add_skin(grid(), ModelVariant::Classic, None);
        let stranger = SkinId::from(uuid::Uuid::nil());

        assert!(!pack.delete_skin(stranger));
        assert_eq!(pack.len(), 1);
        assert_eq!(pack.selected(), Some(a));
    }

    #[test]
    fn test_rename_ignores_blank_names() {
        let mut pack = pack();
        let id = pack.add_skin(grid(), ModelVariant::Classic, None);

        assert!(!pack.rename_skin(id, "   "));
        assert!(!pack.rename_skin(id, ""));
        assert_eq!(pack.skin(id).unwrap().name(), "Skin 1");

        assert!(pack.rename_skin(id, "Knight"));
        assert_eq!(pack.skin(id).unwrap().name(), "Knight");
    }

    #[test]
    fn test_set_variant_targets_one_skin() {
        let mut pack = pack();
        let a = pack.add_skin(grid(), ModelVariant::Classic, None);
        let b = pack.add_skin(grid(), ModelVariant::Classic, None);

        assert!(pack.set_variant(a, ModelVariant::Slim));
        assert_eq!(pack.skin(a).unwrap().variant(), ModelVariant::Slim);
        assert_eq!(pack.skin(b).unwrap().variant(), ModelVariant::Classic);
        assert_eq!(
            pack.skin(a).unwrap().geometry_reference(),
            "geometry.humanoid.customSlim"
        );
    }

    #[test]
    fn test_attach_geometry_broadcasts_to_existing_skins() {
        let mut pack = pack();
        for _ in 0..3 {
            pack.add_skin(grid(), ModelVariant::Classic, None);
        }

        let shared = pack.attach_geometry(geometry("geometry.tall"));
        assert!(pack
            .skins()
            .iter()
            .all(|skin| skin.geometry().is_some_and(|g| Arc::ptr_eq(g, &shared))));
        assert!(pack.geometry().is_some_and(|g| Arc::ptr_eq(g, &shared)));
        assert_eq!(pack.skins()[1].geometry_reference(), "geometry.tall");
    }

    #[test]
    fn test_attach_replaces_previous_geometry_everywhere() {
        let mut pack = pack();
        let first = pack.attach_geometry(geometry("geometry.one"));
        pack.add_skin(grid(), ModelVariant::Classic, Some(first));
        pack.add_skin(grid(), ModelVariant::Slim, None);

        pack.attach_geometry(geometry("geometry.two"));
        assert!(pack
            .skins()
            .iter()
            .all(|skin| skin.geometry_reference() == "geometry.two"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut pack = pack();
        pack.set_name("Renamed");
        pack.set_description("Changed");
        pack.add_skin(grid(), ModelVariant::Classic, None);
        pack.attach_geometry(geometry("geometry.foo"));

        pack.reset();
        assert!(pack.is_empty());
        assert_eq!(pack.selected(), None);
        assert!(pack.geometry().is_none());
        assert_eq!(pack.name(), "My Skin Pack");
        assert_eq!(pack.description(), "Custom Minecraft skin pack");
    }

    #[test]
    fn test_ids_not_reused_after_reset() {
        let mut pack = pack();
        let before = pack.add_skin(grid(), ModelVariant::Classic, None);
        pack.reset();
        let after = pack.add_skin(grid(), ModelVariant::Classic, None);
        assert_ne!(before, after);
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut pack = pack();
        let id = pack.add_skin(grid(), ModelVariant::Classic, None);
        let snapshot = pack.snapshot();

        pack.rename_skin(id, "Later");
        assert_eq!(snapshot.skins[0].name(), "Skin 1");
        assert!(!snapshot.has_custom_geometry());
    }
}
