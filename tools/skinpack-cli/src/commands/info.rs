//! Show the contents of a built pack.

use std::path::PathBuf;

use skinpack_export::{
    read_entry, read_entry_names, Manifest, SkinIndex, GEOMETRY_FILE, MANIFEST_FILE, SKINS_FILE,
};
use skinpack_model::geometry::parse_geometry_bytes;
use skinpack_raster::probe_dimensions;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;

    let entries = read_entry_names(&bytes)
        .map_err(|e| anyhow::anyhow!("Failed to open pack: {e}"))?;

    let manifest: Manifest = serde_json::from_slice(&read_entry(&bytes, MANIFEST_FILE)?)
        .map_err(|e| anyhow::anyhow!("Invalid {MANIFEST_FILE}: {e}"))?;
    let index: SkinIndex = serde_json::from_slice(&read_entry(&bytes, SKINS_FILE)?)
        .map_err(|e| anyhow::anyhow!("Invalid {SKINS_FILE}: {e}"))?;

    println!("Pack: {}", manifest.header.name);
    println!("  Header UUID: {}", manifest.header.uuid);
    for module in &manifest.modules {
        println!("  Module: {} ({})", module.module_type, module.uuid);
    }
    println!(
        "  Version: {}",
        manifest
            .header
            .version
            .map(|part| part.to_string())
            .join(".")
    );
    println!();

    println!("Skins:");
    for skin in &index.skins {
        let size = read_entry(&bytes, &skin.texture)
            .and_then(|png| probe_dimensions(&png))
            .map(|(w, h)| format!("{w}x{h}"))
            .unwrap_or_else(|_| "missing".to_string());
        println!(
            "  {} [{}] {} ({size})",
            skin.localization_name, skin.geometry, skin.texture
        );
    }
    println!();

    if entries.iter().any(|name| name == GEOMETRY_FILE) {
        let doc = parse_geometry_bytes(&read_entry(&bytes, GEOMETRY_FILE)?)?;
        println!("Geometry:");
        for name in doc.names() {
            println!("  {name}");
        }
        println!();
    }

    println!("Entries:");
    for name in &entries {
        println!("  {name}");
    }

    Ok(())
}
