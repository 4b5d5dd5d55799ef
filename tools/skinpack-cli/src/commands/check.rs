//! Validate a skin image or a geometry file before building.

use std::path::PathBuf;

use skinpack_common::error::SkinpackError;
use skinpack_model::geometry::{parse_geometry_bytes, Bone};
use skinpack_raster::{accepted_dimensions, decode_skin, probe_dimensions};

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Checking: {}", path.display());

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => check_skin(&bytes),
        Some("json") => check_geometry(&bytes),
        _ => Err(anyhow::anyhow!(
            "Unknown file type: {}. Expected .png or .json",
            path.display()
        )),
    }
}

fn check_skin(bytes: &[u8]) -> anyhow::Result<()> {
    let (width, height) = probe_dimensions(bytes)?;
    println!("  Image size: {width}x{height}");

    match decode_skin(bytes) {
        Ok(grid) => {
            let opaque = grid
                .rows()
                .iter()
                .flatten()
                .filter(|px| !px.is_transparent())
                .count();
            println!("  Visible pixels: {opaque}");
            println!("\n[OK] Valid skin texture ({})", grid.dimensions());
            Ok(())
        }
        Err(e) => {
            println!("\n[FAIL] {e}");
            if matches!(e, SkinpackError::UnsupportedDimensions { .. }) {
                let sizes: Vec<String> = accepted_dimensions().map(|d| d.to_string()).collect();
                println!("       Accepted sizes: {}", sizes.join(", "));
            }
            Err(e.into())
        }
    }
}

fn check_geometry(bytes: &[u8]) -> anyhow::Result<()> {
    let doc = match parse_geometry_bytes(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            println!("\n[FAIL] {e}");
            return Err(e.into());
        }
    };

    for (name, def) in doc.iter() {
        let cubes: usize = def.bones.iter().map(Bone::cube_count).sum();
        println!(
            "  {name}: texture {}x{}, {} bone(s), {cubes} cube(s)",
            def.texture_width,
            def.texture_height,
            def.bones.len()
        );
    }

    println!(
        "\n[OK] Valid geometry; skins will reference {}",
        doc.primary_name()
    );
    Ok(())
}
