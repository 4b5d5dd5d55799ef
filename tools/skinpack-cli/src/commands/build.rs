//! Build a skin pack from image files.

use std::io::Write;
use std::path::{Path, PathBuf};

use skinpack_common::config::AppConfig;
use skinpack_export::{export_pack, preflight, ExportJob, ExportProgress, PackKind};
use skinpack_model::geometry::parse_geometry_bytes;
use skinpack_model::ids::RandomIds;
use skinpack_model::pack::Pack;
use skinpack_model::skin::ModelVariant;
use skinpack_raster::decode_skin;

pub struct BuildOptions {
    pub skins: Vec<String>,
    pub skin_names: Vec<String>,
    pub geometry: Option<PathBuf>,
    pub custom: bool,
    pub name: Option<String>,
    pub description: Option<String>,
    pub output: Option<PathBuf>,
}

pub async fn run(options: BuildOptions, config: &AppConfig) -> anyhow::Result<()> {
    let mut pack = Pack::new(config.pack.clone(), RandomIds);
    if let Some(name) = options.name {
        pack.set_name(name);
    }
    if let Some(description) = options.description {
        pack.set_description(description);
    }

    println!("Building skin pack: {}", pack.name());

    for arg in &options.skins {
        let (path, variant) = parse_skin_arg(arg);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        let pixels =
            decode_skin(&bytes).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;

        println!(
            "  + {} ({}, {})",
            path.display(),
            pixels.dimensions(),
            variant
        );
        pack.add_skin(pixels, variant, None);
    }

    let ids: Vec<_> = pack.skins().iter().map(|skin| skin.id()).collect();
    for (id, name) in ids.into_iter().zip(&options.skin_names) {
        pack.rename_skin(id, name);
    }

    let kind = if options.custom || options.geometry.is_some() {
        PackKind::Custom
    } else {
        PackKind::Standard
    };

    if let Some(path) = &options.geometry {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        let doc = parse_geometry_bytes(&bytes)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        let doc = pack.attach_geometry(doc);
        println!("  Geometry: {} ({} model(s))", doc.primary_name(), doc.len());
    }

    let snapshot = pack.snapshot();
    preflight(&snapshot, kind)?;

    let progress_cb: Box<dyn Fn(ExportProgress) + Send> = Box::new(|p| {
        let _ = write_progress(&mut std::io::stdout(), &p);
    });

    let archive = export_pack(ExportJob { snapshot }, &mut RandomIds, Some(progress_cb)).await?;
    println!();

    let output_path = resolve_output(options.output, &config.output_dir, &archive.suggested_name);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output_path, &archive.bytes).await?;

    tracing::info!(path = %output_path.display(), bytes = archive.bytes.len(), "Pack written");
    println!(
        "Pack written: {} ({} entries)",
        output_path.display(),
        archive.entries.len()
    );

    Ok(())
}

/// Rewrite the progress line in place. Flushed, since the line has no newline.
fn write_progress(out: &mut impl Write, p: &ExportProgress) -> std::io::Result<()> {
    write!(
        out,
        "\r  Progress: {:.0}% ({}/{} skins encoded)  ",
        p.progress * 100.0,
        p.skins_encoded,
        p.total_skins,
    )?;
    out.flush()
}

/// Split `path[:variant]`. The suffix is only taken when it names a variant,
/// so paths containing colons still work.
fn parse_skin_arg(arg: &str) -> (PathBuf, ModelVariant) {
    if let Some((path, suffix)) = arg.rsplit_once(':') {
        if let Ok(variant) = suffix.parse::<ModelVariant>() {
            return (PathBuf::from(path), variant);
        }
    }
    (PathBuf::from(arg), ModelVariant::default())
}

fn resolve_output(output: Option<PathBuf>, default_dir: &Path, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => default_dir.join(file_name),
    }
}
