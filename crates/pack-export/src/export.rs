//! Export job: snapshot in, archive bytes out.

use skinpack_common::error::{SkinpackError, SkinpackResult};
use skinpack_model::ids::IdGenerator;
use skinpack_model::pack::PackSnapshot;
use skinpack_raster::encode_png;

use crate::archive::{ArchiveSink, PackArchive, ZipSink};
use crate::documents::{
    merged_geometry, texture_file_name, to_pretty_json, Manifest, SkinIndex, GEOMETRY_FILE,
    MANIFEST_FILE, SKINS_FILE,
};
use crate::preflight::suggested_filename;

/// A pack snapshot ready to be serialized.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub snapshot: PackSnapshot,
}

/// Progress callback for export.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Export progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    /// Skin images encoded so far.
    pub skins_encoded: usize,

    /// Total skin images to encode.
    pub total_skins: usize,

    /// Current stage.
    pub stage: ExportStage,
}

/// Stages of the export process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Encoding,
    Packaging,
    Complete,
}

/// Serialize a pack into a zip archive.
///
/// This is the main entry point for export.
pub async fn export_pack(
    job: ExportJob,
    ids: &mut dyn IdGenerator,
    progress: Option<ProgressCallback>,
) -> SkinpackResult<PackArchive> {
    export_pack_into(job, ids, ZipSink::new(), progress).await
}

/// Serialize a pack into the given sink.
///
/// Skin images are encoded concurrently on blocking tasks; every encode must
/// finish before the first archive entry is written, so a failure leaves no
/// partial archive behind.
pub async fn export_pack_into<S: ArchiveSink>(
    job: ExportJob,
    ids: &mut dyn IdGenerator,
    mut sink: S,
    progress: Option<ProgressCallback>,
) -> SkinpackResult<PackArchive> {
    let snapshot = job.snapshot;
    if snapshot.is_empty() {
        return Err(SkinpackError::EmptyPack);
    }

    let total_skins = snapshot.skins.len();
    tracing::info!(
        pack = %snapshot.name,
        skins = total_skins,
        custom_geometry = snapshot.has_custom_geometry(),
        "Starting export"
    );

    let report = |skins_encoded: usize, stage: ExportStage| {
        if let Some(cb) = &progress {
            let progress = match stage {
                ExportStage::Preparing => 0.0,
                ExportStage::Complete => 1.0,
                _ => skins_encoded as f64 / total_skins as f64,
            };
            cb(ExportProgress {
                progress,
                skins_encoded,
                total_skins,
                stage,
            });
        }
    };
    report(0, ExportStage::Preparing);

    let manifest = to_pretty_json(&Manifest::new(snapshot.name.clone(), ids))?;
    let skin_index = to_pretty_json(&SkinIndex::from_snapshot(&snapshot))?;
    let geometry = merged_geometry(&snapshot)?
        .map(|merged| to_pretty_json(&merged))
        .transpose()?;

    let handles: Vec<_> = snapshot
        .skins
        .iter()
        .map(|skin| {
            let pixels = skin.pixels().clone();
            tokio::task::spawn_blocking(move || encode_png(&pixels))
        })
        .collect();

    let mut textures = Vec::with_capacity(total_skins);
    for (index, handle) in handles.into_iter().enumerate() {
        let png = handle.await.map_err(|e| {
            SkinpackError::archive_write(format!("encoding task for skin {index} failed: {e}"))
        })??;
        textures.push(png);
        report(textures.len(), ExportStage::Encoding);
    }

    report(total_skins, ExportStage::Packaging);
    let mut entries = Vec::with_capacity(total_skins + 3);
    let mut add = |name: String, contents: &[u8]| -> SkinpackResult<()> {
        sink.add_file(&name, contents)?;
        entries.push(name);
        Ok(())
    };

    add(MANIFEST_FILE.to_string(), &manifest)?;
    add(SKINS_FILE.to_string(), &skin_index)?;
    if let Some(geometry) = &geometry {
        add(GEOMETRY_FILE.to_string(), geometry)?;
    }
    for (index, png) in textures.iter().enumerate() {
        add(texture_file_name(index), png)?;
    }

    let bytes = sink.finish()?;
    report(total_skins, ExportStage::Complete);

    tracing::info!(
        entries = entries.len(),
        bytes = bytes.len(),
        "Export complete"
    );

    Ok(PackArchive {
        bytes,
        entries,
        suggested_name: suggested_filename(&snapshot.name),
    })
}
