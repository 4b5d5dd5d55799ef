//! Archive containers for built packs.

use std::io::{Cursor, Write};

use skinpack_common::error::{SkinpackError, SkinpackResult};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Destination for the files of one pack.
///
/// Entries are flat: names never contain directory separators.
pub trait ArchiveSink {
    /// Append one file.
    fn add_file(&mut self, name: &str, contents: &[u8]) -> SkinpackResult<()>;

    /// Close the container and return its bytes.
    fn finish(self) -> SkinpackResult<Vec<u8>>;
}

/// In-memory zip container (`.mcpack` files are zip archives).
///
/// All entries carry the same fixed timestamp so identical input produces
/// identical bytes.
pub struct ZipSink {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipSink {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn file_options() -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
    }
}

impl Default for ZipSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSink for ZipSink {
    fn add_file(&mut self, name: &str, contents: &[u8]) -> SkinpackResult<()> {
        if name.contains('/') || name.contains('\\') {
            return Err(SkinpackError::archive_write(format!(
                "entry `{name}` would create a directory"
            )));
        }
        self.writer
            .start_file(name.to_string(), Self::file_options())
            .map_err(|e| SkinpackError::archive_write(format!("{name}: {e}")))?;
        self.writer
            .write_all(contents)
            .map_err(|e| SkinpackError::archive_write(format!("{name}: {e}")))?;
        Ok(())
    }

    fn finish(self) -> SkinpackResult<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| SkinpackError::archive_write(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

/// A finished pack archive.
#[derive(Debug, Clone)]
pub struct PackArchive {
    /// Archive container bytes.
    pub bytes: Vec<u8>,

    /// Entry names in the order they were written.
    pub entries: Vec<String>,

    /// File name to offer when saving, derived from the pack name.
    pub suggested_name: String,
}

/// List the entry names of an archive produced by [`ZipSink`].
pub fn read_entry_names(bytes: &[u8]) -> SkinpackResult<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| SkinpackError::archive_write(format!("unreadable archive: {e}")))?;
    (0..archive.len())
        .map(|i| {
            archive
                .by_index(i)
                .map(|file| file.name().to_string())
                .map_err(|e| SkinpackError::archive_write(format!("unreadable entry {i}: {e}")))
        })
        .collect()
}

/// Read one entry of an archive produced by [`ZipSink`].
pub fn read_entry(bytes: &[u8], name: &str) -> SkinpackResult<Vec<u8>> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| SkinpackError::archive_write(format!("unreadable archive: {e}")))?;
    let mut file = archive
        .by_name(name)
        .map_err(|e| SkinpackError::archive_write(format!("{name}: {e}")))?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}
