//! Archive writer built on tar + flate2

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, EntryType, Header};
use tracing::debug;

use crate::{Error, Result};

/// Writes one gzip-compressed tar archive with fully caller-supplied
/// entry metadata.
pub struct ArchiveWriter {
    builder: Builder<GzEncoder<File>>,
    path: PathBuf,
    entries: usize,
}

impl std::fmt::Debug for ArchiveWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveWriter")
            .field("path", &self.path)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl ArchiveWriter {
    /// Creates the output file. When it already exists and
    /// `overwrite` is false, fails without touching it.
    pub fn create(path: impl Into<PathBuf>, overwrite: bool) -> Result<Self> {
        let path = path.into();
        if path.exists() && !overwrite {
            return Err(Error::OutputExists { path });
        }
        let file = File::create(&path)?;
        let encoder = GzEncoder::new(file, Compression::default());
        Ok(Self {
            builder: Builder::new(encoder),
            path,
            entries: 0,
        })
    }

    /// Appends one regular-file entry with the given permission bits
    /// and modification time (Unix seconds). Content is written
    /// untransformed.
    pub fn append_file(
        &mut self,
        entry_path: &str,
        mode: u32,
        mtime: i64,
        data: &[u8],
    ) -> Result<()> {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_mode(mode);
        header.set_uid(0);
        header.set_gid(0);
        header.set_mtime(u64::try_from(mtime).unwrap_or(0));
        header.set_size(data.len() as u64);
        header.set_path(entry_path)?;
        header.set_cksum();
        self.builder.append(&header, data)?;
        self.entries += 1;
        Ok(())
    }

    /// Flushes the tar stream and the gzip encoder. The archive only
    /// counts as written once this returns.
    pub fn finish(self) -> Result<()> {
        debug!(path = %self.path.display(), entries = self.entries, "finishing archive");
        let encoder = self.builder.into_inner()?;
        let mut file = encoder.finish()?;
        file.flush()?;
        Ok(())
    }

    /// The output file path this writer was created with.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
