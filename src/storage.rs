use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Single-key blob storage, the localStorage stand-in.
///
/// Whole-value replace only: `set` overwrites the entire blob, `get`
/// reads it back, `clear` forgets it. A missing blob is the normal
/// first-run state, not an error.
pub trait BlobStorage {
    fn get(&self) -> Result<Option<String>>;
    fn set(&mut self, blob: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Blob kept in a single file on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStorage for FileStorage {
    fn get(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("reading workout log: {}", self.path.display()))
            }
        }
    }

    fn set(&mut self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log dir: {}", parent.display()))?;
        }
        fs::write(&self.path, blob)
            .with_context(|| format!("writing workout log: {}", self.path.display()))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("removing workout log: {}", self.path.display()))
            }
        }
    }
}

/// In-process blob, for tests and ephemeral logs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
}

impl MemoryStorage {
    pub const fn new() -> Self {
        Self { blob: None }
    }

    /// Pre-seeded storage, as if a previous session had saved `blob`.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }
}

impl BlobStorage for MemoryStorage {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn set(&mut self, blob: &str) -> Result<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.blob = None;
        Ok(())
    }
}
