//! Local asset storage for ingested media.

use crate::error::{IngestError, IngestResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Where ingested bytes end up. Returned paths are absolute and stable.
pub trait AssetStore {
    /// Write `bytes` under `file_name`, replacing any previous file.
    fn write_asset(&self, file_name: &str, bytes: &[u8]) -> IngestResult<PathBuf>;

    /// Copy a local file in under `file_name`.
    fn import_file(&self, source: &Path, file_name: &str) -> IngestResult<PathBuf> {
        let bytes = fs::read(source).map_err(|e| IngestError::io(source, e))?;
        self.write_asset(file_name, &bytes)
    }
}

/// Assets stored as plain files in one directory.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    dir: PathBuf,
}

impl FsAssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl AssetStore for FsAssetStore {
    fn write_asset(&self, file_name: &str, bytes: &[u8]) -> IngestResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| IngestError::io(&self.dir, e))?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes).map_err(|e| IngestError::io(&path, e))?;
        Ok(path)
    }

    fn import_file(&self, source: &Path, file_name: &str) -> IngestResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| IngestError::io(&self.dir, e))?;
        let path = self.dir.join(file_name);
        fs::copy(source, &path).map_err(|e| IngestError::io(source, e))?;
        Ok(path)
    }
}

/// Name for a downloaded asset: `web-<hash prefix>.<ext>`. Identical bytes
/// map to the same file.
pub fn remote_asset_name(bytes: &[u8], extension: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = format!("{:x}", hasher.finalize());
    format!("web-{}.{}", &digest[..16], extension)
}

/// Name for a copied local file: `local-<short id>-<sanitized name>`.
pub fn local_asset_name(source: &Path) -> String {
    let original = source.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("local-{}-{}", &id[..8], sanitize_file_name(&original))
}

/// Replace everything outside `[A-Za-z0-9.]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}
